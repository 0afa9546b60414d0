//! Frame timing.
//!
//! The window owns a [`TimeClock`] and ticks it once per update; the
//! resulting [`Time`] is what [`Scene::update`](crate::Scene::update) sees.

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// A snapshot of timing information for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Time {
    /// Seconds since the previous tick (unclamped).
    pub delta: f64,

    /// Seconds since the clock was created.
    pub elapsed: f64,

    /// Number of ticks before this one.
    pub frame_count: u64,
}

// ─── Clock ─────────────────────────────────────────────────────────────────

/// Stateful timer that produces [`Time`] snapshots.
pub struct TimeClock {
    start: Instant,
    last_elapsed: f64,
    frame_count: u64,
}

impl TimeClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            last_elapsed: 0.0,
            frame_count: 0,
        }
    }

    /// Current snapshot without advancing the clock.
    pub fn peek(&self) -> Time {
        let elapsed = self.start.elapsed().as_secs_f64();
        Time {
            delta: elapsed - self.last_elapsed,
            elapsed,
            frame_count: self.frame_count,
        }
    }

    /// Advance by one frame.
    pub fn tick(&mut self) -> Time {
        let time = self.peek();
        self.advance_to(time.elapsed);
        time
    }

    /// Advance the clock as if `elapsed` seconds had passed since start.
    ///
    /// Lets callers drive the clock from an external time source.
    pub fn tick_at(&mut self, elapsed: f64) -> Time {
        let time = Time {
            delta: elapsed - self.last_elapsed,
            elapsed,
            frame_count: self.frame_count,
        };
        self.advance_to(elapsed);
        time
    }

    fn advance_to(&mut self, elapsed: f64) {
        self.last_elapsed = elapsed;
        self.frame_count += 1;
    }
}

impl Default for TimeClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_at_reports_delta_from_previous_tick() {
        let mut clock = TimeClock::new();
        let first = clock.tick_at(0.5);
        assert_eq!(first.delta, 0.5);
        assert_eq!(first.frame_count, 0);

        let second = clock.tick_at(0.75);
        assert_eq!(second.delta, 0.25);
        assert_eq!(second.elapsed, 0.75);
        assert_eq!(second.frame_count, 1);
    }

    #[test]
    fn peek_does_not_advance() {
        let clock = TimeClock::new();
        assert_eq!(clock.peek().frame_count, 0);
        assert_eq!(clock.peek().frame_count, 0);
    }
}
