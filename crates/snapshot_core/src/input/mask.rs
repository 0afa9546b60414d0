//! Tracked buttons and the bitmask that records which of them are held.
//!
//! Only a fixed handful of buttons matter to the camera mapping: the three
//! mouse buttons and the three axis-selector keys.  Each gets a variant
//! here with an explicit bit, and anything else maps to `None` so callers
//! can drop it without a special case.

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// A bit-addressable button tracked by a [`ButtonMask`].
pub trait MaskBit: Copy {
    fn bit(self) -> u8;
}

// ─── Mouse buttons ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

impl PointerButton {
    /// Maps a winit mouse button onto a tracked button.  Back/forward and
    /// vendor buttons are not tracked.
    pub fn from_mouse(button: MouseButton) -> Option<Self> {
        match button {
            MouseButton::Left => Some(Self::Left),
            MouseButton::Right => Some(Self::Right),
            MouseButton::Middle => Some(Self::Middle),
            _ => None,
        }
    }
}

impl MaskBit for PointerButton {
    fn bit(self) -> u8 {
        match self {
            Self::Left => 1 << 0,
            Self::Right => 1 << 1,
            Self::Middle => 1 << 2,
        }
    }
}

// ─── Axis modifiers ────────────────────────────────────────────────────────

/// Keys that select which world axes a pan or scale drag affects.
///
/// `V`, `N` and `B` drive the X, Y and Z axes respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisModifier {
    V,
    N,
    B,
}

impl AxisModifier {
    pub const ALL: [AxisModifier; 3] = [Self::V, Self::N, Self::B];

    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::KeyV => Some(Self::V),
            KeyCode::KeyN => Some(Self::N),
            KeyCode::KeyB => Some(Self::B),
            _ => None,
        }
    }

    /// Index of the world axis this modifier selects.
    #[inline]
    pub fn axis(self) -> usize {
        match self {
            Self::V => 0,
            Self::N => 1,
            Self::B => 2,
        }
    }
}

impl MaskBit for AxisModifier {
    fn bit(self) -> u8 {
        1 << self.axis()
    }
}

// ─── Mask ──────────────────────────────────────────────────────────────────

/// Set of currently held buttons of one kind.
///
/// A bit is set by a press and cleared by a release; nothing else touches
/// it.  Repeated presses of a held button are idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonMask<B> {
    bits: u8,
    _kind: std::marker::PhantomData<B>,
}

impl<B> Default for ButtonMask<B> {
    fn default() -> Self {
        Self {
            bits: 0,
            _kind: std::marker::PhantomData,
        }
    }
}

impl<B: MaskBit> ButtonMask<B> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a press (`true`) or release (`false`).
    pub fn update(&mut self, button: B, pressed: bool) {
        if pressed {
            self.bits |= button.bit();
        } else {
            self.bits &= !button.bit();
        }
    }

    #[inline]
    pub fn contains(&self, button: B) -> bool {
        self.bits & button.bit() != 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}
