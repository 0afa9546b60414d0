use winit::event::ElementState;
use winit::keyboard::ModifiersState;

use crate::camera::ResetKind;

/// Press / release / auto-repeat, as delivered by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Release,
    Repeat,
}

impl KeyAction {
    pub fn from_winit(state: ElementState, repeat: bool) -> Self {
        match (state, repeat) {
            (ElementState::Pressed, false) => Self::Press,
            (ElementState::Pressed, true) => Self::Repeat,
            (ElementState::Released, _) => Self::Release,
        }
    }

    #[inline]
    pub fn is_down(self) -> bool {
        !matches!(self, Self::Release)
    }
}

/// Filters the keys that trigger actions on their own (escape, arrows, R)
/// and turns them into queries the scene polls once per update.
#[derive(Debug, Default)]
pub struct KeyboardHandler {
    escape: bool,
    arrow_steps: i32,
    reset: Option<ResetKind>,
}

impl KeyboardHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn escape(&mut self, action: KeyAction) {
        if action == KeyAction::Press {
            self.escape = true;
        }
    }

    pub fn left_arrow(&mut self, action: KeyAction) {
        if action.is_down() {
            self.arrow_steps -= 1;
        }
    }

    pub fn right_arrow(&mut self, action: KeyAction) {
        if action.is_down() {
            self.arrow_steps += 1;
        }
    }

    /// `R` resets the view; `Shift+R` resets the per-axis scale as well.
    pub fn r(&mut self, action: KeyAction, mods: ModifiersState) {
        if action != KeyAction::Press {
            return;
        }
        self.reset = Some(if mods.shift_key() {
            ResetKind::All
        } else {
            ResetKind::View
        });
    }

    /// Latched once escape is pressed; stays set until [`clear_escape`].
    ///
    /// [`clear_escape`]: Self::clear_escape
    pub fn escape_pressed(&self) -> bool {
        self.escape
    }

    pub fn clear_escape(&mut self) {
        self.escape = false;
    }

    /// Net arrow presses since the last call: right counts +1, left -1.
    pub fn take_arrow_steps(&mut self) -> i32 {
        std::mem::take(&mut self.arrow_steps)
    }

    pub fn take_reset_request(&mut self) -> Option<ResetKind> {
        self.reset.take()
    }
}
