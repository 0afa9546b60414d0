//! Input state for the viewer window.
//!
//! The window feeds raw winit events in; [`InputMapper`] keeps the mouse
//! and axis-modifier masks and turns drags into camera calls, while
//! [`KeyboardHandler`] collects the keys that act on their own.

pub mod keyboard;
pub mod mapper;
pub mod mask;

pub use keyboard::{KeyAction, KeyboardHandler};
pub use mapper::{InputMapper, MapperSettings};
pub use mask::{AxisModifier, ButtonMask, MaskBit, PointerButton};
