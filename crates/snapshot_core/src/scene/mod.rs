//! Scenes the viewer window can host.

pub mod graph;
pub mod volatile;

pub use graph::{Capability, Node, Shape, StateTable, Uniform, UniformValue};
pub use volatile::VolatileScene;

use crate::camera::Camera;
use crate::color::Color;
use crate::context::HarnessContext;
use crate::input::KeyboardHandler;
use crate::time::Time;

/// What a scene hands to the presentation layer each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub root: Node,
}

impl Frame {
    /// Clear colour of the root state table, black without one.
    pub fn clear_color(&self) -> Color {
        self.root
            .state_table
            .as_ref()
            .map_or(Color::BLACK, |s| s.clear_color)
    }
}

/// A scene owned by the viewer window.
///
/// The window drives it: input goes to [`camera_mut`](Scene::camera_mut)
/// through the mapper, then `update` and `render` run once per frame.
pub trait Scene {
    fn camera(&self) -> &Camera;

    fn camera_mut(&mut self) -> &mut Camera;

    /// Advance the scene.  Returning `false` asks the window to close.
    fn update(
        &mut self,
        keyboard: &mut KeyboardHandler,
        ctx: &mut HarnessContext,
        time: Time,
    ) -> bool;

    fn render(&mut self) -> Frame;
}
