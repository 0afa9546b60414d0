//! Demo scene that rebuilds its whole graph on every render.
//!
//! The graph is a root node holding the camera matrices and global state,
//! with a single coloured rectangle underneath.  Escape closes the window,
//! `R` / `Shift+R` reset the camera and the arrow keys step through the
//! files dropped onto the window.

use glam::{IVec2, Vec4};

use super::graph::{Capability, Node, RectangleSpec, Shape, StateTable, Uniform, UniformValue};
use super::{Frame, Scene};
use crate::camera::{Camera, CameraControl};
use crate::color::Color;
use crate::context::HarnessContext;
use crate::input::KeyboardHandler;
use crate::settings::INPUT_FILES;
use crate::time::Time;

pub struct VolatileScene {
    camera: Camera,
    /// Index into `input_files` of the file currently shown.
    selected: Option<usize>,
    seen_generation: Option<u64>,
}

impl VolatileScene {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            selected: None,
            seen_generation: None,
        }
    }

    /// Path of the selected input file, if any.
    pub fn selected_file<'a>(&self, ctx: &'a HarnessContext) -> Option<&'a str> {
        self.selected
            .and_then(|i| ctx.input_files().get(i))
            .map(String::as_str)
    }

    fn sync_input_files(&mut self, keyboard: &mut KeyboardHandler, ctx: &HarnessContext) {
        let generation = ctx.settings.generation(INPUT_FILES);
        let files = ctx.input_files();

        if generation != self.seen_generation {
            self.seen_generation = generation;
            self.selected = (!files.is_empty()).then_some(0);
            log::info!("{} input file(s) available", files.len());
            if let Some(path) = files.first() {
                log::info!("showing {path}");
            }
        }

        let steps = keyboard.take_arrow_steps();
        if steps == 0 || files.is_empty() {
            return;
        }
        let len = files.len() as i64;
        let current = self.selected.unwrap_or(0) as i64;
        let next = (current + steps as i64).rem_euclid(len) as usize;
        self.selected = Some(next);
        log::info!("showing {}", files[next]);
    }

    fn build_rectangle(color: Color) -> Node {
        let mut node = Node::new();
        node.add_uniform(Uniform::new(
            "uBaseColor",
            UniformValue::Vec4(Vec4::from_array(color.to_array())),
        ));
        node.add_shape(Shape::Rectangle(RectangleSpec::default()));
        node
    }

    fn build_graph(&self) -> Node {
        let viewport = self.camera.viewport;
        let mut root = Node::new();
        root.add_uniform(Uniform::new(
            "uProjectionMatrix",
            UniformValue::Mat4(self.camera.projection_matrix().as_mat4()),
        ));
        root.add_uniform(Uniform::new(
            "uModelviewMatrix",
            UniformValue::Mat4(self.camera.view_matrix().as_mat4()),
        ));

        let mut state = StateTable::new(viewport);
        state.set_viewport(IVec2::ZERO, viewport);
        state.clear_color = Color::SLATE;
        state.clear_depth = 1.0;
        state.enable(Capability::DepthTest, true);
        state.enable(Capability::CullFace, true);
        root.state_table = Some(state);

        root.add_child(Self::build_rectangle(Color::MUSTARD));
        root
    }
}

impl Scene for VolatileScene {
    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    fn update(
        &mut self,
        keyboard: &mut KeyboardHandler,
        ctx: &mut HarnessContext,
        _time: Time,
    ) -> bool {
        if keyboard.escape_pressed() {
            log::debug!("escape pressed; closing");
            return false;
        }
        if let Some(kind) = keyboard.take_reset_request() {
            self.camera.reset(kind);
        }
        self.sync_input_files(keyboard, ctx);
        true
    }

    fn render(&mut self) -> Frame {
        Frame {
            root: self.build_graph(),
        }
    }
}

impl Default for VolatileScene {
    fn default() -> Self {
        let mut camera = Camera::default();
        camera.set_viewport_bounds(glam::UVec2::new(800, 800));
        Self::new(camera)
    }
}
