//! Everything the window does with input, minus the platform handle.
//!
//! `ViewerState` owns the scene, the keyboard handler, the input mapper and
//! the harness context.  The winit runner translates events and calls the
//! `process_*` methods; tests call them directly.

use glam::{DVec2, UVec2};
use snapshot_core::camera::CameraControl;
use snapshot_core::settings::{SettingValue, INPUT_FILES};
use snapshot_core::{
    Frame, HarnessContext, InputMapper, KeyAction, KeyCode, KeyboardHandler, MapperSettings,
    ModifiersState, MouseButton, Scene, TimeClock,
};

pub struct ViewerState<S: Scene> {
    scene: S,
    keyboard: KeyboardHandler,
    mapper: InputMapper,
    context: HarnessContext,
    clock: TimeClock,
}

impl<S: Scene> ViewerState<S> {
    /// Takes ownership of `scene` and sizes its camera to `size`.
    pub fn new(mut scene: S, context: HarnessContext, size: UVec2, mapper: MapperSettings) -> Self {
        scene.camera_mut().set_viewport_bounds(size);
        Self {
            scene,
            keyboard: KeyboardHandler::new(),
            mapper: InputMapper::with_settings(mapper),
            context,
            clock: TimeClock::new(),
        }
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn mapper(&self) -> &InputMapper {
        &self.mapper
    }

    pub fn context(&self) -> &HarnessContext {
        &self.context
    }

    pub fn process_resize(&mut self, size: UVec2) {
        self.scene.camera_mut().set_viewport_bounds(size);
    }

    /// Escape, the arrows and R act on their own through the keyboard
    /// handler; every other key only feeds the axis-modifier mask.
    pub fn process_key(&mut self, key: KeyCode, action: KeyAction, mods: ModifiersState) {
        match key {
            KeyCode::Escape => self.keyboard.escape(action),
            KeyCode::ArrowLeft => self.keyboard.left_arrow(action),
            KeyCode::ArrowRight => self.keyboard.right_arrow(action),
            KeyCode::KeyR => self.keyboard.r(action, mods),
            _ => match action {
                KeyAction::Press => self.mapper.on_modifier_key_change(key, true),
                KeyAction::Release => self.mapper.on_modifier_key_change(key, false),
                KeyAction::Repeat => {}
            },
        }
    }

    pub fn process_mouse_move(&mut self, position: DVec2) {
        self.mapper.on_pointer_move(position, self.scene.camera_mut());
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, action: KeyAction) {
        match action {
            KeyAction::Press => self.mapper.on_button_change(button, true),
            KeyAction::Release => self.mapper.on_button_change(button, false),
            KeyAction::Repeat => {}
        }
    }

    pub fn process_scroll(&mut self, offset: DVec2) {
        self.mapper.on_scroll(offset);
    }

    /// Publishes dropped paths through the `input_files` setting.
    pub fn process_file_drop(&mut self, files: Vec<String>) {
        log::debug!("{} file(s) dropped", files.len());
        if !self.context.settings.set(INPUT_FILES, SettingValue::Paths(files)) {
            log::warn!("dropped files ignored: '{INPUT_FILES}' did not accept them");
        }
    }

    /// Advances the clock and the scene; `false` means close the window.
    pub fn update(&mut self) -> bool {
        let time = self.clock.tick();
        self.scene.update(&mut self.keyboard, &mut self.context, time)
    }

    pub fn render(&mut self) -> Frame {
        self.scene.render()
    }
}
