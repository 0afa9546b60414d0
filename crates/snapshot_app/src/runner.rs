use std::path::PathBuf;

use glam::DVec2;
use snapshot_core::{HarnessContext, KeyAction, ModifiersState, Scene};
use winit::{
    application::ApplicationHandler,
    event::{MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use crate::builder::AppConfig;
use crate::error::AppError;
use crate::window::Window;

struct Runner<S: Scene> {
    config: AppConfig,
    /// Scene and context wait here until `resumed` can build the window.
    pending: Option<(S, HarnessContext)>,
    window: Option<Window<S>>,
    modifiers: ModifiersState,
    dropped: Vec<String>,
    error: Option<AppError>,
}

impl<S: Scene> Runner<S> {
    fn new(config: AppConfig, scene: S, context: HarnessContext) -> Self {
        Self {
            config,
            pending: Some((scene, context)),
            window: None,
            modifiers: ModifiersState::empty(),
            dropped: Vec::new(),
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        log::error!("{err}");
        self.error = Some(err);
        event_loop.exit();
    }
}

impl<S: Scene> ApplicationHandler for Runner<S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some((scene, context)) = self.pending.take() else {
            return;
        };
        match Window::new(event_loop, &self.config, scene, context) {
            Ok(window) => self.window = Some(window),
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(window) = &mut self.window else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => window.resize(size.width, size.height),
            WindowEvent::ModifiersChanged(mods) => self.modifiers = mods.state(),
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    let action = KeyAction::from_winit(event.state, event.repeat);
                    window.state.process_key(code, action, self.modifiers);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                window
                    .state
                    .process_mouse_move(DVec2::new(position.x, position.y));
            }
            WindowEvent::MouseInput { state, button, .. } => {
                window
                    .state
                    .process_mouse_button(button, KeyAction::from_winit(state, false));
            }
            WindowEvent::MouseWheel { delta, .. } => {
                window.state.process_scroll(scroll_offset(delta));
            }
            WindowEvent::DroppedFile(path) => {
                if let Some(path) = dropped_path(path) {
                    self.dropped.push(path);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &mut self.window else {
            return;
        };

        // every path dropped since the last frame arrives as one list
        if !self.dropped.is_empty() {
            window
                .state
                .process_file_drop(std::mem::take(&mut self.dropped));
        }

        match window.frame() {
            Ok(true) => {}
            Ok(false) => event_loop.exit(),
            Err(err) => self.fail(event_loop, err),
        }
    }
}

/// Dropped paths travel as strings; a non-UTF-8 path could not be opened
/// again after a lossy conversion, so it is skipped.
fn dropped_path(path: PathBuf) -> Option<String> {
    match path.into_os_string().into_string() {
        Ok(path) => Some(path),
        Err(raw) => {
            log::warn!("ignoring dropped file with a non UTF-8 path: {raw:?}");
            None
        }
    }
}

fn scroll_offset(delta: MouseScrollDelta) -> DVec2 {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => DVec2::new(x as f64, y as f64),
        MouseScrollDelta::PixelDelta(p) => DVec2::new(p.x, p.y),
    }
}

pub(crate) fn run_internal<S: Scene + 'static>(
    config: AppConfig,
    scene: S,
    context: HarnessContext,
) -> Result<(), AppError> {
    let mut runner = Runner::new(config, scene, context);
    let event_loop = EventLoop::new()?;
    // Poll = spin the loop as fast as possible; no sleeping between frames.
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut runner)?;
    match runner.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
