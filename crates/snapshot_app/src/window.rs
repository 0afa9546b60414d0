use std::sync::Arc;

use glam::UVec2;
use snapshot_core::{HarnessContext, Scene};
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;

use crate::builder::AppConfig;
use crate::error::AppError;
use crate::graphics::GraphicsState;
use crate::state::ViewerState;

/// A platform window hosting one scene.
pub struct Window<S: Scene> {
    pub handle: Arc<winit::window::Window>,
    pub graphics: GraphicsState,
    pub state: ViewerState<S>,
}

impl<S: Scene> Window<S> {
    pub fn new(
        event_loop: &ActiveEventLoop,
        config: &AppConfig,
        scene: S,
        context: HarnessContext,
    ) -> Result<Self, AppError> {
        let attributes = winit::window::Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(PhysicalSize::new(config.width, config.height));
        let handle = event_loop.create_window(attributes).map_err(|e| {
            log::error!("Error initializing window: {e}");
            AppError::Initialization(e.to_string())
        })?;
        let handle = Arc::new(handle);

        let size = handle.inner_size();
        let graphics = pollster::block_on(GraphicsState::new(
            handle.clone(),
            size.width,
            size.height,
            config.samples,
            config.vsync,
        ))?;
        log::info!(
            "window '{}' created at {}x{} ({}x MSAA)",
            config.title,
            size.width,
            size.height,
            graphics.sample_count()
        );

        let state = ViewerState::new(
            scene,
            context,
            UVec2::new(size.width, size.height),
            config.mapper,
        );
        Ok(Self {
            handle,
            graphics,
            state,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.graphics.resize(width, height);
        self.state.process_resize(UVec2::new(width, height));
    }

    /// One update/render/present cycle.  `Ok(false)` when the scene asked
    /// to close.
    pub fn frame(&mut self) -> Result<bool, AppError> {
        if !self.state.update() {
            return Ok(false);
        }
        let frame = self.state.render();
        self.graphics.present(&frame)?;
        self.handle.request_redraw();
        Ok(true)
    }
}
