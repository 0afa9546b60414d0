//! Ventana, despacho de eventos y presentación para el visor Snapshot.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use snapshot_app::{App, HarnessContext, VolatileScene};
//!
//! fn main() -> Result<(), snapshot_app::AppError> {
//!     App::new(VolatileScene::default())
//!         .with_title("Viewer")
//!         .with_context(HarnessContext::with_input_files(vec!["scan.ply".into()]))
//!         .run()
//! }
//! ```

pub mod builder;
pub mod error;
mod graphics;
mod runner;
pub mod state;
pub mod window;

pub use builder::{App, AppConfig};
pub use error::{AppError, ConfigError};
pub use state::ViewerState;
pub use window::Window;

// ── Re-export the most-used snapshot_core primitives ───────────────────────
pub use snapshot_core::{
    Camera, Color, HarnessContext, KeyCode, MapperSettings, MouseButton, Scene, Time,
    VolatileScene,
};
