//! snapshot_core: input mapping, camera and scene primitives for the viewer.
//!
//! | Module     | Responsibility                                              |
//! |------------|-------------------------------------------------------------|
//! | `input`    | Button masks, `InputMapper`, `KeyboardHandler`              |
//! | `camera`   | `Camera` state and the `CameraControl` seam                 |
//! | `scene`    | `Scene` trait, scene-graph data, `VolatileScene` demo       |
//! | `settings` | Named setting store shared through `HarnessContext`         |
//! | `context`  | `HarnessContext` handed to the window at construction       |
//! | `time`     | Frame clock                                                 |
//! | `logging`  | `log` router, `NullLogWriter`, `LogChecker`                 |

pub mod camera;
pub mod color;
pub mod context;
pub mod input;
pub mod logging;
pub mod scene;
pub mod settings;
pub mod time;

pub use camera::{Camera, CameraControl, ResetKind};
pub use color::Color;
pub use context::HarnessContext;
pub use input::{
    AxisModifier, ButtonMask, InputMapper, KeyAction, KeyboardHandler, MapperSettings,
    PointerButton,
};
pub use scene::{Frame, Scene, VolatileScene};
pub use settings::{SettingStore, SettingValue, INPUT_FILES};
pub use time::{Time, TimeClock};

// re-export common input types so callers don't need to depend on winit
pub use winit::event::MouseButton;
pub use winit::keyboard::{KeyCode, ModifiersState};

pub use glam;
