//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod camera;
mod keybind_config;
mod render;
mod simulation;
mod window;

pub use camera::*;
pub use keybind_config::*;
pub use render::*;
pub use simulation::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Horizon.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HorizonConfig {
    pub window: WindowConfig,
    pub simulation: SimulationConfig,
    pub camera: CameraConfig,
    pub render: RenderConfig,
    pub keybinds: KeybindConfig,
}
