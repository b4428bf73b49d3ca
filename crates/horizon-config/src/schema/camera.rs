//! Camera and projection configuration types.

use serde::{Deserialize, Serialize};

/// Projection parameters and initial view/model transform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub eye: [f32; 3],
    pub aim: [f32; 3],
    pub up: [f32; 3],
    pub translate: [f32; 3],
    /// Degrees added to the model rotation angles every frame.
    pub angle_step: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 60.0,
            near: 0.1,
            far: 100.0,
            eye: [0.0, 0.0, 2.0],
            aim: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            translate: [0.0, 0.0, -25.0],
            angle_step: [0.3, 0.2, 0.0],
        }
    }
}
