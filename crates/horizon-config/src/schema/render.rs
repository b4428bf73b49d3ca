//! Particle drawing configuration types.

use serde::{Deserialize, Serialize};

/// Colors and opacity mode of the particle draw pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Framebuffer clear color (`#rrggbb`).
    pub background: String,
    /// Particle color (`#rrggbb`).
    pub particle_color: String,
    /// Modulate particle alpha by speed. The positional CLI argument
    /// overrides this when given.
    pub use_opacity: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: "#808080".into(),
            particle_color: "#d9d9d9".into(),
            use_opacity: false,
        }
    }
}
