//! Window configuration types.

use serde::{Deserialize, Serialize};

/// Initial window geometry, title, and icon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    /// Fixed title prefix; the frame rate is appended once per second.
    pub title: String,
    /// Window icon, relative to the working directory.
    pub icon: String,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 700,
            height: 700,
            title: "Horizon Transform Feedback".into(),
            icon: "./icon.png".into(),
            resizable: true,
        }
    }
}
