//! Keyboard shortcut configuration types.

use serde::{Deserialize, Serialize};

/// Keys bound to the demo's two commands, using normalized key names
/// (`"Escape"`, `"Space"`, `"R"`, ...). Both fire on key release.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeybindConfig {
    pub quit: String,
    pub reset: String,
}

impl Default for KeybindConfig {
    fn default() -> Self {
        Self {
            quit: "Escape".into(),
            reset: "Space".into(),
        }
    }
}
