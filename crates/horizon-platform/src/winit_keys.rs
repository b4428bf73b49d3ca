//! Winit key name normalization.
//!
//! The app formats winit's logical key as a string (`"Escape"`, `" "`,
//! `"r"`); this converts it to the names used in `[keybinds]`.

/// Convert a winit key name to the normalized keybind name.
pub fn normalize_winit_key(key: &str) -> String {
    match key {
        " " => "Space".to_string(),
        "ArrowUp" => "Up".to_string(),
        "ArrowDown" => "Down".to_string(),
        "ArrowLeft" => "Left".to_string(),
        "ArrowRight" => "Right".to_string(),
        // Single characters compare case-insensitively.
        _ if key.chars().count() == 1 => key.to_uppercase(),
        // Named keys (Escape, Enter, F1, ...) pass through.
        _ => key.to_string(),
    }
}

/// Whether a normalized key name matches a configured binding.
pub fn matches_binding(normalized: &str, binding: &str) -> bool {
    normalized.eq_ignore_ascii_case(binding.trim())
}
