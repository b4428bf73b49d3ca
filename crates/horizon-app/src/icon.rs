//! Window icon loading.

use std::path::Path;

use winit::window::Icon;

use horizon_renderer::gpu::decode_rgba;

/// Load `path` as a window icon. A missing or unreadable file is logged
/// and the window keeps the platform default.
pub fn load_icon(path: &Path) -> Option<Icon> {
    let image = match decode_rgba(path) {
        Ok(image) => image,
        Err(e) => {
            tracing::warn!("Window icon unavailable: {e}");
            return None;
        }
    };

    let (width, height) = image.dimensions();
    match Icon::from_rgba(image.into_raw(), width, height) {
        Ok(icon) => {
            tracing::debug!(path = %path.display(), width, height, "Window icon loaded");
            Some(icon)
        }
        Err(e) => {
            tracing::warn!("Invalid window icon {}: {e}", path.display());
            None
        }
    }
}
