//! Window title management: shows the frame rate.

use super::core::HorizonApp;

/// Title with the frame rate appended to the configured prefix.
pub(super) fn fps_title(prefix: &str, fps: u32) -> String {
    format!("{prefix} - {fps} fps")
}

impl HorizonApp {
    pub(super) fn update_window_title(&self, fps: u32) {
        let Some(ref window) = self.window else {
            return;
        };
        window.set_title(&fps_title(&self.config.window.title, fps));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_config::HorizonConfig;

    #[test]
    fn title_appends_fps() {
        assert_eq!(
            fps_title("Horizon Transform Feedback", 60),
            "Horizon Transform Feedback - 60 fps"
        );
    }

    #[test]
    fn update_title_without_window_does_not_panic() {
        let app = HorizonApp::new(HorizonConfig::default());
        app.update_window_title(30);
    }
}
