//! Per-redraw tick and frame-rate reporting.

use super::core::HorizonApp;

impl HorizonApp {
    /// Run one feedback + draw tick and refresh the title once per second.
    pub(super) fn render_frame(&mut self) {
        let (Some(orchestrator), Some(scene)) = (self.orchestrator.as_mut(), self.scene.as_mut())
        else {
            return;
        };

        let time_step = self.clock.time_step(self.config.simulation.time_scale);
        match orchestrator.tick(scene, time_step) {
            Ok(()) => {
                if let Some(fps) = self.clock.presented() {
                    tracing::debug!(fps, "Frame rate");
                    self.update_window_title(fps);
                }
            }
            Err(e) => tracing::warn!("Frame not presented: {e}"),
        }
    }
}
