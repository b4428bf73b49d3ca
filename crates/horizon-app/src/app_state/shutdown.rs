//! Shutdown: release GPU resources before the window.

use super::core::HorizonApp;

impl HorizonApp {
    /// The particle buffers and surface go first; the surface renders to
    /// the window and must not outlive it.
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating shutdown");

        if let Some(orchestrator) = self.orchestrator.take() {
            tracing::debug!(ticks = orchestrator.ticks(), "Releasing particle buffers");
            drop(orchestrator);
        }
        self.scene = None;
        self.window = None;

        tracing::info!("GPU resources released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_config::HorizonConfig;

    #[test]
    fn shutdown_without_resources_is_idempotent() {
        let mut app = HorizonApp::new(HorizonConfig::default());
        app.shutdown();
        app.shutdown();
        assert!(app.window.is_none());
        assert!(app.orchestrator.is_none());
    }
}
