//! HorizonApp struct definition and constructor.

use std::sync::Arc;

use winit::window::Window;

use horizon_common::StartupFailure;
use horizon_config::HorizonConfig;
use horizon_platform::InputAdapter;
use horizon_renderer::{FrameClock, FrameOrchestrator, GpuParticleBackend, Scene};

/// Top-level application state.
pub struct HorizonApp {
    pub(super) config: HorizonConfig,
    pub(super) input: InputAdapter,
    pub(super) clock: FrameClock,

    // Windowing
    pub(super) window: Option<Arc<Window>>,
    /// Current drawable size in physical pixels.
    pub(super) size: (u32, u32),

    // Simulation
    pub(super) scene: Option<Scene>,
    pub(super) orchestrator: Option<FrameOrchestrator<GpuParticleBackend>>,

    /// Set when startup failed; decides the process exit code.
    pub(super) failure: Option<StartupFailure>,
}

impl HorizonApp {
    pub fn new(config: HorizonConfig) -> Self {
        let input = InputAdapter::new(&config.simulation, &config.keybinds);
        let size = (config.window.width, config.window.height);
        Self {
            config,
            input,
            clock: FrameClock::new(),
            window: None,
            size,
            scene: None,
            orchestrator: None,
            failure: None,
        }
    }

    /// The startup failure that ended the event loop, if any.
    pub fn failure(&self) -> Option<StartupFailure> {
        self.failure
    }
}
