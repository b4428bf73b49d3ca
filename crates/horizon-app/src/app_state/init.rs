//! Window creation, GPU initialization, and particle seeding.

use std::path::Path;
use std::sync::Arc;

use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use horizon_common::{HorizonError, PlatformError, StartupFailure};
use horizon_platform::InputEvent;
use horizon_renderer::{
    seed_particles, FrameOrchestrator, GpuContext, GpuParticleBackend, Scene, PARTICLE_COUNT,
};

use crate::icon::load_icon;

use super::core::HorizonApp;

impl HorizonApp {
    /// Create the window, the GPU context, and the particle pipeline.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let window_config = &self.config.window;
        let mut attrs = WindowAttributes::default()
            .with_title(window_config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                window_config.width as f64,
                window_config.height as f64,
            ))
            .with_resizable(window_config.resizable);
        if let Some(icon) = load_icon(Path::new(&window_config.icon)) {
            attrs = attrs.with_window_icon(Some(icon));
        }

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail(
                    StartupFailure::WindowCreation,
                    PlatformError::Window(e.to_string()).into(),
                );
                return false;
            }
        };

        let gpu = match pollster::block_on(GpuContext::new(window.clone())) {
            Ok(gpu) => gpu,
            Err(e) => {
                self.fail(StartupFailure::Context, HorizonError::Renderer(e.to_string()));
                return false;
            }
        };
        let linear_target = gpu.format().is_srgb();

        // Shader and link failures land here too: without its kernels the
        // demo has nothing to run.
        let backend = match GpuParticleBackend::new(gpu) {
            Ok(backend) => backend,
            Err(e) => {
                self.fail(StartupFailure::Context, HorizonError::Renderer(e.to_string()));
                return false;
            }
        };

        let inner = window.inner_size();
        let (width, height) = (inner.width.max(1), inner.height.max(1));
        let scene = Scene::from_config(&self.config, width, height, linear_target);

        let simulation = &self.config.simulation;
        let particles = seed_particles(PARTICLE_COUNT as usize, simulation.limit, simulation.seed);
        tracing::info!(
            count = particles.len(),
            limit = simulation.limit,
            seed = ?simulation.seed,
            "Particles seeded"
        );
        let orchestrator = FrameOrchestrator::new(backend, particles);

        self.size = (width, height);
        self.scene = Some(scene);
        self.orchestrator = Some(orchestrator);
        self.window = Some(window);

        // The pointer starts at the window centre.
        let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);
        self.input.handle(InputEvent::PointerMoved { x: cx, y: cy });
        self.steer_attractor(cx, cy);

        tracing::info!(width, height, "Window and renderer initialized");
        true
    }

    /// Record a fatal startup failure. The exit code is derived from it
    /// once the event loop returns.
    pub(super) fn fail(&mut self, failure: StartupFailure, err: HorizonError) {
        tracing::error!("{failure}: {err}");
        eprintln!("horizon: {failure}: {err}");
        self.failure = Some(failure);
    }
}
