mod app_state;
mod cli;
mod icon;

use std::path::Path;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

use horizon_common::{PlatformError, StartupFailure};

const DEFAULT_LOG_DIRECTIVE: &str = "horizon=info";

fn init_logging(directive: Option<&str>) {
    let directive = directive.unwrap_or(DEFAULT_LOG_DIRECTIVE);
    let filter = EnvFilter::from_default_env();
    let filter = match directive.parse() {
        Ok(d) => filter.add_directive(d),
        Err(e) => {
            eprintln!("Ignoring invalid log level {directive:?}: {e}");
            match DEFAULT_LOG_DIRECTIVE.parse() {
                Ok(d) => filter.add_directive(d),
                Err(_) => filter,
            }
        }
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Log and print a fatal startup failure and turn it into the process exit
/// code.
fn startup_failed(failure: StartupFailure, err: PlatformError) -> ExitCode {
    tracing::error!("{failure}: {err}");
    eprintln!("horizon: {failure}: {err}");
    ExitCode::from(failure.code())
}

fn main() -> ExitCode {
    let args = cli::parse();

    init_logging(args.log_level.as_deref());

    tracing::info!("Horizon v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load config
    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {path}");
    }
    let mut config = horizon_config::load_config(args.config.as_deref().map(Path::new))
        .unwrap_or_else(|e| {
            tracing::warn!("Config load failed, using defaults: {e}");
            horizon_config::HorizonConfig::default()
        });
    if let Some(use_opacity) = args.opacity_override() {
        config.render.use_opacity = use_opacity;
    }
    tracing::info!(
        use_opacity = config.render.use_opacity,
        limit = config.simulation.limit,
        "Config loaded"
    );
    tracing::debug!("Effective config: {}", horizon_config::config_to_json(&config));

    if !horizon_renderer::gpu::decoders_available() {
        return startup_failed(
            StartupFailure::ImageSubsystem,
            PlatformError::ImageSubsystem("PNG and JPEG decoding are not compiled in".into()),
        );
    }

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            return startup_failed(
                StartupFailure::Windowing,
                PlatformError::EventLoop(e.to_string()),
            )
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = app_state::HorizonApp::new(config);

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        return startup_failed(
            StartupFailure::Windowing,
            PlatformError::EventLoop(e.to_string()),
        );
    }

    match app.failure() {
        Some(failure) => ExitCode::from(failure.code()),
        None => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
    }
}
