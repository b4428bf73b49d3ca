pub mod gpu;
pub mod kernel;
pub mod matrix;
pub mod orchestrator;
pub mod particle_renderer;
pub mod particles;
pub mod perf;
pub mod scene;

pub use gpu::{GpuContext, RendererError};
pub use orchestrator::{CpuBackend, FrameOrchestrator, ParticleBackend, PingPong, TickPhase};
pub use particle_renderer::GpuParticleBackend;
pub use particles::{seed_particles, Particle, CUBE_SIZE, PARTICLE_COUNT};
pub use perf::{FpsCounter, FrameClock};
pub use scene::{Attractor, Camera, FrameParams, Scene};
