//! Frame orchestration over a ping-pong particle buffer pair.
//!
//! One [`FrameOrchestrator::tick`] runs the feedback kernel from the
//! current buffer into the next, swaps the roles, advances the camera and
//! draws the freshly written buffer. The next tick's feedback therefore
//! reads what this tick's feedback wrote.
//!
//! The orchestrator is generic over [`ParticleBackend`] so the same
//! ordering drives the wgpu backend at runtime and [`CpuBackend`] in tests.

mod cpu;
mod ping_pong;

#[cfg(test)]
mod tests;

pub use cpu::{CpuBackend, CpuBuffer};
pub use ping_pong::PingPong;

use crate::gpu::RendererError;
use crate::kernel::FeedbackParams;
use crate::particles::Particle;
use crate::scene::{FrameParams, Scene};

/// Where a tick currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickPhase {
    Idle,
    Feedback,
    Render,
    Presented,
}

/// Storage and kernels for the particle pair.
pub trait ParticleBackend {
    type Buffer;

    /// Allocate a buffer for `count` particles, filled from `particles` or
    /// zeroed.
    fn create_buffer(
        &mut self,
        label: &str,
        count: u32,
        particles: Option<&[Particle]>,
    ) -> Self::Buffer;

    fn write_particles(&mut self, buffer: &mut Self::Buffer, particles: &[Particle]);

    fn clear(&mut self, buffer: &mut Self::Buffer);

    /// Run the feedback kernel, reading `input` and capturing into `output`.
    fn run_feedback(
        &mut self,
        input: &Self::Buffer,
        output: &mut Self::Buffer,
        params: &FeedbackParams,
    );

    /// Clear the target, draw `count` particles from `source`, and present.
    fn draw(
        &mut self,
        source: &Self::Buffer,
        frame: &FrameParams,
        count: u32,
    ) -> Result<(), RendererError>;
}

/// Owns the buffer pair and sequences each tick.
pub struct FrameOrchestrator<B: ParticleBackend> {
    backend: B,
    buffers: PingPong<B::Buffer>,
    initial: Vec<Particle>,
    count: u32,
    phase: TickPhase,
    last_capture: Option<usize>,
    ticks: u64,
}

impl<B: ParticleBackend> FrameOrchestrator<B> {
    /// Upload `initial` into the first slot and allocate a zeroed second
    /// slot of the same size.
    pub fn new(mut backend: B, initial: Vec<Particle>) -> Self {
        let count = initial.len() as u32;
        let current = backend.create_buffer("particles a", count, Some(&initial));
        let next = backend.create_buffer("particles b", count, None);
        tracing::info!(particles = count, "Particle buffers allocated");

        Self {
            backend,
            buffers: PingPong::new(current, next),
            initial,
            count,
            phase: TickPhase::Idle,
            last_capture: None,
            ticks: 0,
        }
    }

    fn enter(&mut self, phase: TickPhase) {
        tracing::trace!(?phase, tick = self.ticks, "Tick phase");
        self.phase = phase;
    }

    /// Run one feedback + render + present cycle.
    ///
    /// `time_step` scales the integrated velocity. A draw failure still
    /// leaves the roles swapped, since the capture was already recorded.
    pub fn tick(&mut self, scene: &mut Scene, time_step: f32) -> Result<(), RendererError> {
        self.enter(TickPhase::Feedback);
        let params = scene.feedback_params(time_step, self.count);
        let (current, next) = self.buffers.split_mut();
        self.backend.run_feedback(current, next, &params);
        self.last_capture = Some(self.buffers.next_index());
        self.buffers.swap();

        self.enter(TickPhase::Render);
        scene.camera.advance();
        let frame = scene.frame_params();
        let drawn = self.backend.draw(self.buffers.current(), &frame, self.count);
        self.ticks += 1;

        if drawn.is_ok() {
            self.enter(TickPhase::Presented);
        }
        self.enter(TickPhase::Idle);
        drawn
    }

    /// Restore the initial cloud into the current slot, zero the other
    /// slot, and switch the attractor off.
    pub fn reset(&mut self, scene: &mut Scene) {
        let (current, next) = self.buffers.split_mut();
        self.backend.write_particles(current, &self.initial);
        self.backend.clear(next);
        scene.attractor.mass = 0.0;
        tracing::info!("Particles reset");
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn buffers(&self) -> &PingPong<B::Buffer> {
        &self.buffers
    }

    /// Slot index that received the most recent feedback capture.
    pub fn last_capture(&self) -> Option<usize> {
        self.last_capture
    }

    pub fn phase(&self) -> TickPhase {
        self.phase
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
