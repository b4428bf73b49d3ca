use crate::gpu::RendererError;
use crate::kernel::{self, FeedbackParams};
use crate::particles::Particle;
use crate::scene::FrameParams;

use super::ParticleBackend;

/// Host-memory particle buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuBuffer {
    pub id: usize,
    pub particles: Vec<Particle>,
}

/// Backend that runs the kernel mirror on the host and records what it was
/// asked to do.
#[derive(Debug, Default)]
pub struct CpuBackend {
    next_id: usize,
    /// Buffer ids that received a feedback capture, in order.
    pub captures: Vec<usize>,
    /// Buffer ids that were drawn, in order.
    pub draws: Vec<usize>,
    pub last_frame: Option<FrameParams>,
    pub last_params: Option<FeedbackParams>,
}

impl CpuBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ParticleBackend for CpuBackend {
    type Buffer = CpuBuffer;

    fn create_buffer(
        &mut self,
        _label: &str,
        count: u32,
        particles: Option<&[Particle]>,
    ) -> CpuBuffer {
        let id = self.next_id;
        self.next_id += 1;
        let mut buffer = CpuBuffer {
            id,
            particles: vec![Particle::at([0.0; 3]); count as usize],
        };
        if let Some(particles) = particles {
            self.write_particles(&mut buffer, particles);
        }
        buffer
    }

    fn write_particles(&mut self, buffer: &mut CpuBuffer, particles: &[Particle]) {
        let n = buffer.particles.len().min(particles.len());
        buffer.particles[..n].copy_from_slice(&particles[..n]);
    }

    fn clear(&mut self, buffer: &mut CpuBuffer) {
        buffer.particles.fill(Particle::at([0.0; 3]));
    }

    fn run_feedback(
        &mut self,
        input: &CpuBuffer,
        output: &mut CpuBuffer,
        params: &FeedbackParams,
    ) {
        kernel::feedback_all(&input.particles, &mut output.particles, params);
        self.captures.push(output.id);
        self.last_params = Some(*params);
    }

    fn draw(
        &mut self,
        source: &CpuBuffer,
        frame: &FrameParams,
        _count: u32,
    ) -> Result<(), RendererError> {
        self.draws.push(source.id);
        self.last_frame = Some(*frame);
        Ok(())
    }
}
