//! Feedback kernel parameters and host-side mirror.
//!
//! `shaders/feedback.wgsl` advances every particle once per tick. The
//! functions here perform the same arithmetic on the CPU so the update rule
//! can be checked without a GPU, and back the CPU particle backend.

use crate::matrix::{self, Mat4, Vec3};
use crate::particles::Particle;

/// Gravitational constant used by the kernel.
pub const GRAVITY: f32 = 6.67384e-11;

/// Mass assigned to every particle.
pub const PARTICLE_MASS: f32 = 1000.0;

/// Velocity averaging factor between the old and new velocity.
pub const VELOCITY_BLEND: f32 = 0.475;

/// Velocity kept by a particle that wraps around the bounding cube.
pub const WRAP_DAMPING: f32 = 0.1;

/// Compute workgroup size declared in `feedback.wgsl`.
pub const WORKGROUP_SIZE: u32 = 256;

/// Inputs of one feedback pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackParams {
    /// Rotation applied to the attractor, `rotation(angles)`.
    pub rotation: Mat4,
    pub attractor: Vec3,
    pub mass: f32,
    /// Half-extent of the bounding cube per axis.
    pub limits: Vec3,
    pub time_step: f32,
    pub count: u32,
}

impl FeedbackParams {
    /// Number of workgroups needed to cover `count` particles.
    pub fn workgroups(&self) -> u32 {
        self.count.div_ceil(WORKGROUP_SIZE)
    }
}

/// GPU-side uniform block matching the WGSL `Feedback` struct.
///
/// Layout: mat4 + 2 × vec4 + u32 + padding = 112 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FeedbackUniforms {
    pub rotation: [f32; 16],
    /// xyz = attractor position, w = attractor mass.
    pub attractor: [f32; 4],
    /// xyz = limits, w = time step.
    pub limits: [f32; 4],
    pub count: u32,
    pub _padding: [u32; 3],
}

impl From<&FeedbackParams> for FeedbackUniforms {
    fn from(p: &FeedbackParams) -> Self {
        Self {
            rotation: p.rotation,
            attractor: [p.attractor[0], p.attractor[1], p.attractor[2], p.mass],
            limits: [p.limits[0], p.limits[1], p.limits[2], p.time_step],
            count: p.count,
            _padding: [0; 3],
        }
    }
}

/// Advance one particle by one tick.
///
/// A particle at the attractor (`distance == 0`) yields NaN components,
/// exactly as the shader does.
pub fn feedback(particle: &Particle, params: &FeedbackParams) -> Particle {
    let attractor = matrix::transform_point(&params.rotation, params.attractor);
    let delta = matrix::sub(attractor, particle.position);
    let dist = matrix::length(delta);
    let dir = matrix::normalize(delta);
    let k = GRAVITY * PARTICLE_MASS * params.mass;
    let d = dist * dist;

    let mut position = [0.0f32; 3];
    let mut velocity = [0.0f32; 3];
    for i in 0..3 {
        let force = k * dir[i] / d;
        let v_new = PARTICLE_MASS * force + particle.velocity[i];
        velocity[i] = VELOCITY_BLEND * (particle.velocity[i] + v_new);
        position[i] = particle.position[i] + velocity[i] * params.time_step;
    }

    let limits = params.limits;
    let outside = (0..3).any(|i| position[i] <= -limits[i] || position[i] >= limits[i]);
    if outside {
        for i in 0..3 {
            velocity[i] *= WRAP_DAMPING;
            if position[i] <= -limits[i] {
                position[i] = limits[i];
            } else if position[i] >= limits[i] {
                position[i] = -limits[i];
            }
        }
    }

    Particle {
        position,
        velocity,
        distance: dist,
    }
}

/// Run [`feedback`] over `input`, writing into `output`.
pub fn feedback_all(input: &[Particle], output: &mut [Particle], params: &FeedbackParams) {
    let n = (params.count as usize).min(input.len()).min(output.len());
    for (dst, src) in output[..n].iter_mut().zip(&input[..n]) {
        *dst = feedback(src, params);
    }
}

// =============================================================================
// Tests
// =============================================================================
