//! Particle record and initial cloud.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Particles per cube edge.
pub const CUBE_SIZE: u32 = 100;

/// Total particle count, fixed at compile time.
pub const PARTICLE_COUNT: u32 = CUBE_SIZE * CUBE_SIZE * CUBE_SIZE;

/// Floats per particle record, as read by the feedback shader.
pub const FLOATS_PER_PARTICLE: usize = 7;

/// One particle as stored in both the feedback and vertex buffers.
///
/// Layout: position(vec3) + velocity(vec3) + distance(f32) = 28 bytes,
/// tightly packed. The compute shader reads it as `array<f32>` with a
/// stride of 7 because WGSL `vec3` would pad to 16 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Particle {
    pub position: [f32; 3],
    pub velocity: [f32; 3],
    /// Distance to the attractor computed by the last feedback pass.
    pub distance: f32,
}

impl Particle {
    pub fn at(position: [f32; 3]) -> Self {
        Self {
            position,
            velocity: [0.0; 3],
            distance: 0.0,
        }
    }

    /// wgpu vertex buffer layout for `Particle`.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Particle>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position: vec3<f32> at offset 0
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            },
            // velocity: vec3<f32> at offset 12
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 12,
                shader_location: 1,
            },
            // distance: f32 at offset 24
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32,
                offset: 24,
                shader_location: 2,
            },
        ],
    };
}

/// Generate `count` particles uniformly inside `[-limit, limit)³` with zero
/// velocity and distance.
///
/// A fixed `seed` reproduces the same cloud; `None` seeds from entropy.
pub fn seed_particles(count: usize, limit: f32, seed: Option<u64>) -> Vec<Particle> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    (0..count)
        .map(|_| {
            Particle::at([
                rng.gen_range(-limit..limit),
                rng.gen_range(-limit..limit),
                rng.gen_range(-limit..limit),
            ])
        })
        .collect()
}

/// Size in bytes of a buffer holding `count` particles.
pub fn buffer_size(count: usize) -> u64 {
    (count * std::mem::size_of::<Particle>()) as u64
}

// =============================================================================
// Tests
// =============================================================================
