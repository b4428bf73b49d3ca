//! Camera, attractor, and per-frame draw parameters.

use horizon_common::Color;
use horizon_config::HorizonConfig;

use crate::kernel::FeedbackParams;
use crate::matrix::{self, Mat4, Vec3};

/// View/model transform state.
///
/// Rotation angles are in degrees and advance by `angle_step` once per
/// rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub aim: Vec3,
    pub up: Vec3,
    pub translate: Vec3,
    pub angles: Vec3,
    pub angle_step: Vec3,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn from_config(config: &horizon_config::schema::CameraConfig) -> Self {
        Self {
            eye: config.eye,
            aim: config.aim,
            up: config.up,
            translate: config.translate,
            angles: [0.0; 3],
            angle_step: config.angle_step,
            fov: config.fov,
            near: config.near,
            far: config.far,
        }
    }

    pub fn advance(&mut self) {
        for (angle, step) in self.angles.iter_mut().zip(self.angle_step) {
            *angle += step;
        }
    }

    pub fn rotation(&self) -> Mat4 {
        matrix::rotation(self.angles)
    }

    pub fn view(&self) -> Mat4 {
        matrix::look_at(self.eye, self.aim, self.up)
    }

    pub fn model(&self) -> Mat4 {
        let [x, y, z] = self.translate;
        matrix::mul(&matrix::translate(x, y, z), &self.rotation())
    }

    /// Projection for a `width`×`height` viewport in wgpu clip space.
    pub fn projection(&self, width: u32, height: u32) -> Mat4 {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        let p = matrix::perspective(self.fov, aspect, self.near, self.far);
        matrix::mul(&matrix::DEPTH_REMAP, &p)
    }
}

/// The simulated point mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attractor {
    /// World-space position before the model rotation is applied.
    pub position: Vec3,
    /// Signed mass. Zero disables it; negative repels.
    pub mass: f32,
}

impl Default for Attractor {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            mass: 0.0,
        }
    }
}

/// Everything the render kernel needs for one draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    pub projection: Mat4,
    pub view: Mat4,
    pub model: Mat4,
    pub color: [f32; 4],
    pub use_opacity: bool,
    pub clear: wgpu::Color,
}

/// GPU-side uniform block matching the WGSL `Frame` struct.
///
/// Layout: 3 × mat4 + vec4 + u32 + padding = 224 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleUniforms {
    pub projection: [f32; 16],
    pub view: [f32; 16],
    pub model: [f32; 16],
    pub color: [f32; 4],
    pub use_opacity: u32,
    pub _padding: [u32; 3],
}

impl From<&FrameParams> for ParticleUniforms {
    fn from(f: &FrameParams) -> Self {
        Self {
            projection: f.projection,
            view: f.view,
            model: f.model,
            color: f.color,
            use_opacity: f.use_opacity as u32,
            _padding: [0; 3],
        }
    }
}

/// Mutable simulation state shared by the feedback and render passes.
#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: Camera,
    pub attractor: Attractor,
    pub projection: Mat4,
    pub limits: Vec3,
    pub use_opacity: bool,
    particle_color: [f32; 4],
    clear: wgpu::Color,
}

impl Scene {
    /// Build the initial scene.
    ///
    /// `linear_target` is true when the surface format is sRGB, in which
    /// case the configured colors are converted to linear so they display
    /// as written.
    pub fn from_config(
        config: &HorizonConfig,
        width: u32,
        height: u32,
        linear_target: bool,
    ) -> Self {
        let camera = Camera::from_config(&config.camera);
        let projection = camera.projection(width, height);
        let limit = config.simulation.limit;

        // Both colors were validated by horizon-config.
        let bg = Color::from_hex(&config.render.background)
            .unwrap_or(Color::from_rgba(128, 128, 128, 255));
        let fg = Color::from_hex(&config.render.particle_color)
            .unwrap_or(Color::from_rgba(217, 217, 217, 255));

        let [r, g, b, a] = to_target(bg.to_unit_rgba(), linear_target);
        let particle_color = to_target(fg.to_unit_rgba(), linear_target);

        Self {
            camera,
            attractor: Attractor::default(),
            projection,
            limits: [limit; 3],
            use_opacity: config.render.use_opacity,
            particle_color,
            clear: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: a as f64,
            },
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection = self.camera.projection(width, height);
    }

    pub fn clear_color(&self) -> wgpu::Color {
        self.clear
    }

    pub fn feedback_params(&self, time_step: f32, count: u32) -> FeedbackParams {
        FeedbackParams {
            rotation: self.camera.rotation(),
            attractor: self.attractor.position,
            mass: self.attractor.mass,
            limits: self.limits,
            time_step,
            count,
        }
    }

    pub fn frame_params(&self) -> FrameParams {
        FrameParams {
            projection: self.projection,
            view: self.camera.view(),
            model: self.camera.model(),
            color: self.particle_color,
            use_opacity: self.use_opacity,
            clear: self.clear,
        }
    }
}

fn to_target(rgba: [f32; 4], linear_target: bool) -> [f32; 4] {
    if !linear_target {
        return rgba;
    }
    let [r, g, b, a] = rgba;
    [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), a]
}

/// Convert an sRGB channel to linear (for sRGB surface formats).
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// =============================================================================
// Tests
// =============================================================================
