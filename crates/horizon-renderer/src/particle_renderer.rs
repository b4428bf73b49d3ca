//! wgpu implementation of [`ParticleBackend`].
//!
//! The feedback kernel runs as a compute pass reading one particle buffer
//! as read-only storage and writing the other; a compute pass never
//! rasterizes, so no pixels are produced. The same buffers are bound as
//! vertex buffers for the point-list draw. All work of a tick is recorded
//! into one command encoder and submitted right before presenting.

use crate::gpu::{
    compile_shader, BufferUsageHint, ErrorProbe, GpuBuffer, GpuContext, ProgramBuilder,
    RenderTarget, RendererError, ShaderDesc, ShaderStage,
};
use crate::kernel::{FeedbackParams, FeedbackUniforms};
use crate::orchestrator::ParticleBackend;
use crate::particles::{buffer_size, Particle};
use crate::scene::{FrameParams, ParticleUniforms};

const FEEDBACK_WGSL: &str = include_str!("../shaders/feedback.wgsl");
const PARTICLE_VERTEX_WGSL: &str = include_str!("../shaders/particle_vertex.wgsl");
const PARTICLE_FRAGMENT_WGSL: &str = include_str!("../shaders/particle_fragment.wgsl");

/// A particle buffer on the device.
#[derive(Debug)]
pub struct ParticleBuffer {
    buffer: GpuBuffer,
}

impl ParticleBuffer {
    pub fn raw(&self) -> &wgpu::Buffer {
        self.buffer.raw()
    }
}

/// Pipelines, uniforms and the surface used to simulate and draw particles.
pub struct GpuParticleBackend {
    gpu: GpuContext,
    feedback_pipeline: wgpu::ComputePipeline,
    feedback_layout: wgpu::BindGroupLayout,
    feedback_uniforms: GpuBuffer,
    draw_pipeline: wgpu::RenderPipeline,
    frame_uniforms: GpuBuffer,
    frame_bind_group: wgpu::BindGroup,
    /// Encoder holding the feedback pass until the draw submits it.
    pending: Option<wgpu::CommandEncoder>,
}

impl GpuParticleBackend {
    /// Compile and link both programs against `gpu`.
    ///
    /// Any shader or link failure is returned; the demo cannot run without
    /// its kernels.
    pub fn new(gpu: GpuContext) -> Result<Self, RendererError> {
        let device = &gpu.device;
        let probe = ErrorProbe::begin(device);

        let feedback_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("feedback bind group layout"),
            entries: &[
                uniform_entry::<FeedbackUniforms>(0, wgpu::ShaderStages::COMPUTE),
                storage_entry(1, true),
                storage_entry(2, false),
            ],
        });
        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("particle frame bind group layout"),
            entries: &[uniform_entry::<ParticleUniforms>(
                0,
                wgpu::ShaderStages::VERTEX_FRAGMENT,
            )],
        });

        let feedback_uniforms = GpuBuffer::new(
            device,
            "feedback uniforms",
            std::mem::size_of::<FeedbackUniforms>() as u64,
            None,
            BufferUsageHint::Uniform,
        );
        let frame_uniforms = GpuBuffer::new(
            device,
            "particle frame uniforms",
            std::mem::size_of::<ParticleUniforms>() as u64,
            None,
            BufferUsageHint::Uniform,
        );
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("particle frame bind group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_uniforms.raw().as_entire_binding(),
            }],
        });
        probe.end(device, "particle backend resources");

        let feedback_shader = compile_shader(
            device,
            &ShaderDesc {
                label: "feedback kernel",
                source: FEEDBACK_WGSL,
                stage: ShaderStage::Compute,
            },
        )?;
        let vertex_shader = compile_shader(
            device,
            &ShaderDesc {
                label: "particle vertex",
                source: PARTICLE_VERTEX_WGSL,
                stage: ShaderStage::Vertex,
            },
        )?;
        let fragment_shader = compile_shader(
            device,
            &ShaderDesc {
                label: "particle fragment",
                source: PARTICLE_FRAGMENT_WGSL,
                stage: ShaderStage::Fragment,
            },
        )?;

        let feedback_pipeline = ProgramBuilder::new("feedback program")
            .attach(&feedback_shader)
            .bind_group_layout(&feedback_layout)
            .link_compute(device)?;

        let draw_pipeline = ProgramBuilder::new("particle program")
            .attach(&vertex_shader)
            .attach(&fragment_shader)
            .bind_group_layout(&frame_layout)
            .link_render(
                device,
                &RenderTarget {
                    format: gpu.format(),
                    vertex_buffers: &[Particle::LAYOUT],
                    topology: wgpu::PrimitiveTopology::PointList,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                },
            )?;

        Ok(Self {
            gpu,
            feedback_pipeline,
            feedback_layout,
            feedback_uniforms,
            draw_pipeline,
            frame_uniforms,
            frame_bind_group,
            pending: None,
        })
    }

    pub fn gpu(&self) -> &GpuContext {
        &self.gpu
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.gpu.format()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
    }

    /// Submit any recorded feedback work without drawing.
    fn flush(&mut self) {
        if let Some(encoder) = self.pending.take() {
            self.gpu.queue.submit(std::iter::once(encoder.finish()));
        }
    }
}

impl ParticleBackend for GpuParticleBackend {
    type Buffer = ParticleBuffer;

    fn create_buffer(
        &mut self,
        label: &str,
        count: u32,
        particles: Option<&[Particle]>,
    ) -> ParticleBuffer {
        let probe = ErrorProbe::begin(&self.gpu.device);
        let buffer = GpuBuffer::new(
            &self.gpu.device,
            label,
            buffer_size(count as usize),
            particles.map(bytemuck::cast_slice::<Particle, u8>),
            BufferUsageHint::DynamicCopy,
        );
        probe.end(&self.gpu.device, label);
        ParticleBuffer { buffer }
    }

    fn write_particles(&mut self, buffer: &mut ParticleBuffer, particles: &[Particle]) {
        let size = buffer.buffer.size();
        buffer.buffer.update(
            &self.gpu.device,
            &self.gpu.queue,
            size,
            Some(bytemuck::cast_slice(particles)),
        );
    }

    fn clear(&mut self, buffer: &mut ParticleBuffer) {
        let size = buffer.buffer.size();
        buffer
            .buffer
            .update(&self.gpu.device, &self.gpu.queue, size, None);
    }

    fn run_feedback(
        &mut self,
        input: &ParticleBuffer,
        output: &mut ParticleBuffer,
        params: &FeedbackParams,
    ) {
        let uniforms = FeedbackUniforms::from(params);
        self.gpu.queue.write_buffer(
            self.feedback_uniforms.raw(),
            0,
            bytemuck::bytes_of(&uniforms),
        );

        let bind_group = self
            .gpu
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("feedback bind group"),
                layout: &self.feedback_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: self.feedback_uniforms.raw().as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: input.raw().as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: output.raw().as_entire_binding(),
                    },
                ],
            });

        let encoder = tick_encoder(&mut self.pending, &self.gpu.device);
        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("feedback pass"),
            timestamp_writes: None,
        });
        pass.set_pipeline(&self.feedback_pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        pass.dispatch_workgroups(params.workgroups(), 1, 1);
    }

    fn draw(
        &mut self,
        source: &ParticleBuffer,
        frame: &FrameParams,
        count: u32,
    ) -> Result<(), RendererError> {
        let output = match self.gpu.current_texture() {
            Ok(t) => t,
            Err(e) => {
                // Keep the feedback capture even though nothing is drawn.
                self.flush();
                if matches!(e, wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) {
                    self.gpu.reconfigure();
                }
                return Err(e.into());
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let uniforms = ParticleUniforms::from(frame);
        self.gpu
            .queue
            .write_buffer(self.frame_uniforms.raw(), 0, bytemuck::bytes_of(&uniforms));

        let encoder = tick_encoder(&mut self.pending, &self.gpu.device);
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("particle pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(frame.clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&self.draw_pipeline);
            pass.set_bind_group(0, &self.frame_bind_group, &[]);
            pass.set_vertex_buffer(0, source.raw().slice(..));
            pass.draw(0..count, 0..1);
        }

        self.flush();
        output.present();
        log_first_frame(self.gpu.size.width, self.gpu.size.height, self.gpu.format());
        Ok(())
    }
}

/// The encoder of the current tick, created on first use.
fn tick_encoder<'a>(
    pending: &'a mut Option<wgpu::CommandEncoder>,
    device: &wgpu::Device,
) -> &'a mut wgpu::CommandEncoder {
    pending.get_or_insert_with(|| {
        device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("horizon tick encoder"),
        })
    })
}

fn uniform_entry<T>(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: std::num::NonZeroU64::new(std::mem::size_of::<T>() as u64),
        },
        count: None,
    }
}

fn storage_entry(binding: u32, read_only: bool) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only },
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

/// Log the first frame presentation (once only).
fn log_first_frame(width: u32, height: u32, format: wgpu::TextureFormat) {
    static PRESENTED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);
    if !PRESENTED.swap(true, std::sync::atomic::Ordering::Relaxed) {
        tracing::info!(
            "First frame presented ({}x{}, format={:?})",
            width,
            height,
            format,
        );
    }
}
