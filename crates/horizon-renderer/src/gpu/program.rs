//! Linking compiled shaders into pipelines.
//!
//! A [`ProgramBuilder`] collects stages first, then the bind-group layouts
//! that declare the program's inputs and captured outputs, and finally
//! links. Linking runs inside a validation error scope so a mismatch
//! between stages and layouts comes back as [`ShaderError::Link`].

use super::shader::{CompiledShader, DiagnosticLog, ShaderError, ShaderStage};

/// Fixed-function state of a render program.
pub struct RenderTarget<'a> {
    pub format: wgpu::TextureFormat,
    pub vertex_buffers: &'a [wgpu::VertexBufferLayout<'a>],
    pub topology: wgpu::PrimitiveTopology,
    pub blend: Option<wgpu::BlendState>,
}

pub struct ProgramBuilder<'a> {
    label: &'a str,
    stages: Vec<&'a CompiledShader>,
    layouts: Vec<&'a wgpu::BindGroupLayout>,
}

impl<'a> ProgramBuilder<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            stages: Vec::new(),
            layouts: Vec::new(),
        }
    }

    pub fn attach(mut self, shader: &'a CompiledShader) -> Self {
        self.stages.push(shader);
        self
    }

    /// Add the layout for the next bind-group index.
    pub fn bind_group_layout(mut self, layout: &'a wgpu::BindGroupLayout) -> Self {
        self.layouts.push(layout);
        self
    }

    fn stage(&self, stage: ShaderStage) -> Option<&'a CompiledShader> {
        self.stages.iter().copied().find(|s| s.stage == stage)
    }

    fn stage_kinds(&self) -> Vec<ShaderStage> {
        self.stages.iter().map(|s| s.stage).collect()
    }

    fn pipeline_layout(&self, device: &wgpu::Device) -> wgpu::PipelineLayout {
        device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(self.label),
            bind_group_layouts: &self.layouts,
            push_constant_ranges: &[],
        })
    }

    /// Link a compute program from exactly one compute stage.
    pub fn link_compute(
        self,
        device: &wgpu::Device,
    ) -> Result<wgpu::ComputePipeline, ShaderError> {
        check_stages(self.label, &self.stage_kinds(), ProgramKind::Compute)?;
        let Some(shader) = self.stage(ShaderStage::Compute) else {
            return Err(link_error(self.label, "no compute stage attached"));
        };

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let layout = self.pipeline_layout(device);
        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some(self.label),
            layout: Some(&layout),
            module: &shader.module,
            entry_point: Some(shader.entry_point.as_str()),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            cache: None,
        });
        finish_link(device, self.label)?;
        Ok(pipeline)
    }

    /// Link a render program from a vertex stage and an optional fragment
    /// stage.
    pub fn link_render(
        self,
        device: &wgpu::Device,
        target: &RenderTarget<'_>,
    ) -> Result<wgpu::RenderPipeline, ShaderError> {
        check_stages(self.label, &self.stage_kinds(), ProgramKind::Render)?;
        let Some(vertex) = self.stage(ShaderStage::Vertex) else {
            return Err(link_error(self.label, "no vertex stage attached"));
        };
        let fragment = self.stage(ShaderStage::Fragment);
        let targets = [Some(wgpu::ColorTargetState {
            format: target.format,
            blend: target.blend,
            write_mask: wgpu::ColorWrites::ALL,
        })];

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let layout = self.pipeline_layout(device);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(self.label),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &vertex.module,
                entry_point: Some(vertex.entry_point.as_str()),
                buffers: target.vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: fragment.map(|fs| wgpu::FragmentState {
                module: &fs.module,
                entry_point: Some(fs.entry_point.as_str()),
                targets: &targets,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: target.topology,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });
        finish_link(device, self.label)?;
        Ok(pipeline)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProgramKind {
    Compute,
    Render,
}

/// Check that the attached stages form a linkable program.
fn check_stages(
    label: &str,
    stages: &[ShaderStage],
    kind: ProgramKind,
) -> Result<(), ShaderError> {
    let count = |stage: ShaderStage| stages.iter().filter(|s| **s == stage).count();
    let (vertex, fragment, compute) = (
        count(ShaderStage::Vertex),
        count(ShaderStage::Fragment),
        count(ShaderStage::Compute),
    );

    let problem = match kind {
        ProgramKind::Compute if compute != 1 => Some("expected exactly one compute stage"),
        ProgramKind::Compute if vertex + fragment > 0 => {
            Some("graphics stages attached to a compute program")
        }
        ProgramKind::Render if vertex != 1 => Some("expected exactly one vertex stage"),
        ProgramKind::Render if fragment > 1 => Some("more than one fragment stage"),
        ProgramKind::Render if compute > 0 => {
            Some("compute stage attached to a render program")
        }
        _ => None,
    };

    match problem {
        Some(msg) => Err(link_error(label, msg)),
        None => Ok(()),
    }
}

fn link_error(label: &str, msg: &str) -> ShaderError {
    let err = ShaderError::Link {
        label: label.to_string(),
        log: DiagnosticLog::new(msg),
    };
    tracing::error!("Program link failed: {err}");
    err
}

/// Pop the link error scope. The partially created pipeline is dropped by
/// the caller when this fails.
fn finish_link(device: &wgpu::Device, label: &str) -> Result<(), ShaderError> {
    match pollster::block_on(device.pop_error_scope()) {
        Some(err) => Err(link_error(label, &err.to_string())),
        None => {
            tracing::debug!(label, "Program linked");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::ShaderStage::{Compute, Fragment, Vertex};

    #[test]
    fn compute_program_needs_one_compute_stage() {
        assert!(check_stages("fb", &[Compute], ProgramKind::Compute).is_ok());
        assert!(check_stages("fb", &[], ProgramKind::Compute).is_err());
        assert!(check_stages("fb", &[Compute, Compute], ProgramKind::Compute).is_err());
        assert!(check_stages("fb", &[Compute, Vertex], ProgramKind::Compute).is_err());
    }

    #[test]
    fn render_program_takes_vertex_and_optional_fragment() {
        assert!(check_stages("draw", &[Vertex], ProgramKind::Render).is_ok());
        assert!(check_stages("draw", &[Vertex, Fragment], ProgramKind::Render).is_ok());
        assert!(check_stages("draw", &[Fragment], ProgramKind::Render).is_err());
        assert!(check_stages("draw", &[Vertex, Compute], ProgramKind::Render).is_err());
    }

    #[test]
    fn link_error_carries_label_and_log() {
        let err = check_stages("draw", &[Fragment], ProgramKind::Render).unwrap_err();
        assert_eq!(
            err.to_string(),
            "draw: link failed: expected exactly one vertex stage"
        );
        assert!(!err.log().is_empty());
    }
}
