//! WGSL shader compilation with bounded diagnostics.
//!
//! Sources are parsed and validated with naga before wgpu sees them, so a
//! broken shader is reported as a [`ShaderError`] carrying a readable log
//! instead of surfacing later as an uncaptured device error.

use std::fmt;

/// Longest diagnostic kept from a failed compile or link.
pub const MAX_LOG_LEN: usize = 1023;

/// Pipeline stage a shader module is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Compute,
}

impl ShaderStage {
    fn to_naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
            ShaderStage::Compute => naga::ShaderStage::Compute,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
            ShaderStage::Compute => "compute",
        };
        f.write_str(name)
    }
}

/// Source and stage of one shader.
#[derive(Debug, Clone, Copy)]
pub struct ShaderDesc<'a> {
    pub label: &'a str,
    pub source: &'a str,
    pub stage: ShaderStage,
}

/// Compiler or linker output, truncated to [`MAX_LOG_LEN`] bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticLog(String);

impl DiagnosticLog {
    pub fn new(text: impl Into<String>) -> Self {
        let mut text = text.into();
        if text.len() > MAX_LOG_LEN {
            let mut end = MAX_LOG_LEN;
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            text.truncate(end);
        }
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DiagnosticLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a shader or program is unavailable.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("{label}: parse failed: {log}")]
    Parse { label: String, log: DiagnosticLog },

    #[error("{label}: validation failed: {log}")]
    Validation { label: String, log: DiagnosticLog },

    #[error("{label}: no {stage} entry point")]
    MissingEntryPoint { label: String, stage: ShaderStage },

    #[error("{label}: link failed: {log}")]
    Link { label: String, log: DiagnosticLog },
}

impl ShaderError {
    /// The diagnostic text, empty for errors that carry none.
    pub fn log(&self) -> &str {
        match self {
            ShaderError::Parse { log, .. }
            | ShaderError::Validation { log, .. }
            | ShaderError::Link { log, .. } => log.as_str(),
            ShaderError::MissingEntryPoint { .. } => "",
        }
    }
}

/// A validated shader module ready to be attached to a program.
#[derive(Debug)]
pub struct CompiledShader {
    pub label: String,
    pub stage: ShaderStage,
    pub entry_point: String,
    pub module: wgpu::ShaderModule,
}

/// Parse and validate WGSL, returning the name of the first entry point
/// for the requested stage.
pub fn validate_wgsl(desc: &ShaderDesc<'_>) -> Result<String, ShaderError> {
    let module = naga::front::wgsl::parse_str(desc.source).map_err(|e| ShaderError::Parse {
        label: desc.label.to_string(),
        log: DiagnosticLog::new(e.emit_to_string(desc.source)),
    })?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|e| ShaderError::Validation {
        label: desc.label.to_string(),
        log: DiagnosticLog::new(e.as_inner().to_string()),
    })?;

    let stage = desc.stage.to_naga();
    module
        .entry_points
        .iter()
        .find(|ep| ep.stage == stage)
        .map(|ep| ep.name.clone())
        .ok_or_else(|| ShaderError::MissingEntryPoint {
            label: desc.label.to_string(),
            stage: desc.stage,
        })
}

/// Compile a shader for `desc.stage`.
///
/// Failures are logged with their diagnostic and returned; the caller
/// treats the shader as unavailable.
pub fn compile_shader(
    device: &wgpu::Device,
    desc: &ShaderDesc<'_>,
) -> Result<CompiledShader, ShaderError> {
    let entry_point = validate_wgsl(desc).inspect_err(|e| {
        tracing::error!("Shader compile failed: {e}");
    })?;

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(desc.label),
        source: wgpu::ShaderSource::Wgsl(desc.source.into()),
    });
    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        let err = ShaderError::Validation {
            label: desc.label.to_string(),
            log: DiagnosticLog::new(err.to_string()),
        };
        tracing::error!("Shader compile failed: {err}");
        return Err(err);
    }

    tracing::debug!(
        label = desc.label,
        stage = %desc.stage,
        entry_point = %entry_point,
        "Shader compiled"
    );
    Ok(CompiledShader {
        label: desc.label.to_string(),
        stage: desc.stage,
        entry_point,
        module,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(source: &str, stage: ShaderStage) -> ShaderDesc<'_> {
        ShaderDesc {
            label: "test",
            source,
            stage,
        }
    }

    #[test]
    fn shipped_feedback_shader_validates() {
        let source = include_str!("../../shaders/feedback.wgsl");
        let entry = validate_wgsl(&desc(source, ShaderStage::Compute)).unwrap();
        assert_eq!(entry, "main");
    }

    #[test]
    fn shipped_particle_shaders_validate() {
        let vs = include_str!("../../shaders/particle_vertex.wgsl");
        let fs = include_str!("../../shaders/particle_fragment.wgsl");
        assert_eq!(
            validate_wgsl(&desc(vs, ShaderStage::Vertex)).unwrap(),
            "vs_main"
        );
        assert_eq!(
            validate_wgsl(&desc(fs, ShaderStage::Fragment)).unwrap(),
            "fs_main"
        );
    }

    #[test]
    fn syntax_error_yields_parse_log() {
        let err = validate_wgsl(&desc("fn main( {", ShaderStage::Compute)).unwrap_err();
        assert!(matches!(err, ShaderError::Parse { .. }));
        assert!(!err.log().is_empty());
    }

    #[test]
    fn type_error_yields_diagnostic() {
        let source = "@compute @workgroup_size(1) fn main() { let x: f32 = 1u; }";
        let err = validate_wgsl(&desc(source, ShaderStage::Compute)).unwrap_err();
        assert!(!err.log().is_empty());
    }

    #[test]
    fn wrong_stage_is_missing_entry_point() {
        let source = "@compute @workgroup_size(1) fn main() {}";
        let err = validate_wgsl(&desc(source, ShaderStage::Vertex)).unwrap_err();
        assert!(matches!(
            err,
            ShaderError::MissingEntryPoint {
                stage: ShaderStage::Vertex,
                ..
            }
        ));
        assert_eq!(err.to_string(), "test: no vertex entry point");
    }

    #[test]
    fn diagnostic_log_is_bounded() {
        let log = DiagnosticLog::new("x".repeat(5000));
        assert_eq!(log.as_str().len(), MAX_LOG_LEN);
    }

    #[test]
    fn diagnostic_log_truncates_on_char_boundary() {
        // 'é' is two bytes, so byte 1023 falls inside a character.
        let log = DiagnosticLog::new("é".repeat(600));
        assert_eq!(log.as_str().len(), 1022);
        assert!(log.as_str().chars().all(|c| c == 'é'));
    }

    #[test]
    fn short_log_is_kept() {
        let log = DiagnosticLog::new("error: expected `;`");
        assert_eq!(log.to_string(), "error: expected `;`");
        assert!(!log.is_empty());
    }
}
