//! Debug-build GPU error probing.
//!
//! Wrap a group of wgpu calls in [`ErrorProbe::begin`] / [`ErrorProbe::end`]
//! to log any error they raised, tagged with the call site. Release builds
//! push no scopes and log nothing. The probe never changes control flow.

/// Whether probes push error scopes in this build.
pub const PROBES_ENABLED: bool = cfg!(debug_assertions);

/// Category of a GPU error, one per wgpu error scope filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpuErrorKind {
    OutOfMemory,
    Validation,
    Internal,
}

impl GpuErrorKind {
    /// Push order of the probe's scopes; they are popped in reverse.
    const SCOPES: [GpuErrorKind; 3] = [
        GpuErrorKind::OutOfMemory,
        GpuErrorKind::Validation,
        GpuErrorKind::Internal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GpuErrorKind::OutOfMemory => "out of memory",
            GpuErrorKind::Validation => "validation error",
            GpuErrorKind::Internal => "internal error",
        }
    }

    fn filter(self) -> wgpu::ErrorFilter {
        match self {
            GpuErrorKind::OutOfMemory => wgpu::ErrorFilter::OutOfMemory,
            GpuErrorKind::Validation => wgpu::ErrorFilter::Validation,
            GpuErrorKind::Internal => wgpu::ErrorFilter::Internal,
        }
    }
}

/// An open set of error scopes. Must be closed with [`ErrorProbe::end`] on
/// the same device.
#[must_use = "an unclosed probe leaves error scopes on the device"]
pub struct ErrorProbe {
    active: bool,
}

impl ErrorProbe {
    pub fn begin(device: &wgpu::Device) -> Self {
        if PROBES_ENABLED {
            for kind in GpuErrorKind::SCOPES {
                device.push_error_scope(kind.filter());
            }
        }
        Self {
            active: PROBES_ENABLED,
        }
    }

    /// Close the probe, logging every captured error. Returns how many
    /// were logged.
    pub fn end(self, device: &wgpu::Device, call_site: &str) -> usize {
        if !self.active {
            return 0;
        }
        let mut logged = 0;
        for kind in GpuErrorKind::SCOPES.into_iter().rev() {
            if let Some(err) = pollster::block_on(device.pop_error_scope()) {
                logged += 1;
                tracing::error!("{}: {} ({err})", call_site, kind.name());
            }
        }
        logged
    }
}
