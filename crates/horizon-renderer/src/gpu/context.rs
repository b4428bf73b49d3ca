//! Device and surface setup for the particle demo.
//!
//! An adapter is only accepted if it can run the feedback kernel over a
//! full particle buffer: compute shaders, two storage buffers in the
//! compute stage, and a single storage binding as large as the buffer.
//! Adapters that fall short are rejected before a device is requested, so
//! the failure is a [`RendererError::Unsupported`] rather than a device
//! validation error.

use std::sync::Arc;

use winit::window::Window;

use crate::kernel::WORKGROUP_SIZE;
use crate::particles::{buffer_size, PARTICLE_COUNT};

use super::types::{PhysicalSize, RendererError};

/// Storage buffers bound by the feedback pass (input and output).
const FEEDBACK_STORAGE_BUFFERS: u32 = 2;

/// Device capabilities a particle buffer pair of a given size needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticleRequirements {
    /// Size of one particle buffer in bytes.
    pub buffer_bytes: u64,
    /// Workgroups dispatched by one feedback pass.
    pub workgroups: u32,
}

impl ParticleRequirements {
    pub fn for_count(count: u32) -> Self {
        Self {
            buffer_bytes: buffer_size(count as usize),
            workgroups: count.div_ceil(WORKGROUP_SIZE),
        }
    }

    /// Limits to request from an adapter with `available` limits and
    /// `downlevel` capabilities.
    ///
    /// Starts from wgpu's downlevel defaults with the adapter's texture
    /// resolution, and raises the buffer limits to fit one particle buffer.
    /// Fails with the first requirement the adapter cannot meet.
    pub fn device_limits(
        &self,
        available: &wgpu::Limits,
        downlevel: &wgpu::DownlevelCapabilities,
    ) -> Result<wgpu::Limits, RendererError> {
        let unsupported = |what: String| -> Result<wgpu::Limits, RendererError> {
            Err(RendererError::Unsupported(what))
        };

        if !downlevel
            .flags
            .contains(wgpu::DownlevelFlags::COMPUTE_SHADERS)
        {
            return unsupported("compute shaders are not available".into());
        }
        if available.max_storage_buffers_per_shader_stage < FEEDBACK_STORAGE_BUFFERS {
            return unsupported(format!(
                "{} storage buffers per stage needed, adapter allows {}",
                FEEDBACK_STORAGE_BUFFERS, available.max_storage_buffers_per_shader_stage
            ));
        }
        if u64::from(available.max_storage_buffer_binding_size) < self.buffer_bytes {
            return unsupported(format!(
                "storage binding of {} bytes needed, adapter allows {}",
                self.buffer_bytes, available.max_storage_buffer_binding_size
            ));
        }
        if available.max_buffer_size < self.buffer_bytes {
            return unsupported(format!(
                "buffer of {} bytes needed, adapter allows {}",
                self.buffer_bytes, available.max_buffer_size
            ));
        }
        if available.max_compute_workgroup_size_x < WORKGROUP_SIZE
            || available.max_compute_invocations_per_workgroup < WORKGROUP_SIZE
        {
            return unsupported(format!(
                "workgroups of {WORKGROUP_SIZE} invocations needed, adapter allows {}",
                available
                    .max_compute_workgroup_size_x
                    .min(available.max_compute_invocations_per_workgroup)
            ));
        }
        if available.max_compute_workgroups_per_dimension < self.workgroups {
            return unsupported(format!(
                "{} workgroups per dispatch needed, adapter allows {}",
                self.workgroups, available.max_compute_workgroups_per_dimension
            ));
        }

        // Checked above: the buffer fits the adapter's u32 binding limit.
        let binding = u32::try_from(self.buffer_bytes).unwrap_or(u32::MAX);
        let base = wgpu::Limits::downlevel_defaults().using_resolution(available.clone());
        Ok(wgpu::Limits {
            max_storage_buffer_binding_size: base.max_storage_buffer_binding_size.max(binding),
            max_buffer_size: base.max_buffer_size.max(self.buffer_bytes),
            max_compute_workgroups_per_dimension: base
                .max_compute_workgroups_per_dimension
                .max(self.workgroups),
            ..base
        })
    }
}

/// Pick the surface format: an sRGB format if offered, else the first one.
pub fn choose_surface_format(formats: &[wgpu::TextureFormat]) -> wgpu::TextureFormat {
    formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| formats.first().copied())
        .unwrap_or(wgpu::TextureFormat::Bgra8UnormSrgb)
}

/// Device, queue and the configured window surface.
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize,
    pub adapter_info: wgpu::AdapterInfo,
}

impl GpuContext {
    /// Set up a device able to simulate [`PARTICLE_COUNT`] particles and a
    /// surface presenting to `window`.
    pub async fn new(window: Arc<Window>) -> Result<Self, RendererError> {
        let needs = ParticleRequirements::for_count(PARTICLE_COUNT);
        let inner = window.inner_size();
        let size = PhysicalSize {
            width: inner.width.max(1),
            height: inner.height.max(1),
        };

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window)
            .map_err(|e| RendererError::SurfaceError(e.to_string()))?;

        let (adapter, limits) = select_adapter(&instance, &surface, &needs).await?;
        let adapter_info = adapter.get_info();
        log_adapter_info(&adapter_info);
        tracing::debug!(
            buffer_bytes = needs.buffer_bytes,
            workgroups = needs.workgroups,
            max_storage_buffer_binding_size = limits.max_storage_buffer_binding_size,
            "Requesting device"
        );

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("horizon device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: limits,
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await?;
        device.on_uncaptured_error(Box::new(|err| {
            tracing::error!("Uncaptured GPU error: {err}");
        }));

        let caps = surface.get_capabilities(&adapter);
        let format = choose_surface_format(&caps.formats);
        tracing::info!(?format, srgb = format.is_srgb(), "Surface format");

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            desired_maximum_frame_latency: 2,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
        };
        surface.configure(&device, &surface_config);

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            size,
            adapter_info,
        })
    }

    /// Resize the surface; zero dimensions are clamped to 1.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = PhysicalSize {
            width: width.max(1),
            height: height.max(1),
        };
        self.surface_config.width = self.size.width;
        self.surface_config.height = self.size.height;
        self.reconfigure();
    }

    /// Reapply the current configuration, after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    pub fn current_texture(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }
}

/// First adapter that can run the particle kernels: a hardware adapter if
/// one qualifies, else the software fallback.
async fn select_adapter(
    instance: &wgpu::Instance,
    surface: &wgpu::Surface<'static>,
    needs: &ParticleRequirements,
) -> Result<(wgpu::Adapter, wgpu::Limits), RendererError> {
    let mut rejection = RendererError::AdapterNotFound;

    for force_fallback_adapter in [false, true] {
        let options = wgpu::RequestAdapterOptions {
            power_preference: if force_fallback_adapter {
                wgpu::PowerPreference::LowPower
            } else {
                wgpu::PowerPreference::HighPerformance
            },
            force_fallback_adapter,
            compatible_surface: Some(surface),
        };
        let Some(adapter) = instance.request_adapter(&options).await else {
            if !force_fallback_adapter {
                tracing::warn!("No hardware GPU adapter found, trying software fallback");
            }
            continue;
        };

        match needs.device_limits(&adapter.limits(), &adapter.get_downlevel_capabilities()) {
            Ok(limits) => return Ok((adapter, limits)),
            Err(e) => {
                tracing::warn!(adapter = %adapter.get_info().name, "Adapter rejected: {e}");
                rejection = e;
            }
        }
    }

    Err(rejection)
}

fn log_adapter_info(info: &wgpu::AdapterInfo) {
    tracing::info!(
        "GPU adapter: {} ({:?}, {:?})",
        info.name,
        info.device_type,
        info.backend,
    );
    tracing::info!(
        vendor = info.vendor,
        device = info.device,
        driver = %info.driver,
        driver_info = %info.driver_info,
        "GPU driver"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compliant() -> wgpu::DownlevelCapabilities {
        wgpu::DownlevelCapabilities::default()
    }

    #[test]
    fn requirements_for_default_particle_count() {
        let needs = ParticleRequirements::for_count(PARTICLE_COUNT);
        assert_eq!(needs.buffer_bytes, 28_000_000);
        assert_eq!(needs.workgroups, 3907);
    }

    #[test]
    fn default_limits_fit_the_particle_buffers() {
        let needs = ParticleRequirements::for_count(PARTICLE_COUNT);
        let limits = needs
            .device_limits(&wgpu::Limits::default(), &compliant())
            .unwrap();
        assert!(u64::from(limits.max_storage_buffer_binding_size) >= needs.buffer_bytes);
        assert!(limits.max_buffer_size >= needs.buffer_bytes);
    }

    #[test]
    fn requested_limits_grow_with_the_buffer() {
        let needs = ParticleRequirements {
            buffer_bytes: 200 << 20,
            workgroups: 1,
        };
        let available = wgpu::Limits {
            max_storage_buffer_binding_size: 512 << 20,
            max_buffer_size: 512 << 20,
            ..wgpu::Limits::default()
        };
        let limits = needs.device_limits(&available, &compliant()).unwrap();
        assert_eq!(limits.max_storage_buffer_binding_size, 200 << 20);
        assert_eq!(limits.max_buffer_size, 256 << 20);
    }

    #[test]
    fn small_storage_binding_is_rejected() {
        let needs = ParticleRequirements::for_count(PARTICLE_COUNT);
        let available = wgpu::Limits {
            max_storage_buffer_binding_size: 16 << 20,
            ..wgpu::Limits::default()
        };
        let err = needs.device_limits(&available, &compliant()).unwrap_err();
        assert!(matches!(err, RendererError::Unsupported(_)));
        assert!(err.to_string().contains("storage binding of 28000000 bytes"));
    }

    #[test]
    fn small_max_buffer_is_rejected() {
        let needs = ParticleRequirements::for_count(PARTICLE_COUNT);
        let available = wgpu::Limits {
            max_buffer_size: 1 << 20,
            ..wgpu::Limits::default()
        };
        let err = needs.device_limits(&available, &compliant()).unwrap_err();
        assert!(err.to_string().contains("buffer of 28000000 bytes"));
    }

    #[test]
    fn adapter_without_compute_is_rejected() {
        let needs = ParticleRequirements::for_count(1000);
        let downlevel = wgpu::DownlevelCapabilities {
            flags: wgpu::DownlevelFlags::empty(),
            ..Default::default()
        };
        let err = needs
            .device_limits(&wgpu::Limits::default(), &downlevel)
            .unwrap_err();
        assert!(err.to_string().contains("compute shaders"));
    }

    #[test]
    fn adapter_without_storage_buffers_is_rejected() {
        let needs = ParticleRequirements::for_count(1000);
        let err = needs
            .device_limits(&wgpu::Limits::downlevel_webgl2_defaults(), &compliant())
            .unwrap_err();
        assert!(err.to_string().contains("storage buffers per stage"));
    }

    #[test]
    fn surface_format_prefers_srgb() {
        use wgpu::TextureFormat::*;
        assert_eq!(
            choose_surface_format(&[Bgra8Unorm, Bgra8UnormSrgb]),
            Bgra8UnormSrgb
        );
        assert_eq!(choose_surface_format(&[Rgba8Unorm]), Rgba8Unorm);
        assert_eq!(choose_surface_format(&[]), Bgra8UnormSrgb);
    }
}
