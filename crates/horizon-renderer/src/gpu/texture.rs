//! Image decoding and mipmapped texture upload.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};
use wgpu::util::DeviceExt;

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("{path} has zero width or height")]
    Empty { path: PathBuf },
}

/// Whether PNG and JPEG decoding were compiled in.
pub fn decoders_available() -> bool {
    ImageFormat::Png.reading_enabled() && ImageFormat::Jpeg.reading_enabled()
}

/// Read and decode an image file into RGBA8.
pub fn decode_rgba(path: &Path) -> Result<RgbaImage, TextureError> {
    let bytes = std::fs::read(path).map_err(|source| TextureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let image = image::load_from_memory(&bytes)
        .map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();
    if image.width() == 0 || image.height() == 0 {
        return Err(TextureError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(image)
}

/// Number of levels in a full mip chain down to 1×1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Full mip chain, level 0 first. Each level halves the previous one,
/// clamped to at least one pixel per side.
pub fn mip_chain(base: &RgbaImage) -> Vec<RgbaImage> {
    let levels = mip_level_count(base.width(), base.height());
    let mut chain = Vec::with_capacity(levels as usize);
    chain.push(base.clone());
    for _ in 1..levels {
        let Some(prev) = chain.last() else { break };
        let w = (prev.width() / 2).max(1);
        let h = (prev.height() / 2).max(1);
        let next = imageops::resize(prev, w, h, FilterType::Triangle);
        chain.push(next);
    }
    chain
}

/// A sampled 2D texture with its view and sampler.
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub width: u32,
    pub height: u32,
    pub mip_levels: u32,
}

impl Texture {
    /// Upload `image` with a full mip chain, linear filtering, and
    /// clamp-to-edge addressing.
    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &RgbaImage,
        label: &str,
    ) -> Self {
        let chain = mip_chain(image);
        let mip_levels = chain.len() as u32;
        let data: Vec<u8> = chain
            .iter()
            .flat_map(|level| level.as_raw().iter().copied())
            .collect();

        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width: image.width(),
                    height: image.height(),
                    depth_or_array_layers: 1,
                },
                mip_level_count: mip_levels,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::MipMajor,
            &data,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            width: image.width(),
            height: image.height(),
            mip_levels,
        }
    }
}

/// Load an image file into a mipmapped texture.
///
/// Returns `None`, after logging the reason, when the file cannot be read
/// or decoded. Host-side pixel buffers are released before returning.
pub fn load_texture(device: &wgpu::Device, queue: &wgpu::Queue, path: &Path) -> Option<Texture> {
    match decode_rgba(path) {
        Ok(image) => {
            let label = path.display().to_string();
            let texture = Texture::from_rgba(device, queue, &image, &label);
            tracing::debug!(
                path = %path.display(),
                width = texture.width,
                height = texture.height,
                mip_levels = texture.mip_levels,
                "Texture loaded"
            );
            Some(texture)
        }
        Err(e) => {
            tracing::warn!("Texture unavailable: {e}");
            None
        }
    }
}
