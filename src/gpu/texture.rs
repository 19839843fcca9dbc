//! Depth targets and sampled image textures.

use std::path::Path;

use crate::error::OrbitalError;

/// Depth attachment format shared by every pipeline.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Depth buffer matching the surface size.
pub struct DepthTarget {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl DepthTarget {
    /// Create a depth texture of the given size (clamped to at least 1×1).
    #[must_use]
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Target"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// Whether texel values are sRGB-encoded colors or linear data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TexelEncoding {
    /// Color maps, decoded to linear on sample.
    Srgb,
    /// Normal maps and other data, sampled as stored.
    Linear,
}

impl TexelEncoding {
    fn format(self) -> wgpu::TextureFormat {
        match self {
            Self::Srgb => wgpu::TextureFormat::Rgba8UnormSrgb,
            Self::Linear => wgpu::TextureFormat::Rgba8Unorm,
        }
    }
}

/// A sampled 2D RGBA8 texture and its default view.
pub struct ImageTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl ImageTexture {
    /// Upload tightly packed RGBA8 pixels.
    ///
    /// # Errors
    ///
    /// Returns [`OrbitalError::AssetLoad`] if `rgba` does not hold exactly
    /// `width * height` pixels or either dimension is zero.
    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        (width, height): (u32, u32),
        rgba: &[u8],
        encoding: TexelEncoding,
    ) -> Result<Self, OrbitalError> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || rgba.len() != expected {
            return Err(OrbitalError::AssetLoad {
                asset: label.to_owned(),
                message: format!(
                    "{width}x{height} image with {} bytes of pixel data",
                    rgba.len()
                ),
            });
        }
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: encoding.format(),
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Ok(Self { texture, view })
    }

    /// 1×1 texture of a single texel.
    #[must_use]
    pub fn solid(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        texel: [u8; 4],
        encoding: TexelEncoding,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: encoding.format(),
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            texture.as_image_copy(),
            &texel,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4),
                rows_per_image: Some(1),
            },
            wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    /// Decode an image file and upload it.
    ///
    /// # Errors
    ///
    /// Returns [`OrbitalError::Texture`] if the file cannot be opened or
    /// decoded.
    pub fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: &Path,
        encoding: TexelEncoding,
    ) -> Result<Self, OrbitalError> {
        let image = image::open(path)
            .map_err(|source| OrbitalError::Texture {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let label = path.display().to_string();
        log::debug!("{label}: {}x{}", image.width(), image.height());
        Self::from_rgba8(
            device,
            queue,
            &label,
            image.dimensions(),
            image.as_raw(),
            encoding,
        )
    }

    /// [`load`](Self::load), falling back to a 1×1 `fallback` texel with a
    /// warning.
    #[must_use]
    pub fn load_or(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: &Path,
        encoding: TexelEncoding,
        fallback: [u8; 4],
    ) -> Self {
        Self::load(device, queue, path, encoding).unwrap_or_else(|e| {
            log::warn!("{e}; using a flat placeholder");
            Self::solid(device, queue, "Placeholder Texture", fallback, encoding)
        })
    }
}

/// Linear-filtered sampler that tiles in both directions.
#[must_use]
pub fn repeat_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("Repeat Sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    })
}
