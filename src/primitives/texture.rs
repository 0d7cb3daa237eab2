use std::path::Path;

use image::{imageops::FilterType, RgbaImage};

use crate::error::{Result, ViewerError};

pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

/// Reads and decodes an image file into RGBA8.
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    let bytes = std::fs::read(path).map_err(|source| ViewerError::TextureRead {
        path: path.to_owned(),
        source,
    })?;
    let img = image::load_from_memory(&bytes).map_err(|source| ViewerError::TextureDecode {
        path: path.to_owned(),
        source,
    })?;
    Ok(img.to_rgba8())
}

/// Full mip chain, level 0 first, halving down to 1x1.
pub fn mip_chain(base: RgbaImage) -> Vec<RgbaImage> {
    let mut levels = Vec::new();
    let mut current = base;
    while current.dimensions() != (1, 1) {
        let (width, height) = current.dimensions();
        let next = image::imageops::resize(
            &current,
            (width / 2).max(1),
            (height / 2).max(1),
            FilterType::Triangle,
        );
        levels.push(std::mem::replace(&mut current, next));
    }
    levels.push(current);
    levels
}

impl Texture {
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
    // Not sRGB: shading and the composite offset work on stored values.
    pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    pub fn from_path(device: &wgpu::Device, queue: &wgpu::Queue, path: &Path) -> Result<Self> {
        let rgba = load_rgba(path)?;
        let (width, height) = rgba.dimensions();
        let levels = mip_chain(rgba);
        log::info!(
            "Loaded texture {} ({}x{}, {} mip levels)",
            path.display(),
            width,
            height,
            levels.len()
        );

        let label = path.to_string_lossy();
        Ok(Self::from_levels(device, queue, &levels, Some(label.as_ref())))
    }

    /// A 1x1 texture of a single colour.
    pub fn solid(device: &wgpu::Device, queue: &wgpu::Queue, rgba: [u8; 4], label: &str) -> Self {
        let pixel = RgbaImage::from_pixel(1, 1, image::Rgba(rgba));
        Self::from_levels(device, queue, std::slice::from_ref(&pixel), Some(label))
    }

    fn from_levels(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        levels: &[RgbaImage],
        label: Option<&str>,
    ) -> Self {
        let (width, height) = levels.first().map_or((1, 1), |l| l.dimensions());
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: levels.len().max(1) as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::COLOR_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (mip_level, level) in levels.iter().enumerate() {
            let (width, height) = level.dimensions();
            queue.write_texture(
                wgpu::ImageCopyTexture {
                    aspect: wgpu::TextureAspect::All,
                    texture: &texture,
                    mip_level: mip_level as u32,
                    origin: wgpu::Origin3d::ZERO,
                },
                level.as_raw(),
                wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * width),
                    rows_per_image: Some(height),
                },
                wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// Off-screen colour target that a later pass samples.
    pub fn render_target(device: &wgpu::Device, [width, height]: [u32; 2], label: &str) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::COLOR_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }
}

/// Depth attachment; never sampled.
pub struct DepthBuffer {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl DepthBuffer {
    pub fn new(device: &wgpu::Device, [width, height]: [u32; 2], label: &str) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Texture::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self { texture, view }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_texture_is_a_read_error_naming_the_file() {
        let path = Path::new("Objects/no_such_texture.png");
        let err = load_rgba(path).unwrap_err();
        assert!(matches!(err, ViewerError::TextureRead { .. }), "{err:?}");
        assert!(err.to_string().contains("no_such_texture.png"), "{err}");
    }

    #[test]
    fn non_image_texture_is_a_decode_error_naming_the_file() {
        let path = Path::new("Objects/cube.mtl");
        let err = load_rgba(path).unwrap_err();
        assert!(matches!(err, ViewerError::TextureDecode { .. }), "{err:?}");
        assert!(err.to_string().contains("cube.mtl"), "{err}");
    }

    #[test]
    fn bundled_checker_decodes() {
        let rgba = load_rgba(Path::new("Objects/checker.png")).unwrap();
        assert_eq!(rgba.dimensions(), (64, 64));
    }

    #[test]
    fn mip_chain_halves_down_to_one_pixel() {
        let levels = mip_chain(RgbaImage::new(64, 16));
        let sizes: Vec<_> = levels.iter().map(|l| l.dimensions()).collect();
        assert_eq!(
            sizes,
            vec![(64, 16), (32, 8), (16, 4), (8, 2), (4, 1), (2, 1), (1, 1)]
        );
    }

    #[test]
    fn single_pixel_has_one_level() {
        assert_eq!(mip_chain(RgbaImage::new(1, 1)).len(), 1);
    }

    #[test]
    fn colour_targets_store_values_unconverted() {
        assert!(!Texture::COLOR_FORMAT.is_srgb());
    }
}
