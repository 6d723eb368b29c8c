use crate::error::RenderError;
use image::imageops::FilterType;
use image::{Rgba, RgbaImage};
use std::path::Path;

const CHECKER_CELL: u32 = 16;
const CHECKER_LIGHT: u8 = 200;
const CHECKER_DARK: u8 = 100;

/// Gray checkerboard used when the texture file is missing or unreadable.
pub fn checkerboard(size: u32) -> RgbaImage {
    RgbaImage::from_fn(size, size, |x, y| {
        let v = if (x / CHECKER_CELL + y / CHECKER_CELL) % 2 == 0 {
            CHECKER_LIGHT
        } else {
            CHECKER_DARK
        };
        Rgba([v, v, v, 255])
    })
}

/// Number of levels in a full mip chain down to 1x1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Base image followed by successively halved levels.
pub fn mip_chain(base: RgbaImage) -> Vec<RgbaImage> {
    let levels = mip_level_count(base.width(), base.height()) as usize;
    let mut chain = Vec::with_capacity(levels);
    chain.push(base);
    while chain.len() < levels {
        let prev = &chain[chain.len() - 1];
        let width = (prev.width() / 2).max(1);
        let height = (prev.height() / 2).max(1);
        let next = image::imageops::resize(prev, width, height, FilterType::Triangle);
        chain.push(next);
    }
    chain
}

/// Decode `path`. Images wider or taller than `max_dimension` are rejected.
pub fn load_image(path: &Path, max_dimension: u32) -> Result<RgbaImage, RenderError> {
    let image = image::open(path)?.to_rgba8();
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyTexture);
    }
    if width > max_dimension || height > max_dimension {
        return Err(RenderError::TextureTooLarge {
            width,
            height,
            max: max_dimension,
        });
    }
    Ok(image)
}

/// Decode `path`, or fall back to a procedural checkerboard of `fallback_size`.
///
/// `max_dimension` is the device's 2D texture limit; the fallback is clamped to
/// it as well.
pub fn load_or_fallback(path: &Path, fallback_size: u32, max_dimension: u32) -> RgbaImage {
    let fallback_size = fallback_size.clamp(1, max_dimension.max(1));
    if !path.is_file() {
        tracing::warn!(path = %path.display(), "texture not found, creating fallback");
        return checkerboard(fallback_size);
    }
    match load_image(path, max_dimension) {
        Ok(image) => {
            tracing::info!(
                path = %path.display(),
                width = image.width(),
                height = image.height(),
                "texture loaded"
            );
            image
        }
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                %error,
                "texture loading failed, creating fallback"
            );
            checkerboard(fallback_size)
        }
    }
}

/// A sampled texture on the GPU with every mip level filled.
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl GpuTexture {
    /// Upload `base` and its generated mip chain.
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        base: RgbaImage,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: base.width(),
            height: base.height(),
            depth_or_array_layers: 1,
        };
        let chain = mip_chain(base);

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: chain.len() as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (level, image) in chain.iter().enumerate() {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                image.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * image.width()),
                    rows_per_image: Some(image.height()),
                },
                wgpu::Extent3d {
                    width: image.width(),
                    height: image.height(),
                    depth_or_array_layers: 1,
                },
            );
        }

        tracing::debug!(
            width = size.width,
            height = size.height,
            mips = chain.len(),
            "texture uploaded"
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    /// Load from `path` (or the fallback) and upload.
    pub fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: &Path,
        fallback_size: u32,
    ) -> Self {
        let max_dimension = device.limits().max_texture_dimension_2d;
        let image = load_or_fallback(path, fallback_size, max_dimension);
        Self::upload(device, queue, "cube_texture", image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `wgpu::Limits::default().max_texture_dimension_2d`.
    const LIMIT: u32 = 8192;

    #[test]
    fn checkerboard_pattern() {
        let img = checkerboard(64);
        assert_eq!(img.dimensions(), (64, 64));
        assert_eq!(img.get_pixel(0, 0).0, [200, 200, 200, 255]);
        assert_eq!(img.get_pixel(16, 0).0, [100, 100, 100, 255]);
        assert_eq!(img.get_pixel(16, 16).0, [200, 200, 200, 255]);
        assert_eq!(img.get_pixel(15, 31).0, [100, 100, 100, 255]);
    }

    #[test]
    fn mip_counts() {
        assert_eq!(mip_level_count(256, 256), 9);
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(300, 20), 9);
        assert_eq!(mip_level_count(0, 0), 1);
    }

    #[test]
    fn mip_chain_halves_to_one() {
        let chain = mip_chain(RgbaImage::new(8, 2));
        let sizes: Vec<_> = chain.iter().map(|i| i.dimensions()).collect();
        assert_eq!(sizes, vec![(8, 2), (4, 1), (2, 1), (1, 1)]);
    }

    #[test]
    fn missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let img = load_or_fallback(&dir.path().join("nope.png"), 32, LIMIT);
        assert_eq!(img.dimensions(), (32, 32));
        assert_eq!(img.get_pixel(0, 0).0, [200, 200, 200, 255]);
    }

    #[test]
    fn corrupt_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(load_image(&path, LIMIT).is_err());
        assert_eq!(load_or_fallback(&path, 16, LIMIT).dimensions(), (16, 16));
    }

    #[test]
    fn loads_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("texture.png");
        let src = RgbaImage::from_pixel(12, 6, Rgba([10, 20, 30, 255]));
        src.save(&path).unwrap();

        let img = load_or_fallback(&path, 256, LIMIT);
        assert_eq!(img.dimensions(), (12, 6));
        assert_eq!(img.get_pixel(3, 3).0, [10, 20, 30, 255]);
    }

    #[test]
    fn oversized_image_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        RgbaImage::new(LIMIT + 808, 1).save(&path).unwrap();

        assert!(matches!(
            load_image(&path, LIMIT),
            Err(RenderError::TextureTooLarge { width: 9000, height: 1, max: LIMIT })
        ));
        let img = load_or_fallback(&path, 256, LIMIT);
        assert_eq!(img.dimensions(), (256, 256));
        assert_eq!(img.get_pixel(0, 0).0, [200, 200, 200, 255]);
    }

    #[test]
    fn image_at_limit_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edge.png");
        RgbaImage::new(64, 2).save(&path).unwrap();
        assert_eq!(load_image(&path, 64).unwrap().dimensions(), (64, 2));
    }

    #[test]
    fn fallback_respects_limit() {
        let dir = tempfile::tempdir().unwrap();
        let img = load_or_fallback(&dir.path().join("nope.png"), 256, 128);
        assert_eq!(img.dimensions(), (128, 128));
    }
}
