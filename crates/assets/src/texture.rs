use image::RgbaImage;
use image::imageops::{self, FilterType};
use std::path::Path;

use crate::AssetError;

/// Number of levels in a full mip chain down to 1×1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// A decoded RGBA image with its complete, precomputed mip chain.
#[derive(Debug, Clone)]
pub struct TextureImage {
    pub name: String,
    levels: Vec<RgbaImage>,
}

impl TextureImage {
    /// Build the mip chain by repeatedly halving with a triangle filter.
    pub fn from_rgba(name: impl Into<String>, base: RgbaImage) -> Result<Self, AssetError> {
        let name = name.into();
        let (width, height) = base.dimensions();
        if width == 0 || height == 0 {
            return Err(AssetError::EmptyImage(name));
        }

        let count = mip_level_count(width, height) as usize;
        let mut levels = Vec::with_capacity(count);
        levels.push(base);
        while levels.len() < count {
            let prev = &levels[levels.len() - 1];
            let w = (prev.width() / 2).max(1);
            let h = (prev.height() / 2).max(1);
            let next = imageops::resize(prev, w, h, FilterType::Triangle);
            levels.push(next);
        }

        tracing::debug!(texture = %name, width, height, levels = levels.len(), "built mip chain");
        Ok(Self { name, levels })
    }

    pub fn width(&self) -> u32 {
        self.levels[0].width()
    }

    pub fn height(&self) -> u32 {
        self.levels[0].height()
    }

    pub fn base(&self) -> &RgbaImage {
        &self.levels[0]
    }

    /// Level 0 is the full-resolution image.
    pub fn levels(&self) -> &[RgbaImage] {
        &self.levels
    }

    pub fn mip_count(&self) -> u32 {
        self.levels.len() as u32
    }
}

/// Decode an image file (PNG) into a mip-mapped RGBA texture.
pub fn load_texture(path: impl AsRef<Path>) -> Result<TextureImage, AssetError> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|source| AssetError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "texture".into());
    TextureImage::from_rgba(name, decoded.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn level_counts() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(2, 2), 2);
        assert_eq!(mip_level_count(256, 256), 9);
        assert_eq!(mip_level_count(5, 3), 3);
        assert_eq!(mip_level_count(1024, 16), 11);
    }

    #[test]
    fn chain_halves_to_one_pixel() {
        let img = RgbaImage::from_pixel(64, 16, Rgba([255, 0, 0, 255]));
        let tex = TextureImage::from_rgba("red", img).unwrap();
        assert_eq!(tex.mip_count(), 7);
        let sizes: Vec<_> = tex.levels().iter().map(|l| l.dimensions()).collect();
        assert_eq!(
            sizes,
            vec![(64, 16), (32, 8), (16, 4), (8, 2), (4, 1), (2, 1), (1, 1)]
        );
        assert_eq!(tex.levels().last().unwrap().get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn checkerboard_averages_to_grey() {
        let img = RgbaImage::from_fn(2, 2, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        });
        let tex = TextureImage::from_rgba("checker", img).unwrap();
        let px = tex.levels()[1].get_pixel(0, 0);
        assert!(px[0] > 64 && px[0] < 192, "got {px:?}");
    }

    #[test]
    fn empty_image_is_rejected() {
        let err = TextureImage::from_rgba("empty", RgbaImage::new(0, 4)).unwrap_err();
        assert!(matches!(err, AssetError::EmptyImage(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_texture("/definitely/not/here/chess.png").unwrap_err();
        assert!(err.to_string().contains("chess.png"));
    }
}
