//! Textures sampled by materials at surface coordinates `(u, v)`.
//!
//! Image textures are decoded with the `image` crate into a flat pixel
//! buffer and sampled with nearest-pixel lookup. Texture space has its
//! origin at the bottom-left and wraps in both directions.

use std::path::Path;

use thiserror::Error;

use crate::Color;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Texture has zero size ({width}x{height})")]
    Empty { width: u32, height: u32 },

    #[error("Pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGB")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A surface texture.
#[derive(Clone, Debug)]
pub enum Texture {
    /// The same color everywhere.
    SingleColor(Color),
    /// A decoded image.
    Image(ImageTexture),
}

impl Texture {
    /// Create a solid color texture.
    pub fn solid(color: Color) -> Self {
        Texture::SingleColor(color)
    }

    /// Color at texture coordinates `(u, v)`.
    pub fn color_for(&self, u: f64, v: f64) -> Color {
        match self {
            Texture::SingleColor(color) => *color,
            Texture::Image(image) => image.color_for(u, v),
        }
    }
}

impl From<Color> for Texture {
    fn from(color: Color) -> Self {
        Texture::SingleColor(color)
    }
}

impl From<ImageTexture> for Texture {
    fn from(image: ImageTexture) -> Self {
        Texture::Image(image)
    }
}

/// A decoded RGB image, stored row-major from the top row down.
#[derive(Clone, Debug)]
pub struct ImageTexture {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl ImageTexture {
    /// Build from 8-bit RGB data (3 bytes per pixel, row-major, top row first).
    pub fn from_rgb8(width: u32, height: u32, data: &[u8]) -> TextureResult<Self> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty { width, height });
        }

        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(TextureError::BufferSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }

        let pixels = data
            .chunks_exact(3)
            .map(|p| Color::from_rgb8([p[0], p[1], p[2]]))
            .collect();

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Load and decode an image file.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| TextureError::Load {
            path: path.display().to_string(),
            source,
        })?;

        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let texture = Self::from_rgb8(width, height, rgb.as_raw())?;

        log::info!("Loaded texture: {} ({}x{})", path.display(), width, height);

        Ok(texture)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample the texture at UV coordinates (nearest pixel).
    ///
    /// UV coordinates are wrapped into [0, 1), with (0, 0) at bottom-left.
    pub fn color_for(&self, u: f64, v: f64) -> Color {
        let u = wrap(u);
        let v = wrap(v);

        let max_x = (self.width - 1) as f64;
        let max_y = (self.height - 1) as f64;
        let x = (max_x * u).round() as u32;
        let y = (max_y - max_y * v).round() as u32; // Flip V for image coordinates

        self.get_pixel(x.min(self.width - 1), y.min(self.height - 1))
    }

    fn get_pixel(&self, x: u32, y: u32) -> Color {
        let idx = (y * self.width + x) as usize;
        self.pixels.get(idx).copied().unwrap_or(Color::BLACK)
    }
}

/// Wrap a texture coordinate into [0, 1).
fn wrap(value: f64) -> f64 {
    let wrapped = value.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> ImageTexture {
        // 2x2: top row red, green; bottom row blue, white
        #[rustfmt::skip]
        let data = [
            255, 0, 0,    0, 255, 0,
            0, 0, 255,    255, 255, 255,
        ];
        ImageTexture::from_rgb8(2, 2, &data).unwrap()
    }

    #[test]
    fn test_solid_color_texture() {
        let tex = Texture::solid(Color::new(1.0, 0.5, 0.0));
        assert_eq!(tex.color_for(0.3, 0.9), Color::new(1.0, 0.5, 0.0));
        assert_eq!(tex.color_for(-7.0, 12.0), Color::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn test_image_origin_is_bottom_left() {
        let tex = checker();
        assert_eq!(tex.color_for(0.0, 0.0), Color::new(0.0, 0.0, 1.0));
        assert_eq!(tex.color_for(0.0, 0.999), Color::new(1.0, 0.0, 0.0));
        assert_eq!(tex.color_for(0.999, 0.999), Color::new(0.0, 1.0, 0.0));
        assert_eq!(tex.color_for(0.999, 0.0), Color::WHITE);
    }

    #[test]
    fn test_coordinates_wrap() {
        let tex = checker();
        assert_eq!(tex.color_for(1.0, 0.0), tex.color_for(0.0, 0.0));
        assert_eq!(tex.color_for(-0.001, 0.0), tex.color_for(0.999, 0.0));
        assert_eq!(tex.color_for(3.0, -2.0), tex.color_for(0.0, 0.0));
    }

    #[test]
    fn test_buffer_size_validated() {
        let err = ImageTexture::from_rgb8(2, 2, &[0; 5]).unwrap_err();
        assert!(matches!(err, TextureError::BufferSize { expected: 12, actual: 5, .. }));
        assert!(matches!(
            ImageTexture::from_rgb8(0, 2, &[]),
            Err(TextureError::Empty { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(ImageTexture::load("/nonexistent/texture.png").is_err());
    }
}
