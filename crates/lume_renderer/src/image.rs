//! 8-bit RGB output images.
//!
//! [`ImageBuffer`] is a single row-major allocation, three bytes per pixel,
//! row 0 at the top. It is written as PNG and can be read back from PNG or
//! JPEG to compare a render against a reference.

use std::path::Path;

use thiserror::Error;

/// Pixels whose RGB distance to the reference is below this count as equal.
pub const SIMILARITY_TOLERANCE: f64 = 2.0;

/// Errors that can occur while reading, writing or comparing images.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Image codec error: {0}")]
    Codec(#[from] ::image::ImageError),

    #[error("image size mismatch: {0}x{1} vs {2}x{3}")]
    SizeMismatch(u32, u32, u32, u32),
}

pub type ImageResult<T> = Result<T, ImageError>;

/// Final 8-bit RGB image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 3],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGB bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    fn offset(&self, row: u32, column: u32) -> usize {
        debug_assert!(row < self.height && column < self.width);
        (row as usize * self.width as usize + column as usize) * 3
    }

    /// Get the pixel at (`row`, `column`).
    pub fn rgb(&self, row: u32, column: u32) -> [u8; 3] {
        let i = self.offset(row, column);
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    /// Set the pixel at (`row`, `column`).
    pub fn set_rgb(&mut self, row: u32, column: u32, rgb: [u8; 3]) {
        let i = self.offset(row, column);
        self.pixels[i..i + 3].copy_from_slice(&rgb);
    }

    /// Mutable RGB triples, row-major.
    pub(crate) fn pixels_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        self.pixels.chunks_exact_mut(3)
    }

    /// Write the image as PNG.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        ::image::save_buffer_with_format(
            path,
            &self.pixels,
            self.width,
            self.height,
            ::image::ColorType::Rgb8,
            ::image::ImageFormat::Png,
        )?;
        Ok(())
    }

    /// Read a PNG or JPEG file, dropping any alpha channel.
    pub fn open<P: AsRef<Path>>(path: P) -> ImageResult<Self> {
        let rgb = ::image::open(path)?.to_rgb8();
        let (width, height) = rgb.dimensions();

        Ok(Self {
            width,
            height,
            pixels: rgb.into_raw(),
        })
    }

    /// Fraction of pixels within [`SIMILARITY_TOLERANCE`] of `other`.
    pub fn similarity(&self, other: &ImageBuffer) -> ImageResult<f64> {
        if self.width != other.width || self.height != other.height {
            return Err(ImageError::SizeMismatch(
                self.width,
                self.height,
                other.width,
                other.height,
            ));
        }

        let total = self.width as usize * self.height as usize;
        if total == 0 {
            return Ok(1.0);
        }

        let matches = self
            .pixels
            .chunks_exact(3)
            .zip(other.pixels.chunks_exact(3))
            .filter(|(a, b)| pixel_distance(a, b) < SIMILARITY_TOLERANCE)
            .count();

        Ok(matches as f64 / total as f64)
    }
}

fn pixel_distance(a: &[u8], b: &[u8]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| (f64::from(x) - f64::from(y)).powi(2))
        .sum::<f64>()
        .sqrt()
}
