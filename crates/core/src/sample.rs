//! Grayscale sample buffers for the threshold viewer
//!
//! A [`SampleBuffer`] holds the full-resolution grayscale frame the viewer
//! operates on. Every loaded image is scaled to a fixed canvas and converted
//! to 8-bit intensities during load; the buffer is replaced wholesale each
//! time a new source image is opened.

use image::imageops::FilterType;
use image::{DynamicImage, Rgb, RgbImage};
use std::path::Path;

/// Width of the fixed display canvas in pixels.
pub const CANVAS_WIDTH: u32 = 700;

/// Height of the fixed display canvas in pixels.
pub const CANVAS_HEIGHT: u32 = 700;

/// Fill color shown before any image has been loaded (dark cyan).
const PLACEHOLDER_FILL: Rgb<u8> = Rgb([0, 139, 139]);

/// Errors that can occur while building a sample buffer
#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    /// The source image could not be read or decoded
    #[error("failed to load image: {0}")]
    Load(#[from] image::ImageError),

    /// Raw sample data did not match the stated dimensions
    #[error("sample data has {actual} bytes, expected {expected} for {width}x{height}")]
    DimensionMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// A 2D grid of 8-bit grayscale intensity samples.
///
/// Dimensions are fixed at construction time. Workers receive the buffer as
/// an immutable snapshot; nothing mutates a buffer in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl SampleBuffer {
    /// Create a buffer from raw row-major sample data.
    ///
    /// Fails if the data length does not equal `width * height`.
    pub fn from_raw(width: u32, height: u32, samples: Vec<u8>) -> Result<Self, SampleError> {
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(SampleError::DimensionMismatch {
                width,
                height,
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Load an image file and convert it into a canvas-sized sample buffer.
    ///
    /// The image is scaled to exactly [`CANVAS_WIDTH`] x [`CANVAS_HEIGHT`]
    /// (aspect ratio is not preserved) and converted to 8-bit grayscale.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SampleError> {
        let path = path.as_ref();
        let image = image::open(path)?;

        log::debug!(
            "loaded {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );

        Ok(Self::from_image(&image))
    }

    /// Convert an already-decoded image into a canvas-sized sample buffer.
    pub fn from_image(image: &DynamicImage) -> Self {
        let scaled = image
            .resize_exact(CANVAS_WIDTH, CANVAS_HEIGHT, FilterType::Triangle)
            .to_luma8();

        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            samples: scaled.into_raw(),
        }
    }

    /// The canvas-sized buffer shown before any image has been loaded.
    ///
    /// Uses the same color pipeline as a real load so the placeholder's
    /// grayscale value matches what the fill color would decode to.
    pub fn placeholder() -> Self {
        let fill = RgbImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, PLACEHOLDER_FILL);
        Self::from_image(&DynamicImage::ImageRgb8(fill))
    }

    /// Buffer width in samples.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in samples.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major sample data.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Sample at (x, y), or `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }

        self.samples
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }
}
