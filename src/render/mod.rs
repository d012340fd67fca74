//! # Image Rasterization
//!
//! Converts uploaded image bytes into a 1-bit raster a thermal print head
//! can reproduce. The pipeline is a fixed sequence of deterministic steps:
//!
//! 1. Decode (any container format the `image` crate understands)
//! 2. Resize to the print-head width, preserving aspect ratio
//! 3. Grayscale conversion (luminance-weighted)
//! 4. Contrast normalization (linear histogram stretch)
//! 5. Floyd–Steinberg error-diffusion dithering
//!
//! The same input bytes and target width always produce byte-identical
//! output, which keeps the whole pipeline testable without a printer.

pub mod dither;

use image::imageops::FilterType;

use crate::error::BoletaError;

/// A rasterized image ready for the printer.
///
/// Holds a row-major grayscale buffer. After construction through
/// [`rasterize`] every pixel is binary (0 = black, 255 = white).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Width in dots.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in dots.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The underlying grayscale buffer, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Serialize into the printer's raster wire layout: each row packed
    /// MSB-first into `ceil(width / 8)` bytes, 1 = black dot.
    pub fn packed(&self) -> Vec<u8> {
        let width = self.width as usize;
        let mut data = Vec::with_capacity(width.div_ceil(8) * self.height as usize);
        for row in self.pixels.chunks(width) {
            data.extend(dither::pack_row(row));
        }
        data
    }
}

/// Rasterize image bytes for a print head of the given width.
///
/// Fails with [`BoletaError::Decode`] if the bytes are not a decodable
/// image. Images narrower than `target_width` are enlarged; wider images
/// are reduced (fit-inside policy, Lanczos3 resampling).
///
/// ## Example
///
/// ```no_run
/// use boleta::render::rasterize;
///
/// let bytes = std::fs::read("photo.jpg")?;
/// let raster = rasterize(&bytes, 384)?;
/// assert_eq!(raster.width(), 384);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn rasterize(bytes: &[u8], target_width: u32) -> Result<RasterImage, BoletaError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| BoletaError::Decode(format!("Failed to decode image: {}", e)))?;

    // Derive height from the aspect ratio, never below one row
    let aspect = img.height() as f32 / img.width() as f32;
    let target_height = ((target_width as f32 * aspect).round() as u32).max(1);
    let resized = img.resize_exact(target_width, target_height, FilterType::Lanczos3);

    let gray = resized.to_luma8();
    let mut pixels = gray.into_raw();

    normalize_contrast(&mut pixels);
    dither::floyd_steinberg(&mut pixels, target_width as usize, target_height as usize);

    Ok(RasterImage {
        width: target_width,
        height: target_height,
        pixels,
    })
}

/// Linearly stretch the histogram so the darkest pixel maps to 0 and the
/// lightest to 255. Improves dithering fidelity on low-contrast photos.
///
/// A flat image (min == max) is left untouched; stretching it would only
/// amplify noise that is not there.
fn normalize_contrast(pixels: &mut [u8]) {
    let Some(&min) = pixels.iter().min() else {
        return;
    };
    let max = *pixels.iter().max().unwrap_or(&min);
    if (min == 0 && max == 255) || min == max {
        return;
    }

    let range = (max - min) as u32;
    for px in pixels.iter_mut() {
        *px = ((*px - min) as u32 * 255 / range) as u8;
    }
}

// ============================================================================
// TESTS
// ============================================================================
