//! # Floyd–Steinberg Dithering
//!
//! Error-diffusion dithering to convert continuous-tone (grayscale) images
//! to binary (black/white) output suitable for thermal printers.
//!
//! ## What is Dithering?
//!
//! Dithering simulates grayscale on a device that can only print black or
//! white. By varying the density of black dots, we create the illusion of
//! different gray levels.
//!
//! ```text
//! Grayscale:    White    Light    Medium    Dark    Black
//!               ░░░░░░   ░░▒░░░   ░▒░▒░▒   ▒▓▒▓▒▓   ██████
//! ```
//!
//! ## Error Diffusion
//!
//! Each pixel is thresholded at 128 to black or white, and the quantization
//! error (the difference between the original value and the chosen extreme)
//! is distributed to the neighbors that have not been processed yet:
//!
//! ```text
//!             ┌───────┬───────┐
//!             │   *   │  7/16 │
//!     ┌───────┼───────┼───────┤
//!     │  3/16 │  5/16 │  1/16 │
//!     └───────┴───────┴───────┘
//! ```
//!
//! Processing order is strict row-major, left-to-right, top-to-bottom. The
//! order is part of the algorithm: each threshold decision depends on error
//! pushed into the pixel by its already-processed neighbors, so the pass
//! cannot be parallelized within a row.

/// Quantization threshold: values at or above become white (255).
const THRESHOLD: i16 = 128;

/// Apply Floyd–Steinberg dithering in place.
///
/// `pixels` is a row-major grayscale buffer (`width * height` bytes,
/// 0 = black, 255 = white). On return every pixel is exactly 0 or 255.
///
/// The diffusion runs on an i16 working copy so accumulated error can push
/// values outside the 0–255 range before they are thresholded.
pub fn floyd_steinberg(pixels: &mut [u8], width: usize, height: usize) {
    debug_assert_eq!(pixels.len(), width * height);

    let mut buf: Vec<i16> = pixels.iter().map(|&p| p as i16).collect();

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let old = buf[idx];
            let new = if old >= THRESHOLD { 255 } else { 0 };
            let err = old - new;
            buf[idx] = new;

            // Right: 7/16
            if x + 1 < width {
                buf[idx + 1] += err * 7 / 16;
            }
            if y + 1 < height {
                // Below-left: 3/16
                if x > 0 {
                    buf[idx + width - 1] += err * 3 / 16;
                }
                // Below: 5/16
                buf[idx + width] += err * 5 / 16;
                // Below-right: 1/16
                if x + 1 < width {
                    buf[idx + width + 1] += err / 16;
                }
            }
        }
    }

    for (out, &v) in pixels.iter_mut().zip(&buf) {
        *out = v.clamp(0, 255) as u8;
    }
}

/// Pack one row of binary grayscale pixels into printer raster bytes.
///
/// - Bit 7 (MSB) = leftmost pixel
/// - 1 = black dot (pixel value < 128), 0 = white
/// - Rows not a multiple of 8 pixels are padded with white on the right
///
/// ## Example
///
/// ```
/// use boleta::render::dither::pack_row;
///
/// // 8 pixels: 4 black then 4 white pack into one byte
/// let row = [0, 0, 0, 0, 255, 255, 255, 255];
/// assert_eq!(pack_row(&row), vec![0xF0]);
/// ```
pub fn pack_row(row: &[u8]) -> Vec<u8> {
    let mut bytes = vec![0u8; row.len().div_ceil(8)];

    for (i, &px) in row.iter().enumerate() {
        if px < 128 {
            bytes[i / 8] |= 1 << (7 - (i % 8));
        }
    }

    bytes
}

// ============================================================================
// TESTS
// ============================================================================
