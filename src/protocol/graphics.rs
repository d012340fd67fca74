//! # ESC/POS Raster Graphics
//!
//! Raster bit image command for printing dithered images.
//!
//! ## Bit Packing
//!
//! Graphics data is packed as bytes where each bit represents one dot:
//! - Bit 7 (MSB) = leftmost dot
//! - Bit 0 (LSB) = rightmost dot
//! - 1 = black (print), 0 = white (no print)
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0xAA = 10101010 = █░█░█░█░
//! ```

use super::commands::{GS, u16_le};

/// # Print Raster Bit Image (GS v 0)
///
/// | Format | Bytes |
/// |--------|-------|
/// | ASCII  | GS v 0 m xL xH yL yH d1...dk |
/// | Hex    | 1D 76 30 m xL xH yL yH d1...dk |
///
/// ## Parameters
///
/// - `m`: density mode, 0 = normal (one dot per bit)
/// - `xL xH`: width in **bytes**, little-endian
/// - `yL yH`: height in dots, little-endian
/// - `d1...dk`: row-packed image data, k = width_bytes × height
///
/// `width_dots` that is not a multiple of 8 is padded to the byte boundary;
/// the caller's packed rows must already include that padding.
///
/// ## Example
///
/// ```
/// use boleta::protocol::graphics;
///
/// // 384 dots wide (48 bytes), 2 rows, all black
/// let data = vec![0xFF; 48 * 2];
/// let cmd = graphics::raster(384, 2, &data);
///
/// assert_eq!(&cmd[0..8], &[0x1D, 0x76, 0x30, 0, 48, 0, 2, 0]);
/// assert_eq!(cmd.len(), 8 + 48 * 2);
/// ```
pub fn raster(width_dots: u16, height: u16, data: &[u8]) -> Vec<u8> {
    let width_bytes = width_dots.div_ceil(8);
    debug_assert_eq!(data.len(), width_bytes as usize * height as usize);

    let mut cmd = Vec::with_capacity(8 + data.len());
    cmd.extend([GS, b'v', b'0', 0]);
    cmd.extend(u16_le(width_bytes));
    cmd.extend(u16_le(height));
    cmd.extend_from_slice(data);
    cmd
}
