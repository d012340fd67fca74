//! # Printer Device Adapter
//!
//! Imperative formatting primitives over a physical ESC/POS printer.
//!
//! The [`PrinterDevice`] trait is the seam between print jobs and hardware:
//! jobs call formatting primitives (align, bold, rule, text, raster, cut)
//! that buffer protocol bytes, then `flush` performs the actual transport
//! write. Tests substitute in-memory implementations; the job and queue
//! layers never know the difference.
//!
//! ## Serial Transport
//!
//! [`SerialPrinter`] writes to a serial or USB character device
//! (e.g. `/dev/usb/lp0`, `/dev/ttyUSB0`). The device node is configured in
//! raw TTY mode so binary raster data passes through unmodified, and large
//! buffers are written in chunks with a short delay so the printer's input
//! buffer is not overrun.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::BoletaError;
use crate::printer::PrinterConfig;
use crate::protocol::{Alignment, Font, commands, graphics};
use crate::render::RasterImage;

/// Default printer device path
pub const DEFAULT_DEVICE: &str = "/dev/usb/lp0";

/// Chunk size for device writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Delay between chunks (milliseconds)
const CHUNK_DELAY_MS: u64 = 2;

/// Imperative formatting primitives of a receipt printer.
///
/// Formatting calls buffer output; nothing reaches the device until
/// [`flush`](PrinterDevice::flush) is awaited. One flush corresponds to one
/// physical print operation, so a job builds its whole receipt and flushes
/// exactly once at the end.
#[async_trait]
pub trait PrinterDevice: Send {
    /// Set horizontal alignment for following lines.
    fn align(&mut self, alignment: Alignment);

    /// Enable or disable bold text.
    fn bold(&mut self, on: bool);

    /// Select the printer font.
    fn font(&mut self, font: Font);

    /// Print a full-width horizontal rule.
    fn rule(&mut self);

    /// Print one line of text.
    fn text_line(&mut self, line: &str);

    /// Print a rasterized image.
    fn raster(&mut self, image: &RasterImage);

    /// Feed the given number of blank lines.
    fn feed(&mut self, lines: u8);

    /// Cut the paper (partial cut, with feed past the printed content).
    fn cut(&mut self);

    /// Write everything buffered so far to the device and wait for the
    /// write to complete.
    async fn flush(&mut self) -> Result<(), BoletaError>;
}

/// ESC/POS printer on a serial or USB character device.
pub struct SerialPrinter {
    path: PathBuf,
    config: PrinterConfig,
    buffer: Vec<u8>,
}

impl SerialPrinter {
    /// Create a printer handle for the given device path.
    ///
    /// The device is not opened until the first flush, so a handle can be
    /// created while the printer is still offline.
    pub fn new<P: AsRef<Path>>(path: P, config: PrinterConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            config,
            buffer: commands::init(),
        }
    }

    /// The configured hardware profile.
    pub fn config(&self) -> PrinterConfig {
        self.config
    }
}

#[async_trait]
impl PrinterDevice for SerialPrinter {
    fn align(&mut self, alignment: Alignment) {
        self.buffer.extend(commands::align(alignment));
    }

    fn bold(&mut self, on: bool) {
        self.buffer.extend(commands::bold(on));
    }

    fn font(&mut self, font: Font) {
        self.buffer.extend(commands::font(font));
    }

    fn rule(&mut self) {
        let line = "-".repeat(self.config.columns as usize);
        self.buffer.extend(commands::text(&line));
    }

    fn text_line(&mut self, line: &str) {
        self.buffer.extend(commands::text(line));
    }

    fn raster(&mut self, image: &RasterImage) {
        // GS v 0 carries the row count in a u16, so tall rasters are split
        // into bands; consecutive bands print seamlessly
        let row_bytes = (image.width() as usize).div_ceil(8);
        let band_rows = self.config.max_chunk_rows as usize;
        let packed = image.packed();
        for band in packed.chunks(row_bytes * band_rows) {
            let rows = band.len() / row_bytes;
            self.buffer
                .extend(graphics::raster(image.width() as u16, rows as u16, band));
        }
    }

    fn feed(&mut self, lines: u8) {
        self.buffer.extend(commands::feed(lines));
    }

    fn cut(&mut self) {
        self.buffer.extend(commands::cut_partial_feed());
    }

    async fn flush(&mut self) -> Result<(), BoletaError> {
        // Start the next print operation from a clean printer state
        let data = std::mem::replace(&mut self.buffer, commands::init());
        let path = self.path.clone();

        debug!(bytes = data.len(), path = %path.display(), "flushing to device");

        // Blocking file I/O with inter-chunk sleeps stays off the runtime
        tokio::task::spawn_blocking(move || write_device(&path, &data))
            .await
            .map_err(|e| BoletaError::Device(format!("Write task failed: {}", e)))?
    }
}

/// Open the device node, configure it raw, and write data in chunks.
fn write_device(path: &Path, data: &[u8]) -> Result<(), BoletaError> {
    let mut file = OpenOptions::new().write(true).open(path).map_err(|e| {
        BoletaError::Device(format!("Failed to open {}: {}", path.display(), e))
    })?;

    configure_tty_raw(&file)?;

    for chunk in data.chunks(CHUNK_SIZE) {
        file.write_all(chunk)
            .map_err(|e| BoletaError::Device(format!("Write failed: {}", e)))?;
        if data.len() > CHUNK_SIZE {
            std::thread::sleep(Duration::from_millis(CHUNK_DELAY_MS));
        }
    }

    file.flush()
        .map_err(|e| BoletaError::Device(format!("Flush failed: {}", e)))
}

/// Configure a device node for raw binary output.
///
/// Disabling output post-processing and XON/XOFF flow control is critical:
/// 0x11 (XON) and 0x13 (XOFF) appear routinely in raster data, and OPOST
/// would translate line feeds inside image bytes.
///
/// Non-TTY nodes (USB line printer devices) fail `tcgetattr`; that is fine,
/// they need no configuration.
#[cfg(unix)]
fn configure_tty_raw(file: &std::fs::File) -> Result<(), BoletaError> {
    use std::mem::MaybeUninit;
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();

    let mut termios = MaybeUninit::uninit();
    if unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) } != 0 {
        // Not a TTY — nothing to configure
        return Ok(());
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);
    termios.c_oflag &= !libc::OPOST;
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) } != 0 {
        return Err(BoletaError::Device(format!(
            "tcsetattr failed: {}",
            std::io::Error::last_os_error()
        )));
    }

    Ok(())
}

#[cfg(not(unix))]
fn configure_tty_raw(_file: &std::fs::File) -> Result<(), BoletaError> {
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, Luma};
    use std::io::Cursor;

    fn white_raster(src_width: u32, src_height: u32) -> RasterImage {
        let img = GrayImage::from_pixel(src_width, src_height, Luma([255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageLuma8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        crate::render::rasterize(&bytes, 384).unwrap()
    }

    /// Walk a buffer of GS v 0 commands and return the row count of each.
    fn raster_band_rows(data: &[u8]) -> Vec<usize> {
        let mut bands = Vec::new();
        let mut pos = 0;
        while pos < data.len() {
            assert_eq!(&data[pos..pos + 4], [0x1D, 0x76, 0x30, 0x00]);
            let width_bytes = u16::from_le_bytes([data[pos + 4], data[pos + 5]]) as usize;
            let rows = u16::from_le_bytes([data[pos + 6], data[pos + 7]]) as usize;
            bands.push(rows);
            pos += 8 + width_bytes * rows;
        }
        bands
    }

    #[test]
    fn test_new_buffer_starts_with_init() {
        let printer = SerialPrinter::new("/dev/null", PrinterConfig::GENERIC58);
        assert_eq!(&printer.buffer[0..2], &[0x1B, 0x40]);
    }

    #[test]
    fn test_rule_spans_columns() {
        let mut printer = SerialPrinter::new("/dev/null", PrinterConfig::GENERIC58);
        let before = printer.buffer.len();
        printer.rule();
        // 32 dashes plus LF
        assert_eq!(printer.buffer.len() - before, 33);
        assert!(printer.buffer[before..].starts_with(b"----"));
    }

    #[test]
    fn test_primitives_append_in_order() {
        let mut printer = SerialPrinter::new("/dev/null", PrinterConfig::GENERIC58);
        printer.buffer.clear();
        printer.align(Alignment::Center);
        printer.bold(true);
        printer.text_line("RECEIPT");
        printer.cut();

        let mut expected = Vec::new();
        expected.extend(commands::align(Alignment::Center));
        expected.extend(commands::bold(true));
        expected.extend(commands::text("RECEIPT"));
        expected.extend(commands::cut_partial_feed());
        assert_eq!(printer.buffer, expected);
    }

    #[test]
    fn test_short_raster_is_a_single_band() {
        let raster = white_raster(384, 10);
        let mut printer = SerialPrinter::new("/dev/null", PrinterConfig::GENERIC58);
        printer.buffer.clear();
        printer.raster(&raster);
        assert_eq!(raster_band_rows(&printer.buffer), vec![10]);
    }

    #[test]
    fn test_tall_raster_splits_into_bands() {
        // A 1x200 source upscaled to width 384 becomes 76800 rows, far more
        // than one GS v 0 header can describe
        let raster = white_raster(1, 200);
        assert!(raster.height() > u16::MAX as u32);

        let mut printer = SerialPrinter::new("/dev/null", PrinterConfig::GENERIC58);
        printer.buffer.clear();
        printer.raster(&raster);

        let bands = raster_band_rows(&printer.buffer);
        let max_rows = PrinterConfig::GENERIC58.max_chunk_rows as usize;
        assert!(bands.len() > 1);
        assert!(bands.iter().all(|&rows| rows > 0 && rows <= max_rows));
        assert_eq!(bands.iter().sum::<usize>(), raster.height() as usize);
    }

    #[tokio::test]
    async fn test_flush_resets_buffer() {
        let mut printer = SerialPrinter::new("/dev/null", PrinterConfig::GENERIC58);
        printer.text_line("hello");
        printer.flush().await.unwrap();
        // Buffer holds only the init preamble for the next job
        assert_eq!(printer.buffer, commands::init());
    }

    #[tokio::test]
    async fn test_flush_missing_device_fails() {
        let mut printer = SerialPrinter::new(
            "/nonexistent/printer0",
            PrinterConfig::GENERIC58,
        );
        printer.text_line("hello");
        let err = printer.flush().await.unwrap_err();
        assert!(matches!(err, BoletaError::Device(_)));
    }
}
