//! # Printer Configuration
//!
//! Hardware specifications for supported thermal printers.
//!
//! | Model | Width (dots) | Resolution | Paper |
//! |-------|--------------|------------|-------|
//! | GENERIC58 | 384 | 203 DPI | 58mm |
//!
//! ## Usage
//!
//! ```
//! use boleta::printer::PrinterConfig;
//!
//! let config = PrinterConfig::GENERIC58;
//! println!("Print width: {} dots ({} bytes)",
//!          config.width_dots,
//!          config.width_bytes);
//! ```

/// Hardware characteristics of a thermal printer.
///
/// - **width_dots**: maximum printable width in dots (pixels)
/// - **width_bytes**: width in bytes (width_dots / 8)
/// - **dpi**: resolution in dots per inch
/// - **columns**: text columns with the default 12-dot font
#[derive(Debug, Clone, Copy)]
pub struct PrinterConfig {
    /// Printer model name
    pub name: &'static str,

    /// Maximum print width in dots (pixels)
    pub width_dots: u16,

    /// Print width in bytes (width_dots / 8)
    pub width_bytes: u16,

    /// Resolution in dots per inch
    pub dpi: u16,

    /// Text columns with Font A (12 dots/character)
    pub columns: u16,

    /// Maximum rows per raster command.
    ///
    /// The GS v 0 header carries height in a u16, and long bands keep the
    /// printer's input buffer full; tall images are split into bands of at
    /// most this many rows.
    pub max_chunk_rows: u16,
}

impl PrinterConfig {
    /// # Generic 58mm ESC/POS Configuration
    ///
    /// The common 58mm paper class of ESC/POS receipt printers.
    ///
    /// ## Print Area
    ///
    /// ```text
    /// ├─ 5mm ─┼────── 48mm printable ──────┼─ 5mm ─┤
    /// │ margin │        384 dots           │ margin │
    /// ```
    pub const GENERIC58: Self = Self {
        name: "Generic 58mm",
        width_dots: 384,
        width_bytes: 48,
        dpi: 203,
        columns: 32,
        max_chunk_rows: 1024,
    };

    /// Calculate dots per millimeter
    #[inline]
    pub fn dots_per_mm(&self) -> f32 {
        self.dpi as f32 / 25.4
    }

    /// Calculate print width in millimeters
    #[inline]
    pub fn width_mm(&self) -> f32 {
        self.width_dots as f32 / self.dots_per_mm()
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::GENERIC58
    }
}
