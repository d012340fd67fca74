//! # ESC/POS Protocol Commands
//!
//! This module implements the ESC/POS command subset used by generic thermal
//! receipt printers (Epson TM series and the many 58mm/80mm clones).
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `LF`
//! - Two bytes: `ESC @`, `ESC E n`
//! - Multi-byte with parameters: `ESC d n`, `GS V m n`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x0180 is sent as bytes `[0x80, 0x01]`

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for graphics and cutter commands. Hex: 0x1D, Decimal: 29.
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print the line buffer and advance one line
pub const LF: u8 = 0x0A;

/// Encode a u16 as little-endian bytes (low byte first).
#[inline]
pub fn u16_le(value: u16) -> [u8; 2] {
    [(value & 0xFF) as u8, (value >> 8) as u8]
}

// ============================================================================
// FORMATTING STATE
// ============================================================================

/// Horizontal alignment for text and images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// Built-in printer fonts.
///
/// | Font | Cell size | Columns at 384 dots |
/// |------|-----------|---------------------|
/// | A | 12x24 | 32 |
/// | B | 9x17 | 42 |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    A,
    B,
}

// ============================================================================
// COMMANDS
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Resets the printer to its power-on default state. Clears the print
/// buffer and resets formatting (bold, alignment, font) without touching
/// stored configuration.
///
/// ```
/// use boleta::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

/// # Emphasis On/Off (ESC E n)
///
/// | Format | Bytes |
/// |--------|-------|
/// | Hex    | 1B 45 n |
///
/// `n = 1` enables bold, `n = 0` disables it.
#[inline]
pub fn bold(on: bool) -> Vec<u8> {
    vec![ESC, b'E', on as u8]
}

/// # Select Justification (ESC a n)
///
/// Applies to all following lines until changed. Must be issued at the
/// start of a line to take effect on it.
#[inline]
pub fn align(alignment: Alignment) -> Vec<u8> {
    let n = match alignment {
        Alignment::Left => 0,
        Alignment::Center => 1,
        Alignment::Right => 2,
    };
    vec![ESC, b'a', n]
}

/// # Select Character Font (ESC M n)
#[inline]
pub fn font(font: Font) -> Vec<u8> {
    let n = match font {
        Font::A => 0,
        Font::B => 1,
    };
    vec![ESC, b'M', n]
}

/// # Print and Feed n Lines (ESC d n)
#[inline]
pub fn feed(lines: u8) -> Vec<u8> {
    vec![ESC, b'd', lines]
}

/// # Text Line
///
/// Emits the text followed by LF. ESC/POS text is a single-byte encoding;
/// characters outside printable ASCII are replaced with `?` rather than
/// risking a codepage mismatch on the device.
pub fn text(line: &str) -> Vec<u8> {
    let mut bytes: Vec<u8> = line
        .chars()
        .map(|c| {
            if c.is_ascii() && (!c.is_ascii_control() || c == '\t') {
                c as u8
            } else {
                b'?'
            }
        })
        .collect();
    bytes.push(LF);
    bytes
}

/// # Partial Cut with Feed (GS V 66 n)
///
/// Feeds `n` motion units past the last printed line, then performs a
/// partial cut. Feeding first keeps the cut below the printed content.
#[inline]
pub fn cut_partial_feed() -> Vec<u8> {
    vec![GS, b'V', 66, 0]
}

/// # Full Cut with Feed (GS V 65 n)
#[inline]
pub fn cut_full_feed() -> Vec<u8> {
    vec![GS, b'V', 65, 0]
}

// ============================================================================
// TESTS
// ============================================================================
