//! # ESC/POS Protocol
//!
//! Byte-sequence builders for the ESC/POS command language spoken by most
//! generic thermal receipt printers.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`commands`] | Text, formatting and paper control commands |
//! | [`graphics`] | Raster image commands |

pub mod commands;
pub mod graphics;

pub use commands::{Alignment, Font};
