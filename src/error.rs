//! # Error Types
//!
//! This module defines error types used throughout the boleta crate.

use thiserror::Error;

/// Main error type for boleta operations
#[derive(Debug, Error)]
pub enum BoletaError {
    /// Uploaded bytes are not a decodable image
    #[error("Decode error: {0}")]
    Decode(String),

    /// Device-level errors (transport open, write, flush)
    #[error("Device error: {0}")]
    Device(String),

    /// Missing or malformed submission fields
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
