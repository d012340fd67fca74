//! # Boleta - Thermal Receipt Print Server
//!
//! Boleta accepts text and image submissions over HTTP and prints them on
//! an ESC/POS thermal receipt printer, one job at a time. It provides:
//!
//! - **Job queue**: serialized FIFO execution against the shared printer
//! - **Rasterization**: deterministic image → 1-bit raster pipeline with
//!   Floyd–Steinberg dithering
//! - **Protocol implementation**: ESC/POS command builders
//! - **Device adapter**: formatting primitives over a serial/USB transport
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tokio::sync::Mutex;
//! use boleta::{
//!     device::SerialPrinter,
//!     jobs::{self, SharedDevice},
//!     printer::PrinterConfig,
//!     queue::JobQueue,
//! };
//!
//! # async fn example() {
//! let device: SharedDevice = Arc::new(Mutex::new(SerialPrinter::new(
//!     "/dev/usb/lp0",
//!     PrinterConfig::GENERIC58,
//! )));
//!
//! let queue = JobQueue::new();
//! queue
//!     .enqueue(jobs::text_job(device, "hello".into(), None))
//!     .await;
//!
//! // Jobs drain in the background, strictly in submission order
//! queue.join().await;
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`queue`] | Serialized print job queue |
//! | [`render`] | Image rasterization and dithering |
//! | [`jobs`] | Text and image job constructors |
//! | [`device`] | Printer device adapter and serial transport |
//! | [`protocol`] | ESC/POS command builders |
//! | [`printer`] | Printer hardware profiles |
//! | [`server`] | HTTP API |
//! | [`error`] | Error types |

pub mod device;
pub mod error;
pub mod jobs;
pub mod printer;
pub mod protocol;
pub mod queue;
pub mod render;
pub mod server;

// Re-exports for convenience
pub use error::BoletaError;
pub use printer::PrinterConfig;
pub use queue::{JobQueue, PrintJob, QueueStatus};
pub use render::{RasterImage, rasterize};
