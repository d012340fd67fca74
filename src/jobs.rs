//! # Print Job Adapters
//!
//! Constructors for the two job kinds the queue executes: text receipts and
//! image prints. Both wrap their payload in the same receipt frame — a
//! centered bold title, rules around the body, a timestamp footer and a
//! paper cut — and flush once at the end so one job is one physical print.

use std::sync::Arc;

use chrono::Local;
use tokio::sync::Mutex;

use crate::device::PrinterDevice;
use crate::protocol::Alignment;
use crate::queue::PrintJob;
use crate::render::RasterImage;

/// Shared handle to the printer device.
///
/// The queue already guarantees at most one job runs at a time; the mutex
/// exists so job futures can be `'static` while the device lives as long as
/// the process.
pub type SharedDevice = Arc<Mutex<dyn PrinterDevice + Send>>;

/// Build a text receipt job.
///
/// Layout: centered bold "RECEIPT" title, rule, left-aligned body text,
/// blank line, rule, timestamp, optional attribution, rule, cut.
pub fn text_job(device: SharedDevice, text: String, from: Option<String>) -> PrintJob {
    PrintJob::new("text", async move {
        let mut dev = device.lock().await;
        header(&mut *dev, "RECEIPT");
        for line in text.lines() {
            dev.text_line(line);
        }
        dev.text_line("");
        footer(&mut *dev, from.as_deref());
        dev.flush().await
    })
}

/// Build an image print job.
///
/// Same frame as [`text_job`] with an "IMAGE PRINT" title and the raster
/// embedded through the device's image primitive. The raster is produced
/// before the job is created, so a bad image never enters the queue.
pub fn image_job(device: SharedDevice, image: RasterImage, from: Option<String>) -> PrintJob {
    PrintJob::new("image", async move {
        let mut dev = device.lock().await;
        header(&mut *dev, "IMAGE PRINT");
        dev.raster(&image);
        footer(&mut *dev, from.as_deref());
        dev.flush().await
    })
}

/// Centered bold title over a rule, leaving alignment at left for the body.
fn header(dev: &mut (dyn PrinterDevice + Send), title: &str) {
    dev.align(Alignment::Center);
    dev.bold(true);
    dev.text_line(title);
    dev.bold(false);
    dev.align(Alignment::Left);
    dev.rule();
}

/// Rule, timestamp, optional attribution, closing rule, feed and cut.
fn footer(dev: &mut (dyn PrinterDevice + Send), from: Option<&str>) {
    dev.rule();
    dev.text_line(&timestamp_line());
    if let Some(from) = from {
        dev.text_line(&format!("from: {}", from));
    }
    dev.rule();
    dev.feed(3);
    dev.cut();
}

/// Local date and 24-hour time, e.g. `2026-08-27 14:30`.
fn timestamp_line() -> String {
    Local::now().format("%Y-%m-%d %H:%M").to_string()
}

// ============================================================================
// TESTS
// ============================================================================
