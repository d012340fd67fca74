//! Server state and configuration.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use crate::jobs::SharedDevice;
use crate::printer::PrinterConfig;
use crate::queue::JobQueue;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Path to the printer device (e.g., "/dev/usb/lp0")
    pub device_path: String,
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
}

/// Application state shared across handlers.
pub struct AppState {
    pub printer: PrinterConfig,
    pub queue: Arc<JobQueue>,
    pub device: SharedDevice,
    /// Admin kill switch: when false, print submissions get 503.
    pub enabled: AtomicBool,
}

impl AppState {
    pub fn new(printer: PrinterConfig, queue: Arc<JobQueue>, device: SharedDevice) -> Self {
        Self {
            printer,
            queue,
            device,
            enabled: AtomicBool::new(true),
        }
    }
}
