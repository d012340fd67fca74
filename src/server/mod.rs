//! # HTTP Server for Receipt and Image Printing
//!
//! Web interface for submitting print jobs over HTTP.
//!
//! ## Usage
//!
//! ```bash
//! boleta serve --listen 0.0.0.0:8080 --device /dev/usb/lp0
//! ```
//!
//! ## Endpoints
//!
//! | Route | Method | Description |
//! |-------|--------|-------------|
//! | `/api/receipt/print` | POST | Queue a text receipt (`{text, from?}`) |
//! | `/api/image/print` | POST | Queue an image print (multipart upload) |
//! | `/api/queue/status` | GET | Queue depth and printing flag |
//! | `/api/admin/enabled` | POST | Enable/disable print submissions |

mod handlers;
mod state;

pub use state::ServerConfig;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::device::SerialPrinter;
use crate::error::BoletaError;
use crate::jobs::SharedDevice;
use crate::printer::PrinterConfig;
use crate::queue::JobQueue;
use state::AppState;

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use boleta::server::{ServerConfig, serve};
///
/// # async fn example() -> Result<(), boleta::error::BoletaError> {
/// let config = ServerConfig {
///     device_path: "/dev/usb/lp0".to_string(),
///     listen_addr: "0.0.0.0:8080".to_string(),
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
/// Build the application router with its shared state.
///
/// Split out of [`serve`] so tests can drive the handlers directly without
/// binding a socket.
pub fn app(config: &ServerConfig) -> Router {
    let printer = PrinterConfig::default();
    let device: SharedDevice =
        Arc::new(Mutex::new(SerialPrinter::new(&config.device_path, printer)));
    let queue = JobQueue::new();
    let app_state = Arc::new(AppState::new(printer, queue, device));

    Router::new()
        // Receipt API
        .route("/api/receipt/print", post(handlers::print_text))
        // Image API (20MB limit for uploads)
        .route(
            "/api/image/print",
            post(handlers::print_image).layer(DefaultBodyLimit::max(20 * 1024 * 1024)),
        )
        // Observability
        .route("/api/queue/status", get(handlers::queue_status))
        // Admin
        .route("/api/admin/enabled", post(handlers::set_enabled))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

pub async fn serve(config: ServerConfig) -> Result<(), BoletaError> {
    let app = app(&config);

    info!(listen = %config.listen_addr, device = %config.device_path, "boleta server starting");

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            BoletaError::Device(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| BoletaError::Device(format!("Server error: {}", e)))?;

    Ok(())
}
