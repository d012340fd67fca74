//! Print submission and status API handlers.
//!
//! All print endpoints follow the same contract: validate, enqueue, respond
//! immediately. The response acknowledges acceptance into the queue, not
//! print completion — printing is asynchronous and failures after this
//! point surface in logs and in the queue status, never to the submitter.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::info;

use crate::jobs;
use crate::queue::QueueStatus;
use crate::render;

use super::state::AppState;

type ApiError = (StatusCode, Json<serde_json::Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(serde_json::json!({"success": false, "error": message.into()})),
    )
}

fn accepted(status: QueueStatus) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "queued": status.length,
        "printing": status.printing,
    }))
}

/// Request body for text receipt printing.
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
    #[serde(default)]
    pub from: Option<String>,
}

/// Request body for the admin enable flag.
#[derive(Debug, Deserialize)]
pub struct EnabledRequest {
    pub enabled: bool,
}

fn ensure_enabled(state: &AppState) -> Result<(), ApiError> {
    if state.enabled.load(Ordering::Relaxed) {
        Ok(())
    } else {
        Err(api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "Printing is disabled",
        ))
    }
}

/// POST /api/receipt/print - Queue a text receipt.
pub async fn print_text(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TextRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    ensure_enabled(&state)?;

    if req.text.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Missing text field"));
    }

    let job = jobs::text_job(state.device.clone(), req.text, req.from);
    state.queue.enqueue(job).await;

    Ok(accepted(state.queue.status().await))
}

/// POST /api/image/print - Queue an image print.
///
/// Multipart form with an `image` file field and an optional `from` text
/// field. The upload is rasterized here, before anything is enqueued, so
/// undecodable bytes are rejected with 400 and never reach the queue.
pub async fn print_image(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    ensure_enabled(&state)?;

    let mut image_bytes: Option<Vec<u8>> = None;
    let mut from: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        api_error(StatusCode::BAD_REQUEST, format!("Multipart error: {}", e))
    })? {
        match field.name().unwrap_or("") {
            "image" => {
                let bytes = field.bytes().await.map_err(|e| {
                    api_error(
                        StatusCode::BAD_REQUEST,
                        format!("Failed to read image: {}", e),
                    )
                })?;
                image_bytes = Some(bytes.to_vec());
            }
            "from" => {
                from = field.text().await.ok().filter(|s| !s.trim().is_empty());
            }
            _ => {}
        }
    }

    let image_bytes =
        image_bytes.ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "No image field found"))?;

    // Decode + dither is CPU work; keep it off the async runtime
    let target_width = state.printer.width_dots as u32;
    let raster = tokio::task::spawn_blocking(move || render::rasterize(&image_bytes, target_width))
        .await
        .map_err(|e| {
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Processing error: {}", e),
            )
        })?
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    info!(
        width = raster.width(),
        height = raster.height(),
        "image rasterized for printing"
    );

    let job = jobs::image_job(state.device.clone(), raster, from);
    state.queue.enqueue(job).await;

    Ok(accepted(state.queue.status().await))
}

/// GET /api/queue/status - Queue depth and printing flag.
pub async fn queue_status(State(state): State<Arc<AppState>>) -> Json<QueueStatus> {
    Json(state.queue.status().await)
}

/// POST /api/admin/enabled - Toggle print submissions.
pub async fn set_enabled(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EnabledRequest>,
) -> Json<serde_json::Value> {
    state.enabled.store(req.enabled, Ordering::Relaxed);
    info!(enabled = req.enabled, "print submissions toggled");
    Json(serde_json::json!({"success": true, "enabled": req.enabled}))
}
