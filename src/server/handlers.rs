// HTTP request handlers

use super::routes::AppState;
use crate::detector::DetectionItem;
use crate::error::{DetectorError, Result};
use crate::vision::UploadedImage;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

/// Body of a structured `/predict` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemsResponse {
    pub items: Vec<DetectionItem>,
}

/// Body of a freeform `/detect` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct DetectResponse {
    pub status: String,
    pub filename: String,
    pub detected_foods: String,
}

pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Food Detector API",
        "status": "running",
    }))
}

// Liveness only; no upstream checks
pub async fn healthz_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Handler for the structured `/predict` endpoint.
pub async fn predict_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ItemsResponse>> {
    let upload = read_upload(multipart).await?;
    info!(
        "predict: {} bytes as {}",
        upload.data.len(),
        upload.mime_type()
    );

    let items = state.detector.detect_items(upload).await?;
    Ok(Json(ItemsResponse { items }))
}

/// Handler for the freeform `/detect` endpoint.
///
/// Checks the declared content type up front and reports any later failure
/// as a plain 500, matching the endpoint's original contract.
pub async fn detect_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<DetectResponse>> {
    let upload = read_upload(multipart).await?;
    upload.ensure_declared_image()?;

    let filename = upload.filename.clone().unwrap_or_else(|| "upload".to_string());
    info!("detect: {} ({} bytes)", filename, upload.data.len());

    let detected_foods = state
        .detector
        .describe(upload)
        .await
        .map_err(DetectorError::into_lenient)?;

    Ok(Json(DetectResponse {
        status: "success".to_string(),
        filename,
        detected_foods,
    }))
}

/// Pull the `file` field out of a multipart upload.
async fn read_upload(mut multipart: Multipart) -> Result<UploadedImage> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        DetectorError::InvalidInput(format!("Failed to read multipart field: {}", e))
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let data = field
            .bytes()
            .await
            .map_err(|e| DetectorError::InvalidInput(format!("Failed to read file field: {}", e)))?;

        return Ok(UploadedImage::new(filename, content_type, data));
    }

    Err(DetectorError::InvalidInput(
        "Missing file field".to_string(),
    ))
}
