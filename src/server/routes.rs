// HTTP routes configuration

use super::handlers::{
    detect_handler, health_handler, healthz_handler, predict_handler, root_handler,
};
use super::middleware::request_id_layers;
use crate::config::AppConfig;
use crate::detector::FoodDetector;
use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub detector: Arc<FoodDetector>,
}

pub fn create_router(config: AppConfig, detector: FoodDetector) -> Router {
    // Multipart framing adds overhead on top of the image itself
    let body_limit = config.detection.max_upload_bytes + 64 * 1024;

    let state = AppState {
        config,
        detector: Arc::new(detector),
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/healthz", get(healthz_handler))
        .route("/predict", post(predict_handler))
        .route("/detect", post(detect_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(tower_http::limit::RequestBodyLimitLayer::new(body_limit))
        // Open to all origins; tighten before exposing this publicly
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state)
}
