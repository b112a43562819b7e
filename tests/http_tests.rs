// Router-level tests driving the full HTTP surface with a scripted model

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use base64::Engine;
use food_detector::config::AppConfig;
use food_detector::detector::{FoodDetector, ModelRequest, VisionModel};
use food_detector::error::{DetectorError, Result};
use food_detector::server::create_router;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

// 1x1 PNG
const TINY_PNG_B64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

fn tiny_png() -> Vec<u8> {
    base64::engine::general_purpose::STANDARD
        .decode(TINY_PNG_B64)
        .unwrap()
}

struct ScriptedModel(std::result::Result<String, String>);

#[async_trait]
impl VisionModel for ScriptedModel {
    async fn generate(&self, _request: ModelRequest) -> Result<String> {
        match &self.0 {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(DetectorError::Upstream(message.clone())),
        }
    }
}

fn app_with_reply(reply: std::result::Result<&str, &str>) -> Router {
    let config = AppConfig::default();
    let model = Arc::new(ScriptedModel(
        reply.map(str::to_owned).map_err(str::to_owned),
    ));
    let detector = FoodDetector::new(model, config.detection.clone());
    create_router(config, detector)
}

fn multipart_request(
    uri: &str,
    filename: &str,
    content_type: &str,
    data: &[u8],
) -> Request<Body> {
    let boundary = "food-detector-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_healthz_ignores_upstream() {
    // The model is permanently broken; liveness must not care
    let app = app_with_reply(Err("model is down"));

    let response = app
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!({ "ok": true }));
}

#[tokio::test]
async fn test_health_reports_healthy() {
    let app = app_with_reply(Err("model is down"));

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "status": "healthy" })
    );
}

#[tokio::test]
async fn test_root_banner() {
    let app = app_with_reply(Ok(""));

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["message"].is_string());
    assert!(json["status"].is_string());
}

#[tokio::test]
async fn test_predict_returns_items_verbatim() {
    let app = app_with_reply(Ok(r#"{"items":[{"label":"apple","count":2}]}"#));

    let response = app
        .oneshot(multipart_request("/predict", "plate.png", "image/png", &tiny_png()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], br#"{"items":[{"label":"apple","count":2}]}"#);
}

#[tokio::test]
async fn test_predict_rejects_empty_file() {
    let app = app_with_reply(Ok(r#"{"items":[]}"#));

    let response = app
        .oneshot(multipart_request("/predict", "empty.png", "image/png", b""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_predict_rejects_non_image_payload() {
    let app = app_with_reply(Ok(r#"{"items":[]}"#));

    let response = app
        .oneshot(multipart_request(
            "/predict",
            "notes.txt",
            "image/png",
            b"just some text bytes",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_predict_rejects_missing_file_field() {
    let app = app_with_reply(Ok(r#"{"items":[]}"#));

    let boundary = "food-detector-test-boundary";
    let body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nhello\r\n--{boundary}--\r\n"
    );
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_predict_maps_bad_reply_to_502() {
    let app = app_with_reply(Ok("I think I can see an apple and maybe"));

    let response = app
        .oneshot(multipart_request("/predict", "plate.png", "image/png", &tiny_png()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["error"]["type"], "upstream_error");
}

#[tokio::test]
async fn test_predict_maps_model_failure_to_502() {
    let app = app_with_reply(Err("Model call failed: quota exceeded"));

    let response = app
        .oneshot(multipart_request("/predict", "plate.png", "image/png", &tiny_png()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_detect_returns_freeform_payload() {
    let app = app_with_reply(Ok("Rice, beans, and a fried plantain."));

    let response = app
        .oneshot(multipart_request("/detect", "lunch.jpg", "image/jpeg", &tiny_png()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "success");
    assert_eq!(json["filename"], "lunch.jpg");
    assert_eq!(json["detected_foods"], "Rice, beans, and a fried plantain.");
}

#[tokio::test]
async fn test_detect_rejects_non_image_content_type() {
    let app = app_with_reply(Ok("unused"));

    let response = app
        .oneshot(multipart_request(
            "/detect",
            "notes.txt",
            "text/plain",
            b"hello",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_detect_maps_model_failure_to_500() {
    let app = app_with_reply(Err("Model call failed"));

    let response = app
        .oneshot(multipart_request("/detect", "lunch.jpg", "image/jpeg", &tiny_png()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"]["type"], "internal_error");
}
