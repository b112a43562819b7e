// Detection pipeline and the vision-model seam

use super::items::{parse_structured_reply, DetectionItem, DetectionResult, ResponseMode};
use crate::config::DetectionConfig;
use crate::error::Result;
use crate::vision::UploadedImage;
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use tracing::debug;

/// Generation options attached to each model request.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub temperature: f32,
    /// Ask the model to reply with JSON instead of prose.
    pub json_output: bool,
}

/// One request to the vision model, built fresh per upload.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub mime_type: String,
    pub data: Bytes,
    pub instruction: String,
    pub options: GenerationOptions,
}

/// An upstream capable of answering a question about an image.
///
/// The production implementation is [`crate::gemini::GeminiClient`]; tests
/// substitute a scripted model.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Submit the request and return the model's reply text.
    async fn generate(&self, request: ModelRequest) -> Result<String>;
}

/// The image classification adapter.
///
/// Holds the model handle and the detection configuration; no per-request
/// state survives a call.
pub struct FoodDetector {
    model: Arc<dyn VisionModel>,
    config: DetectionConfig,
}

impl FoodDetector {
    pub fn new(model: Arc<dyn VisionModel>, config: DetectionConfig) -> Self {
        Self { model, config }
    }

    /// Run detection in the configured default response mode.
    pub async fn detect(&self, upload: UploadedImage) -> Result<DetectionResult> {
        match self.config.mode {
            ResponseMode::Structured => Ok(DetectionResult::Items(self.detect_items(upload).await?)),
            ResponseMode::Freeform => Ok(DetectionResult::Text(self.describe(upload).await?)),
        }
    }

    /// Structured mode: validated upload in, typed item list out.
    pub async fn detect_items(&self, upload: UploadedImage) -> Result<Vec<DetectionItem>> {
        let reply = self.generate(upload, ResponseMode::Structured).await?;
        let items = parse_structured_reply(&reply)?;
        debug!("Parsed {} detected items", items.len());
        Ok(items)
    }

    /// Freeform mode: validated upload in, raw descriptive text out.
    pub async fn describe(&self, upload: UploadedImage) -> Result<String> {
        self.generate(upload, ResponseMode::Freeform).await
    }

    async fn generate(&self, upload: UploadedImage, mode: ResponseMode) -> Result<String> {
        upload.validate(self.config.max_upload_bytes)?;

        let instruction = match mode {
            ResponseMode::Structured => self.config.prompt.clone(),
            ResponseMode::Freeform => self.config.freeform_prompt.clone(),
        };

        let request = ModelRequest {
            mime_type: upload.mime_type(),
            data: upload.data,
            instruction,
            options: GenerationOptions {
                temperature: self.config.temperature,
                json_output: mode == ResponseMode::Structured,
            },
        };

        debug!(
            "Submitting {} bytes ({}) to the model",
            request.data.len(),
            request.mime_type
        );
        self.model.generate(request).await
    }
}
