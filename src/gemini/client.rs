// Gemini API client

use super::models::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, InlineData, Part,
};
use crate::config::GeminiConfig;
use crate::detector::{ModelRequest, VisionModel};
use crate::error::{DetectorError, Result};
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

/// Client for the Google Gemini generative language API.
///
/// Authenticates with an API key and exposes blocking content generation.
/// The client is the service's only upstream dependency; failures here are
/// reported per request and never abort the process.
pub struct GeminiClient {
    http_client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new Gemini client with a pooled HTTP transport.
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()
            .map_err(|e| DetectorError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created HTTP client with connection pooling and keep-alive");

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    /// Call Gemini `generateContent` (blocking).
    ///
    /// No retries: a failure is reported to the caller of the current
    /// request and the next request starts fresh.
    pub async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| DetectorError::Config("GOOGLE_API_KEY is not set".to_string()))?;

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.api_base_url, self.config.model
        );
        debug!("Calling generateContent for model {}", self.config.model);

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| DetectorError::Upstream(format!("HTTP error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "Gemini API error: HTTP {} - Response body: {}",
                status, error_text
            );
            let message = Self::extract_error_message(&error_text).unwrap_or(error_text);
            return Err(DetectorError::Upstream(format!(
                "HTTP {}: {}",
                status.as_u16(),
                message
            )));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| DetectorError::Upstream(format!("Failed to read response body: {}", e)))?;

        debug!(
            "Raw Gemini response (first 500 chars): {}",
            response_text.chars().take(500).collect::<String>()
        );

        serde_json::from_str(&response_text).map_err(|e| {
            error!("Failed to parse Gemini response: {}", e);
            error!("Response body: {}", response_text);
            DetectorError::Upstream(format!("Response parsing error: {}", e))
        })
    }

    /// Extract error message from API response JSON
    fn extract_error_message(response_text: &str) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(serde::Deserialize)]
        struct ErrorDetail {
            message: Option<String>,
            status: Option<String>,
        }

        if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(response_text) {
            if let Some(error) = error_resp.error {
                return error.message.or(error.status);
            }
        }
        None
    }
}

#[async_trait]
impl VisionModel for GeminiClient {
    async fn generate(&self, request: ModelRequest) -> Result<String> {
        // The image part goes first, then the instruction
        let wire_request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: request.mime_type.clone(),
                            data: base64::engine::general_purpose::STANDARD.encode(&request.data),
                        },
                    },
                    Part::Text {
                        text: request.instruction.clone(),
                    },
                ],
            }],
            generation_config: Some(GenerationConfig {
                temperature: Some(request.options.temperature),
                response_mime_type: request
                    .options
                    .json_output
                    .then(|| "application/json".to_string()),
                max_output_tokens: None,
            }),
        };

        let response = self.generate_content(wire_request).await?;

        if let Some(usage) = &response.usage_metadata {
            debug!(
                "Token usage: prompt={:?} candidates={:?} total={:?}",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        response
            .first_text()
            .map(str::to_owned)
            .ok_or_else(|| DetectorError::Upstream("Model reply contained no text".to_string()))
    }
}
