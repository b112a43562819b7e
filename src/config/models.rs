//! Configuration data structures for the food-detector service.
//!
//! This module defines the schema for the application settings, including
//! server parameters, the upstream Gemini connection, and the detection
//! behavior itself.

use crate::detector::ResponseMode;
use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Detection prompt and response shaping.
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `0.0.0.0`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on. The bare `PORT`
    /// environment variable overrides this.
    /// Default: `8000`
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Settings for the upstream Gemini API connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Base URL for the Gemini generative language API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// The vision-capable model to query.
    /// Default: `gemini-2.5-flash`
    #[serde(default = "default_model")]
    pub model: String,

    /// API key for the Gemini API. Populated from the bare `GOOGLE_API_KEY`
    /// environment variable when present.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Whether startup should fail when no API key is configured.
    /// When `false` the service starts anyway and logs a warning.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub require_api_key: bool,

    /// Connection and request timeout in seconds.
    /// Default: `60`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Settings controlling what the model is asked and how replies are shaped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Instruction sent with each image when structured output is requested.
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Instruction used when the model replies in free text.
    #[serde(default = "default_freeform_prompt")]
    pub freeform_prompt: String,

    /// Default response mode for library callers: `structured` | `freeform`.
    /// The `/predict` and `/detect` endpoints pin their own mode.
    #[serde(default)]
    pub mode: ResponseMode,

    /// Sampling temperature. Kept low so identical photos produce
    /// identical item lists.
    /// Default: `0.2`
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum accepted upload size in bytes.
    /// Default: `10485760` (10MB)
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default trait implementations linking to custom logic

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            model: default_model(),
            api_key: None,
            require_api_key: true,
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            freeform_prompt: default_freeform_prompt(),
            mode: ResponseMode::default(),
            temperature: default_temperature(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Helper functions for serde defaults and shared constants

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> u64 {
    60
}

fn default_prompt() -> String {
    "Identify distinct objects in this photo. only include items which are edible \
     Return JSON with fields: items:[{label:string, count:int}]. If unsure, best guess."
        .to_string()
}

fn default_freeform_prompt() -> String {
    "List the distinct edible items you can see in this photo.".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert!(config.gemini.api_key.is_none());
        assert!(config.gemini.require_api_key);
        assert_eq!(config.detection.mode, ResponseMode::Structured);
        assert_eq!(config.detection.max_upload_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_prompt_mentions_items_shape() {
        // The structured parser expects an `items` array; the default
        // instruction must keep asking for it.
        let config = DetectionConfig::default();
        assert!(config.prompt.contains("items:[{label:string, count:int}]"));
    }
}
