// Configuration module

mod models;

pub use models::*;

use crate::error::{DetectorError, Result};
use config::{Config, Environment, File};
use std::path::PathBuf;

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest)
    /// 2. Config file
    /// 3. Defaults (lowest)
    ///
    /// `GOOGLE_API_KEY` and `PORT` are read without the `FOOD_DETECTOR`
    /// prefix; deployment environments set them bare.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let file_path = config_path
            .map(str::to_owned)
            .unwrap_or_else(Self::default_config_path);

        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists
            .add_source(File::with_name(&file_path).required(false))
            // Override with environment variables (prefix: FOOD_DETECTOR_)
            .add_source(
                Environment::with_prefix("FOOD_DETECTOR")
                    .separator("__")
            )
            .build()
            .map_err(|e| DetectorError::Config(e.to_string()))?;

        let mut config: AppConfig = config
            .try_deserialize()
            .map_err(|e| DetectorError::Config(e.to_string()))?;

        if let Ok(key) = std::env::var("GOOGLE_API_KEY") {
            if !key.is_empty() {
                config.gemini.api_key = Some(key);
            }
        }
        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| DetectorError::Config(format!("invalid PORT value: {port}")))?;
        }

        Ok(config)
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".food-detector")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}
