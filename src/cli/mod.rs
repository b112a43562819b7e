// CLI module for food-detector

use crate::config::AppConfig;
use clap::Parser;

/// food-detector - Gemini-backed food detection HTTP service
#[derive(Parser, Debug)]
#[command(name = "food-detector", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.food-detector/config.toml)
    #[arg(long)]
    pub config: Option<String>,

    /// Bind address override
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port override
    #[arg(long)]
    pub port: Option<u16>,
}

impl Args {
    /// Apply CLI overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}
