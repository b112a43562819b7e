// food-detector - Gemini-backed food detection HTTP service

use anyhow::Result;
use clap::Parser;
use food_detector::cli::Args;
use food_detector::config::AppConfig;
use food_detector::detector::FoodDetector;
use food_detector::gemini::GeminiClient;
use food_detector::server::create_router;
use food_detector::utils::logging;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up GOOGLE_API_KEY and friends from a local .env if present
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply(&mut config);

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting food-detector v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Check the model credential
    if config.gemini.api_key.is_none() {
        if config.gemini.require_api_key {
            anyhow::bail!(
                "GOOGLE_API_KEY is not set; refusing to start \
                 (set gemini.require_api_key = false to serve without it)"
            );
        }
        warn!("GOOGLE_API_KEY is not set; detection requests will fail until it is provided");
    }

    // Phase 4: Build the Gemini client and the detection adapter
    let gemini_client = GeminiClient::new(&config.gemini)?;
    info!("Using model {} at {}", config.gemini.model, config.gemini.api_base_url);
    let detector = FoodDetector::new(Arc::new(gemini_client), config.detection.clone());

    // Phase 5: Build and start HTTP server
    let app = create_router(config.clone(), detector);
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 6: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
