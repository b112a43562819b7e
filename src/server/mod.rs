//! Axum-based HTTP server for the food-detector service.
//!
//! # Components
//!
//! - `handlers`: Implementation of individual API endpoints (predict, detect, liveness).
//! - `middleware`: Request ID layers shared by all routes.
//! - `routes`: The main router configuration that ties everything together.

mod handlers;
mod middleware;
mod routes;

pub use handlers::{DetectResponse, ItemsResponse};
pub use routes::{create_router, AppState};
