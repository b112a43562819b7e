//! The image classification adapter.
//!
//! Translates a validated upload into a model request, invokes the vision
//! model, and normalizes the reply into a [`DetectionResult`]. Each request
//! is a stateless single pass: validate, call, parse. There is no retry
//! loop and nothing is retained between requests.
//!
//! # Submodules
//!
//! - `items`: Detected item types, response modes, and reply parsing.
//! - `adapter`: The [`FoodDetector`] pipeline and the [`VisionModel`] seam.

mod adapter;
mod items;

pub use adapter::{FoodDetector, GenerationOptions, ModelRequest, VisionModel};
pub use items::{parse_structured_reply, DetectionItem, DetectionResult, ResponseMode};
