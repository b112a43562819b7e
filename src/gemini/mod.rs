// Gemini API client module

mod client;
pub mod models;

pub use client::GeminiClient;
pub use models::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    InlineData, Part, UsageMetadata,
};
