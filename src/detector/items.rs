// Detected item types and reply parsing

use crate::error::{DetectorError, Result};
use serde::{Deserialize, Serialize};

/// A single detected food item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionItem {
    pub label: String,
    /// How many of the item the model saw. Left out of the serialized
    /// response when the model omits it; no default is fabricated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

/// Outcome of one detection pass, in either response mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionResult {
    /// Structured mode: a typed list of detected items.
    Items(Vec<DetectionItem>),
    /// Freeform mode: the model's descriptive text, unchanged.
    Text(String),
}

/// How the model is asked to reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    #[default]
    Structured,
    Freeform,
}

/// Parse a structured model reply into detection items.
///
/// The reply must be JSON with an `items` array; anything else is an
/// upstream error. A missing or malformed reply never degrades to an
/// empty list.
pub fn parse_structured_reply(reply: &str) -> Result<Vec<DetectionItem>> {
    #[derive(Deserialize)]
    struct StructuredReply {
        items: Vec<DetectionItem>,
    }

    let parsed: StructuredReply = serde_json::from_str(reply).map_err(|e| {
        DetectorError::Upstream(format!("Model reply is not the expected JSON shape: {}", e))
    })?;

    Ok(parsed.items)
}
