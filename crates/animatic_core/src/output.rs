//! Output types from model responses.

use serde::{Deserialize, Serialize};

/// Supported output types from model drivers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output.
    Text(String),

    /// Structured JSON output (providers with a native JSON mode).
    Json(serde_json::Value),
}
