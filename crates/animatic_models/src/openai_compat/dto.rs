//! Wire types for the chat-completions API.

use animatic_core::{GenerateRequest, Message};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role.as_api_str().to_string(),
            content: message.content.clone(),
        }
    }
}

impl ChatCompletionRequest {
    /// Build the wire request; the request's model overrides the client default.
    pub fn from_generate(
        req: &GenerateRequest,
        default_model: &str,
        default_temperature: Option<f32>,
    ) -> Self {
        Self {
            model: req
                .model()
                .clone()
                .unwrap_or_else(|| default_model.to_string()),
            messages: req.messages().iter().map(ChatMessage::from).collect(),
            temperature: (*req.temperature()).or(default_temperature),
            max_tokens: *req.max_tokens(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}
