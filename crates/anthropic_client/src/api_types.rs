//! Anthropic Messages API wire types.
//!
//! Only the request side is typed. Replies are read as loose JSON so that
//! [`crate::normalize`] can cope with shapes it does not recognise.

use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;

/// Anthropic Messages API request format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub system: String,
    pub messages: Vec<RequestMessage>,
}

impl MessagesRequest {
    /// One system prompt plus one user turn carrying `user_message` untouched.
    pub fn new(config: &ClientConfig, system: &str, user_message: &str) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            system: system.to_string(),
            messages: vec![RequestMessage {
                role: Role::User,
                content: user_message.to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Error envelope returned with non-2xx statuses:
/// `{"type":"error","error":{"type":"...","message":"..."}}`
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub message: String,
}

impl ErrorEnvelope {
    /// `kind: message` when the body is an Anthropic error envelope.
    pub fn parse_message(body: &str) -> Option<String> {
        let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
        let detail = envelope.error;
        Some(match detail.kind {
            Some(kind) if !kind.is_empty() => format!("{}: {}", kind, detail.message),
            _ => detail.message,
        })
    }
}
