//! Chat-completion boundary.
//!
//! [`CompletionClient`] hides transport and vendor details from the advisor,
//! so tests can substitute a stub and deployments can point at any
//! OpenAI-compatible endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by a completion backend.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The request never produced an HTTP response.
    #[error("completion request failed: {0}")]
    Transport(String),

    /// The API answered with a non-success status (bad key, quota, …).
    #[error("completion API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The API answered 2xx but without a usable completion.
    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// One chat-completion call, in the shape the API expects on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends the conversation and returns the text of the first choice.
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError>;
}
