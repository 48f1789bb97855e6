use serde_json::Value;
use thiserror::Error;

use super::prompt::CompletionRequest;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Completion service unavailable: {0}")]
    Unavailable(String),

    #[error("Completion response has no message content")]
    MissingContent,
}

/// What the completion service returned: tokens spent and the annotated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub total_tokens: u64,
    pub content: String,
}

impl Completion {
    /// Reads a chat-completions style response body.
    ///
    /// A missing token count counts as zero; missing content is an error.
    pub fn from_chat_json(response: &Value) -> Result<Self, CompletionError> {
        let total_tokens = response
            .pointer("/usage/total_tokens")
            .and_then(Value::as_u64)
            .unwrap_or(0);
        let content = response
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .ok_or(CompletionError::MissingContent)?;
        Ok(Self {
            total_tokens,
            content: content.to_string(),
        })
    }
}

/// The external text-completion service.
pub trait CompletionClient {
    fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError>;
}
