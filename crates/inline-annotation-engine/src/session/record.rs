use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{AnnotationError, Document, decode, decode_value, generate};

/// A stored annotation. `content` is always inline annotation text, the
/// canonical form; JSON views are derived from it on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub uuid: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl AnnotationRecord {
    pub fn new(content: impl Into<String>) -> Self {
        Self::created_at(content, Utc::now())
    }

    pub fn created_at(content: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            content: content.into(),
            created_at,
        }
    }

    /// Content as a document. Content that already holds wire JSON is
    /// loaded as-is rather than bracket-parsed.
    pub fn content_as_document(&self) -> Document {
        decode(&self.content)
    }

    /// Replaces the content from wire JSON or inline text, normalising it
    /// through the generator.
    pub fn set_content_from(&mut self, value: &Value) -> Result<(), AnnotationError> {
        let doc = decode_value(value);
        self.content = generate(&doc)?;
        Ok(())
    }
}
