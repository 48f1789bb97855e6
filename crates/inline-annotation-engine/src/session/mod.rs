//! # Annotation Session
//!
//! The pieces around the codec that turn a text and an instruction into a
//! stored annotation: prompt assembly, the completion-service seam, stored
//! records and the orchestration tying them together.
//!
//! Everything with side effects sits behind a trait ([`CompletionClient`],
//! [`AnnotationStore`]) so the codec itself stays pure. Expiring old records
//! is an explicit call on the store, never a side effect of creating one.

pub mod annotator;
pub mod client;
pub mod prompt;
pub mod record;
pub mod store;

pub use annotator::{Annotated, Annotator, TokenUsage};
pub use client::{Completion, CompletionClient, CompletionError};
pub use prompt::{AnnotationRequest, CompletionRequest, Context, FORMAT_SPECIFICATION};
pub use record::AnnotationRecord;
pub use store::{AnnotationStore, MemoryStore};

use thiserror::Error;
use uuid::Uuid;

use crate::AnnotationError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Completion request failed: {0}")]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Annotation(#[from] AnnotationError),

    #[error("Annotation not found: {0}")]
    NotFound(Uuid),
}
