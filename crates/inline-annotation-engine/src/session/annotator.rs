use chrono::Utc;
use serde_json::Value;
use std::time::Duration;
use uuid::Uuid;

use super::{
    SessionError,
    client::CompletionClient,
    prompt::{AnnotationRequest, Context},
    record::AnnotationRecord,
    store::AnnotationStore,
};

/// Running total of tokens spent on completions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub total: u64,
}

impl TokenUsage {
    pub fn add(&mut self, tokens: u64) {
        self.total = self.total.saturating_add(tokens);
    }
}

/// Result of one annotation turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotated {
    pub record: AnnotationRecord,
    pub tokens_used: u64,
}

/// Runs annotation turns against a completion client and a record store.
pub struct Annotator<C, S> {
    client: C,
    store: S,
    usage: TokenUsage,
}

impl<C: CompletionClient, S: AnnotationStore> Annotator<C, S> {
    pub fn new(client: C, store: S) -> Self {
        Self {
            client,
            store,
            usage: TokenUsage::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access for maintenance such as purging old records.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn usage(&self) -> TokenUsage {
        self.usage
    }

    /// Drops stored records older than `retention`, typically the configured
    /// retention period. Returns how many were removed.
    pub fn purge_expired(&mut self, retention: Duration) -> usize {
        self.store.purge_expired(retention, Utc::now())
    }

    /// Asks the completion service to annotate `request` and stores the
    /// returned inline text as a new record.
    pub fn annotate(&mut self, request: &AnnotationRequest) -> Result<Annotated, SessionError> {
        let completion_request = request.completion_request()?;
        log::info!(
            "requesting annotation ({} characters of context)",
            completion_request.user.chars().count()
        );
        let completion = self.client.complete(&completion_request)?;
        self.usage.add(completion.total_tokens);

        let record = AnnotationRecord::new(completion.content);
        self.store.insert(record.clone());
        log::info!(
            "stored annotation {} ({} tokens)",
            record.uuid,
            completion.total_tokens
        );

        Ok(Annotated {
            record,
            tokens_used: completion.total_tokens,
        })
    }

    /// Takes a user-edited version of record `uuid` (wire JSON or inline
    /// text), saves it in normalised inline form, then annotates it again
    /// with a new prompt.
    pub fn reannotate(
        &mut self,
        uuid: &Uuid,
        edited: &Value,
        prompt: impl Into<String>,
    ) -> Result<Annotated, SessionError> {
        let mut record = self
            .store
            .find(uuid)
            .ok_or(SessionError::NotFound(*uuid))?;
        record.set_content_from(edited)?;
        self.store.update(record.clone())?;

        let request = AnnotationRequest::prepare_with(Context::Raw(record.content), prompt);
        self.annotate(&request)
    }
}
