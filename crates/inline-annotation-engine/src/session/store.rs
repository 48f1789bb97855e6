use chrono::{DateTime, Utc};
use std::{collections::HashMap, time::Duration};
use uuid::Uuid;

use super::{SessionError, record::AnnotationRecord};

/// Where annotation records live between requests.
///
/// Methods take `&mut self` for writes, so a caller sharing a store across
/// threads must wrap it in its own lock.
pub trait AnnotationStore {
    fn insert(&mut self, record: AnnotationRecord);

    fn find(&self, uuid: &Uuid) -> Option<AnnotationRecord>;

    fn update(&mut self, record: AnnotationRecord) -> Result<(), SessionError>;

    /// Deletes records created before `cutoff`, returning how many went.
    fn purge_older_than(&mut self, cutoff: DateTime<Utc>) -> usize;

    /// Deletes records that were already older than `retention` at `now`.
    fn purge_expired(&mut self, retention: Duration, now: DateTime<Utc>) -> usize {
        let cutoff = chrono::Duration::from_std(retention)
            .ok()
            .and_then(|age| now.checked_sub_signed(age))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        self.purge_older_than(cutoff)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<Uuid, AnnotationRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl AnnotationStore for MemoryStore {
    fn insert(&mut self, record: AnnotationRecord) {
        self.records.insert(record.uuid, record);
    }

    fn find(&self, uuid: &Uuid) -> Option<AnnotationRecord> {
        self.records.get(uuid).cloned()
    }

    fn update(&mut self, record: AnnotationRecord) -> Result<(), SessionError> {
        match self.records.get_mut(&record.uuid) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(SessionError::NotFound(record.uuid)),
        }
    }

    fn purge_older_than(&mut self, cutoff: DateTime<Utc>) -> usize {
        let before = self.records.len();
        self.records.retain(|_, r| r.created_at >= cutoff);
        let purged = before - self.records.len();
        if purged > 0 {
            log::info!("purged {purged} annotation(s) created before {cutoff}");
        }
        purged
    }
}
