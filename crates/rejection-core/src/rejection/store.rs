//! Owner of the upload sequence.

use super::id::{Clock, IdGenerator, SystemClock};
use super::{delete_by_id, prepend, RejectionRecord};
use crate::draft::{validate, Draft, ValidationPolicy};
use crate::error::ValidationError;

/// Growable list of submitted rejections, newest first.
#[derive(Debug, Clone)]
pub struct UploadStore<C: Clock = SystemClock> {
    records: Vec<RejectionRecord>,
    ids: IdGenerator,
    clock: C,
    policy: ValidationPolicy,
}

impl UploadStore<SystemClock> {
    /// Empty store on the wall clock with whitespace-trimming validation.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for UploadStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> UploadStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            records: Vec::new(),
            ids: IdGenerator::new(),
            clock,
            policy: ValidationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    pub fn records(&self) -> &[RejectionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        super::is_empty(&self.records)
    }

    pub fn get(&self, id: &str) -> Option<&RejectionRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Validate the draft and prepend a new record.
    ///
    /// The draft is checked here even if the caller already did so. It is
    /// checked before an id is drawn, so on error the store is unchanged and
    /// no sequence number is consumed. Ids already in the store are skipped.
    pub fn submit(&mut self, draft: &Draft) -> Result<&[RejectionRecord], ValidationError> {
        validate(draft, self.policy)?;
        let timestamp = self.clock.now_millis();
        let mut id = self.ids.next_id(timestamp);
        while self.get(&id).is_some() {
            id = self.ids.next_id(timestamp);
        }
        self.records = prepend(&self.records, RejectionRecord::from_draft(draft, id, timestamp));
        tracing::debug!(id = %self.records[0].id, total = self.records.len(), "rejection submitted");
        Ok(&self.records)
    }

    /// Remove the record with `id`. Unknown ids are ignored.
    pub fn delete_by_id(&mut self, id: &str) -> &[RejectionRecord] {
        let before = self.records.len();
        self.records = delete_by_id(&self.records, id);
        if self.records.len() == before {
            tracing::debug!(id, "delete ignored: no rejection with this id");
        } else {
            tracing::debug!(id, total = self.records.len(), "rejection deleted");
        }
        &self.records
    }
}
