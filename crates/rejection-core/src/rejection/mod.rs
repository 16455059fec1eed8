//! User-submitted rejections, newest first.
//!
//! Like the challenge catalog, each operation exists as a pure function over
//! a slice and as a method on [`UploadStore`].

mod id;
mod store;

pub use id::{Clock, FixedClock, IdGenerator, SystemClock};
pub use store::UploadStore;

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::draft::{validate, Draft, ValidationPolicy};
use crate::error::ValidationError;

/// Short month, day, year, e.g. "Oct 19, 2026".
pub const DEFAULT_DATE_FORMAT: &str = "%b %-d, %Y";

/// Check that every specifier in a chrono format string is recognised.
pub fn check_date_format(format: &str) -> Result<(), String> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(format!("'{format}' is not a valid date format"));
    }
    Ok(())
}

/// A submitted rejection. Never edited after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RejectionRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl RejectionRecord {
    /// Copy the draft's fields into a new record.
    pub fn from_draft(draft: &Draft, id: String, timestamp: i64) -> Self {
        Self {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            category: draft.category.clone(),
            difficulty: draft.difficulty,
            timestamp,
        }
    }

    /// Creation date rendered with a chrono format string (UTC).
    ///
    /// A malformed format falls back to [`DEFAULT_DATE_FORMAT`].
    pub fn display_date(&self, format: &str) -> String {
        let Some(at) = DateTime::from_timestamp_millis(self.timestamp) else {
            return String::new();
        };
        let mut rendered = String::new();
        if write!(rendered, "{}", at.format(format)).is_err() {
            tracing::warn!(format, "invalid date format, using default");
            rendered.clear();
            // The default format is well-formed, so this write cannot fail.
            let _ = write!(rendered, "{}", at.format(DEFAULT_DATE_FORMAT));
        }
        rendered
    }
}

/// Validate `draft` and prepend a new record built from it.
///
/// On a validation error nothing is built and `records` is untouched.
pub fn submit_record(
    records: &[RejectionRecord],
    draft: &Draft,
    policy: ValidationPolicy,
    id: String,
    timestamp: i64,
) -> Result<Vec<RejectionRecord>, ValidationError> {
    validate(draft, policy)?;
    Ok(prepend(records, RejectionRecord::from_draft(draft, id, timestamp)))
}

fn prepend(records: &[RejectionRecord], record: RejectionRecord) -> Vec<RejectionRecord> {
    let mut next = Vec::with_capacity(records.len() + 1);
    next.push(record);
    next.extend_from_slice(records);
    next
}

/// Drop the record with `id`, keeping the others in order.
pub fn delete_by_id(records: &[RejectionRecord], id: &str) -> Vec<RejectionRecord> {
    records.iter().filter(|r| r.id != id).cloned().collect()
}

pub fn is_empty(records: &[RejectionRecord]) -> bool {
    records.is_empty()
}
