//! Fixed challenge catalog.
//!
//! The catalog is seeded once and never grows or shrinks. The only thing a
//! user can change is whether a challenge is completed. Operations come in
//! two shapes: pure functions taking the current sequence and returning the
//! next one, and [`CatalogStore`], which owns the current sequence for a
//! presentation layer.

mod catalog;
mod stats;

pub use catalog::initialize;
pub use stats::{completion_stats, CompletionStats};

use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;

/// A preloaded challenge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChallengeRecord {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub completed: bool,
}

/// Flip `completed` on the record with `id`.
///
/// Order is preserved. An unknown id returns an unchanged copy.
pub fn toggle_completion(records: &[ChallengeRecord], id: u32) -> Vec<ChallengeRecord> {
    records
        .iter()
        .map(|record| {
            if record.id == id {
                ChallengeRecord {
                    completed: !record.completed,
                    ..record.clone()
                }
            } else {
                record.clone()
            }
        })
        .collect()
}

/// Owner of the current catalog sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStore {
    records: Vec<ChallengeRecord>,
}

impl CatalogStore {
    /// Create a store holding the seeded catalog.
    pub fn new() -> Self {
        Self {
            records: initialize(),
        }
    }

    pub fn records(&self) -> &[ChallengeRecord] {
        &self.records
    }

    pub fn get(&self, id: u32) -> Option<&ChallengeRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    /// Toggle completion and return the updated sequence for re-rendering.
    pub fn toggle_completion(&mut self, id: u32) -> &[ChallengeRecord] {
        if self.contains(id) {
            self.records = toggle_completion(&self.records, id);
            tracing::debug!(id, completed = self.get(id).map(|r| r.completed), "challenge toggled");
        } else {
            tracing::warn!(id, "toggle ignored: no challenge with this id");
        }
        &self.records
    }

    pub fn stats(&self) -> CompletionStats {
        completion_stats(&self.records)
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}
