//! Completion statistics over a catalog sequence.

use serde::{Deserialize, Serialize};

use super::ChallengeRecord;

/// Derived completion counts for rendering progress.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CompletionStats {
    pub completed: usize,
    pub total: usize,
    /// Rounded to the nearest integer, halves away from zero.
    pub percent: u32,
}

/// Count completed records and compute the rounded percentage.
///
/// An empty sequence yields `0 / 0` at 0%.
pub fn completion_stats(records: &[ChallengeRecord]) -> CompletionStats {
    let total = records.len();
    let completed = records.iter().filter(|r| r.completed).count();
    CompletionStats {
        completed,
        total,
        percent: rounded_percent(completed, total),
    }
}

fn rounded_percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    // Integer form of round(part / whole * 100) for non-negative inputs.
    ((part as u64 * 200 + whole as u64) / (whole as u64 * 2)) as u32
}
