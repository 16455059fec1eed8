//! Seed data for the challenge catalog.

use super::ChallengeRecord;
use crate::difficulty::Difficulty;

/// (id, title, description, difficulty) in authoring order.
const SEED: [(u32, &str, &str, Difficulty); 10] = [
    (
        1,
        "Ask for a Discount",
        "Ask for a discount at a store where it's not typically offered",
        Difficulty::Easy,
    ),
    (
        2,
        "Request a Free Upgrade",
        "Ask for a free upgrade on your next flight or hotel stay",
        Difficulty::Medium,
    ),
    (
        3,
        "Ask a Stranger for Directions",
        "Ask someone for directions to a place you already know how to get to",
        Difficulty::Easy,
    ),
    (
        4,
        "Request a Job Interview",
        "Ask for a job interview at a company you're interested in, even if they're not hiring",
        Difficulty::Hard,
    ),
    (
        5,
        "Ask for a Free Sample",
        "Request a free sample at a store where it's not typically offered",
        Difficulty::Easy,
    ),
    (
        6,
        "Request a Meeting with CEO",
        "Ask to meet with the CEO of a company you're interested in",
        Difficulty::Hard,
    ),
    (
        7,
        "Ask for a Better Table",
        "Request a better table at a restaurant when you're seated",
        Difficulty::Medium,
    ),
    (
        8,
        "Request a Price Match",
        "Ask a store to match a competitor's price",
        Difficulty::Medium,
    ),
    (
        9,
        "Ask for a Refund",
        "Request a refund for a product you've used",
        Difficulty::Hard,
    ),
    (
        10,
        "Ask for a Recommendation",
        "Ask someone you barely know for a professional recommendation",
        Difficulty::Medium,
    ),
];

/// Build the fixed catalog. Every record starts not completed.
pub fn initialize() -> Vec<ChallengeRecord> {
    SEED.iter()
        .map(|&(id, title, description, difficulty)| ChallengeRecord {
            id,
            title: title.to_string(),
            description: description.to_string(),
            difficulty,
            completed: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_ten_records_in_order() {
        let records = initialize();
        let ids: Vec<u32> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
        assert_eq!(records[0].title, "Ask for a Discount");
        assert_eq!(records[9].title, "Ask for a Recommendation");
    }

    #[test]
    fn catalog_starts_incomplete_with_text() {
        for record in initialize() {
            assert!(!record.completed);
            assert!(!record.title.is_empty());
            assert!(!record.description.is_empty());
        }
    }

    #[test]
    fn catalog_ids_are_unique() {
        let records = initialize();
        let ids: HashSet<u32> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), records.len());
    }

    #[test]
    fn catalog_difficulty_mix() {
        let records = initialize();
        let count = |d: Difficulty| records.iter().filter(|r| r.difficulty == d).count();
        assert_eq!(count(Difficulty::Easy), 3);
        assert_eq!(count(Difficulty::Medium), 4);
        assert_eq!(count(Difficulty::Hard), 3);
    }

    #[test]
    fn initialize_is_idempotent() {
        assert_eq!(initialize(), initialize());
    }
}
