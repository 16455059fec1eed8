//! Property tests for store invariants.

use proptest::prelude::*;
use rejection_core::{
    completion_stats, initialize, is_submittable, rejection, toggle_completion, ChallengeRecord,
    Difficulty, Draft, FixedClock, UploadStore, ValidationPolicy,
};
use std::collections::HashSet;

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard)
    ]
}

fn records() -> impl Strategy<Value = Vec<ChallengeRecord>> {
    prop::collection::vec((any::<bool>(), difficulty()), 0..40).prop_map(|flags| {
        flags
            .into_iter()
            .enumerate()
            .map(|(i, (completed, difficulty))| ChallengeRecord {
                id: i as u32 + 1,
                title: format!("challenge {i}"),
                description: "d".into(),
                difficulty,
                completed,
            })
            .collect()
    })
}

fn draft() -> impl Strategy<Value = Draft> {
    ("[ a-z]{0,6}", "[ a-z]{0,6}", "[ a-z]{0,6}", difficulty()).prop_map(
        |(title, description, category, difficulty)| Draft {
            title,
            description,
            category,
            difficulty,
        },
    )
}

proptest! {
    #[test]
    fn toggle_is_its_own_inverse(id in 0u32..15) {
        let records = initialize();
        let twice = toggle_completion(&toggle_completion(&records, id), id);
        prop_assert_eq!(twice, records);
    }

    #[test]
    fn stats_are_bounded_and_rounded(records in records()) {
        let stats = completion_stats(&records);
        prop_assert!(stats.completed <= stats.total);
        prop_assert_eq!(stats.total, records.len());
        if stats.total == 0 {
            prop_assert_eq!(stats.percent, 0);
        } else {
            let exact = stats.completed as f64 / stats.total as f64 * 100.0;
            prop_assert!((stats.percent as f64 - exact).abs() <= 0.5 + 1e-9);
        }
    }

    #[test]
    fn submit_grows_by_one_or_not_at_all(drafts in prop::collection::vec(draft(), 1..20)) {
        let mut store = UploadStore::with_clock(FixedClock(1));
        for draft in &drafts {
            let before = store.records().to_vec();
            let valid = is_submittable(draft, ValidationPolicy::Trimmed);
            match store.submit(draft) {
                Ok(after) => {
                    prop_assert!(valid);
                    prop_assert_eq!(after.len(), before.len() + 1);
                    prop_assert!(before.iter().all(|r| r.id != after[0].id));
                    prop_assert_eq!(&after[1..], before.as_slice());
                }
                Err(_) => {
                    prop_assert!(!valid);
                    prop_assert_eq!(store.records(), before.as_slice());
                }
            }
        }
        let ids: HashSet<&str> = store.records().iter().map(|r| r.id.as_str()).collect();
        prop_assert_eq!(ids.len(), store.len());
    }

    #[test]
    fn delete_removes_one_and_is_idempotent(count in 1usize..10, pick in 0usize..10) {
        let mut store = UploadStore::with_clock(FixedClock(3));
        for i in 0..count {
            store.submit(&Draft {
                title: format!("t{i}"),
                description: "d".into(),
                category: "c".into(),
                difficulty: Difficulty::Medium,
            }).unwrap();
        }
        let target = store.records()[pick % count].id.clone();
        let once = rejection::delete_by_id(store.records(), &target);
        prop_assert_eq!(once.len(), count - 1);
        prop_assert_eq!(rejection::delete_by_id(&once, &target), once.clone());

        store.delete_by_id(&target);
        prop_assert_eq!(store.records(), once.as_slice());
    }
}
