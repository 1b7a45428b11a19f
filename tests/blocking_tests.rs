//! Block-building integration tests.
//!
//! These tests exercise the blocking methods end to end: from entity
//! profiles through key generation to assembled blocks.

use er_blocking::blocking::{BlockingMethodKind, KeyGenerator, MAX_Q_GRAMS};
use er_blocking::{
    BlockBuilding, BlockKind, BlockStats, EntityProfile, ExtendedQGramsBlocking, QGramsBlocking,
    StandardBlocking,
};

// ============================================================================
// Helpers
// ============================================================================

fn profiles(values: &[&str]) -> Vec<EntityProfile> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| EntityProfile::new(format!("e{i}")).with_attribute("name", *value))
        .collect()
}

fn sorted_keys(method: &impl KeyGenerator, value: &str) -> Vec<String> {
    let mut keys: Vec<String> = method.blocking_keys(value).into_iter().collect();
    keys.sort();
    keys
}

// ============================================================================
// Clean-Clean ER
// ============================================================================

mod clean_clean {
    use super::*;

    #[test]
    fn shared_value_yields_one_bilateral_block() {
        let d1 = profiles(&["abc"]);
        let d2 = profiles(&["abc"]);

        let blocks = ExtendedQGramsBlocking::default()
            .build_blocks(&d1, Some(d2.as_slice()))
            .unwrap();

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind(), BlockKind::Bilateral);
        assert_eq!(blocks[0].profile_indices_side1(), &[0]);
        assert_eq!(blocks[0].profile_indices_side2(), &[0]);
    }

    #[test]
    fn keys_from_one_side_only_are_dropped() {
        let d1 = profiles(&["abc", "abc"]);
        let d2 = profiles(&["xyz"]);

        let blocks = ExtendedQGramsBlocking::default()
            .build_blocks(&d1, Some(d2.as_slice()))
            .unwrap();
        assert!(blocks.is_empty());
    }

    #[test]
    fn empty_second_collection_yields_no_blocks() {
        let d1 = profiles(&["abc", "abc"]);
        let blocks = StandardBlocking
            .build_blocks(&d1, Some(&[][..]))
            .unwrap();
        assert!(blocks.is_empty());
    }

    #[test]
    fn every_block_has_both_sides() {
        let d1 = profiles(&["john roberts", "maria gonzalez", "peter smith"]);
        let d2 = profiles(&["jon robert", "maria gonzales", "anna kowalska"]);

        let blocks = ExtendedQGramsBlocking::default()
            .build_blocks(&d1, Some(d2.as_slice()))
            .unwrap();
        assert!(!blocks.is_empty());
        for block in &blocks {
            assert!(block.is_valid());
            assert!(!block.profile_indices_side1().is_empty());
            assert!(!block.profile_indices_side2().is_empty());
        }
    }
}

// ============================================================================
// Dirty ER
// ============================================================================

mod dirty {
    use super::*;

    #[test]
    fn singleton_keys_are_dropped() {
        let blocks = StandardBlocking
            .build_blocks(&profiles(&["alpha", "beta", "gamma"]), None)
            .unwrap();
        assert!(blocks.is_empty());
    }

    #[test]
    fn shared_token_groups_profiles() {
        let blocks = StandardBlocking
            .build_blocks(&profiles(&["john smith", "mary smith", "john doe"]), None)
            .unwrap();

        // "john" and "smith", in first-seen key order
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].profile_indices_side1(), &[0, 2]);
        assert_eq!(blocks[1].profile_indices_side1(), &[0, 1]);
        assert!(blocks.iter().all(|b| b.kind() == BlockKind::Unilateral));
    }

    #[test]
    fn empty_collection_yields_no_blocks() {
        let blocks = ExtendedQGramsBlocking::default()
            .build_blocks(&[], None)
            .unwrap();
        assert!(blocks.is_empty());
    }

    #[test]
    fn profile_counted_once_per_block() {
        // Both attribute values produce the key "abc" for the same profile
        let d1 = vec![
            EntityProfile::new("1")
                .with_attribute("a", "abc")
                .with_attribute("b", "abc"),
            EntityProfile::new("2").with_attribute("a", "abc"),
        ];
        let blocks = StandardBlocking.build_blocks(&d1, None).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].profile_indices_side1(), &[0, 1]);
        assert_eq!(blocks[0].comparisons(), 1);
    }

    #[test]
    fn extended_q_grams_tolerate_typos() {
        let d1 = profiles(&["roberts", "robert", "smith"]);
        let blocks = ExtendedQGramsBlocking::default()
            .build_blocks(&d1, None)
            .unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].profile_indices_side1(), &[0, 1]);
    }
}

// ============================================================================
// Key Generation
// ============================================================================

mod keys {
    use super::*;

    #[test]
    fn roberts_with_six_grams() {
        let method = ExtendedQGramsBlocking::new(6, 0.95).unwrap();
        assert_eq!(
            sorted_keys(&method, "roberts"),
            vec!["oberts", "robert", "robertoberts"]
        );
    }

    #[test]
    fn keys_are_deterministic() {
        let method = ExtendedQGramsBlocking::new(3, 0.8).unwrap();
        let value = "international business machines";
        let first: Vec<String> = method.blocking_keys(value).into_iter().collect();
        for _ in 0..5 {
            let again: Vec<String> = method.blocking_keys(value).into_iter().collect();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn lower_threshold_never_loses_keys() {
        let value = "springfield";
        let strict = ExtendedQGramsBlocking::new(3, 0.95).unwrap().blocking_keys(value);
        let loose = ExtendedQGramsBlocking::new(3, 0.7).unwrap().blocking_keys(value);
        assert!(strict.is_subset(&loose));
        assert!(loose.len() > strict.len());
    }

    #[test]
    fn q_grams_are_single_grams_of_extended_q_grams() {
        let q_grams = QGramsBlocking::new(4).unwrap().blocking_keys("abcdef");
        let extended = ExtendedQGramsBlocking::new(4, 0.1)
            .unwrap()
            .blocking_keys("abcdef");
        assert!(q_grams.is_subset(&extended));
    }

    #[test]
    fn long_tokens_only_use_capped_q_grams() {
        // 30 distinct characters give 28 trigrams; only the first 15 are combined
        let token: String = ('a'..='z').chain('0'..='3').collect();
        let method = ExtendedQGramsBlocking::new(3, 1.0).unwrap();
        let keys = method.blocking_keys(&token);
        assert_eq!(keys.len(), 1);
        let full = keys.first().unwrap();
        assert_eq!(full.len(), 3 * MAX_Q_GRAMS);
        assert!(full.starts_with("abc"));
    }

    #[test]
    fn empty_value_has_no_keys() {
        for kind in BlockingMethodKind::all() {
            assert!(kind.default_method().blocking_keys("").is_empty());
            assert!(kind.default_method().blocking_keys("   ").is_empty());
        }
    }
}

// ============================================================================
// Statistics
// ============================================================================

mod stats {
    use super::*;

    #[test]
    fn stats_sum_comparisons() {
        let blocks = StandardBlocking
            .build_blocks(&profiles(&["a b", "a b", "a c"]), None)
            .unwrap();
        // "a": 3 profiles -> 3 pairs, "b": 2 profiles -> 1 pair
        let stats = BlockStats::from_blocks(&blocks);
        assert_eq!(stats.blocks, 2);
        assert_eq!(stats.comparisons, 4);
        assert_eq!(stats.largest_block, 3);
        assert_eq!(stats.profile_references, 5);
    }
}
