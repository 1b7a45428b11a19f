//! Inversion of per-profile key sets into blocks.
//!
//! Key computation is independent per profile and runs on the rayon pool;
//! inversion starts only once every key set is known, since a key's final
//! membership depends on all profiles.

use super::{KeyGenerator, KeySet};
use crate::model::{Block, EntityProfile};
use indexmap::IndexMap;
use rayon::prelude::*;

/// Compute the key set of every profile in parallel.
///
/// The result is aligned with `profiles`: slot `i` holds the keys of profile `i`.
pub fn index_profiles<K: KeyGenerator + ?Sized>(
    generator: &K,
    profiles: &[EntityProfile],
) -> Vec<KeySet> {
    profiles
        .par_iter()
        .map(|profile| generator.profile_keys(profile))
        .collect()
}

/// Members of one key on each side.
#[derive(Default)]
struct Postings {
    side1: Vec<usize>,
    side2: Vec<usize>,
}

/// Group profiles sharing a blocking key into blocks.
///
/// `keys1[i]` holds the keys of profile `i` of the first collection; `keys2`
/// is present only for clean-clean ER. Blocks are emitted in first-seen key
/// order (side 1 first, then side 2). Dirty-ER blocks with fewer than two
/// profiles and clean-clean blocks empty on either side are dropped.
#[must_use]
pub fn build_blocks(keys1: &[KeySet], keys2: Option<&[KeySet]>) -> Vec<Block> {
    let mut index: IndexMap<&str, Postings> = IndexMap::new();

    for (profile, keys) in keys1.iter().enumerate() {
        for key in keys {
            index.entry(key.as_str()).or_default().side1.push(profile);
        }
    }

    let Some(keys2) = keys2 else {
        return index
            .into_values()
            .filter(|postings| postings.side1.len() >= 2)
            .map(|postings| Block::unilateral(postings.side1))
            .collect();
    };

    for (profile, keys) in keys2.iter().enumerate() {
        for key in keys {
            index.entry(key.as_str()).or_default().side2.push(profile);
        }
    }

    index
        .into_values()
        .filter(|postings| !postings.side1.is_empty() && !postings.side2.is_empty())
        .map(|postings| Block::bilateral(postings.side1, postings.side2))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_set(keys: &[&str]) -> KeySet {
        keys.iter().map(|k| (*k).to_string()).collect()
    }

    #[test]
    fn test_dirty_blocks_need_two_profiles() {
        let keys = vec![
            key_set(&["smith", "john"]),
            key_set(&["smith", "jon"]),
            key_set(&["doe"]),
        ];
        let blocks = build_blocks(&keys, None);

        assert_eq!(blocks, vec![Block::unilateral([0, 1])]);
    }

    #[test]
    fn test_clean_clean_blocks_need_both_sides() {
        let keys1 = vec![key_set(&["abc", "only-left"]), key_set(&["only-left"])];
        let keys2 = vec![key_set(&["abc"]), key_set(&["only-right"])];
        let blocks = build_blocks(&keys1, Some(keys2.as_slice()));

        assert_eq!(blocks, vec![Block::bilateral([0], [0])]);
    }

    #[test]
    fn test_first_seen_key_order() {
        let keys = vec![key_set(&["b", "a"]), key_set(&["a", "b", "c"]), key_set(&["c"])];
        let blocks = build_blocks(&keys, None);

        // "b" is seen before "a", and "c" last
        assert_eq!(
            blocks,
            vec![
                Block::unilateral([0, 1]),
                Block::unilateral([0, 1]),
                Block::unilateral([1, 2]),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(build_blocks(&[], None).is_empty());
        assert!(build_blocks(&[], Some(&[][..])).is_empty());
    }
}
