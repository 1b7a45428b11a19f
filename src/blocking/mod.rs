//! Blocking-key generation and block building.
//!
//! A blocking method turns every attribute value of a profile into a set of
//! blocking keys; the [`assembler`] then groups profiles sharing a key into a
//! [`Block`](crate::model::Block).
//!
//! The available methods form a closed set, [`BlockingMethod`]:
//!
//! - [`StandardBlocking`]: every whitespace token is a key
//! - [`QGramsBlocking`]: every character q-gram of every token is a key
//! - [`ExtendedQGramsBlocking`]: every order-preserving combination of a
//!   token's q-grams, down to a minimum combination length, is a key
//!
//! # Example
//!
//! ```rust
//! use er_blocking::blocking::ExtendedQGramsBlocking;
//! use er_blocking::model::EntityProfile;
//! use er_blocking::pipeline::BlockBuilding;
//!
//! let method = ExtendedQGramsBlocking::default();
//! let d1 = vec![EntityProfile::new("a").with_attribute("name", "abc")];
//! let d2 = vec![EntityProfile::new("b").with_attribute("title", "abc")];
//!
//! let blocks = method.build_blocks(&d1, Some(d2.as_slice())).unwrap();
//! assert_eq!(blocks.len(), 1);
//! ```

pub mod assembler;
pub mod combinations;
mod extended_qgrams;
mod method;
mod qgrams;
mod standard;
pub mod tokenizer;

pub use assembler::{build_blocks, index_profiles};
pub use combinations::combinations;
pub use extended_qgrams::{ExtendedQGramsBlocking, ExtendedQGramsSearch, MAX_Q_GRAMS};
pub use method::{BlockingMethod, BlockingMethodKind, BlockingSearch};
pub use qgrams::{QGramsBlocking, QGramsSearch};
pub use standard::StandardBlocking;
pub use tokenizer::{n_grams, tokens};

use crate::error::Result;
use crate::model::{Block, EntityProfile};
use crate::pipeline::{BlockBuilding, MethodDescription};
use indexmap::IndexSet;
use std::time::Instant;

/// Insertion-ordered set of blocking keys.
///
/// Insertion order keeps block output reproducible from run to run.
pub type KeySet = IndexSet<String>;

/// Derives blocking keys from attribute values.
pub trait KeyGenerator: Sync {
    /// Blocking keys of a single attribute value.
    fn blocking_keys(&self, attribute_value: &str) -> KeySet;

    /// Union of the keys of every attribute value of `profile`.
    fn profile_keys(&self, profile: &EntityProfile) -> KeySet {
        let mut keys = KeySet::new();
        for value in profile.values() {
            keys.extend(self.blocking_keys(value));
        }
        keys
    }
}

impl<K: KeyGenerator + MethodDescription> BlockBuilding for K {
    fn build_blocks(
        &self,
        profiles1: &[EntityProfile],
        profiles2: Option<&[EntityProfile]>,
    ) -> Result<Vec<Block>> {
        let started = Instant::now();
        tracing::debug!(
            method = self.method_name(),
            configuration = %self.method_configuration(),
            profiles1 = profiles1.len(),
            profiles2 = profiles2.map_or(0, <[EntityProfile]>::len),
            "indexing profiles"
        );

        let keys1 = index_profiles(self, profiles1);
        let keys2 = profiles2.map(|profiles| index_profiles(self, profiles));
        let blocks = build_blocks(&keys1, keys2.as_deref());

        tracing::info!(
            method = self.method_name(),
            blocks = blocks.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "built blocks"
        );
        Ok(blocks)
    }
}
