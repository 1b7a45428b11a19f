//! Stage contracts of the entity-resolution pipeline.
//!
//! Blocking is implemented in this crate; block processing, entity matching
//! and entity clustering are plugged in by callers through the same shape of
//! interface: a documented, configurable method with one transform operation.

use crate::error::Result;
use crate::model::{Block, EntityProfile};
use crate::parameters::ParameterDescriptor;

/// Self-description shared by every configurable method.
pub trait MethodDescription {
    /// Human-readable method name, e.g. `"Extended Q-Grams Blocking"`
    fn method_name(&self) -> &'static str;

    /// One-paragraph explanation of what the method does
    fn method_info(&self) -> String;

    /// Metadata of every tunable parameter, in sweep order (outermost first)
    fn parameter_descriptors(&self) -> Vec<ParameterDescriptor>;

    /// Current parameter values, e.g. `"Q-gram Size=6,\tCombination Threshold=0.95"`
    fn method_configuration(&self) -> String;

    /// Numbered overview of the parameters.
    fn method_parameters(&self) -> String {
        let descriptors = self.parameter_descriptors();
        if descriptors.is_empty() {
            return format!("{} is a parameter-free method.", self.method_name());
        }

        let mut text = format!(
            "{} involves {} parameter{}:",
            self.method_name(),
            descriptors.len(),
            if descriptors.len() == 1 { "" } else { "s" }
        );
        for (i, descriptor) in descriptors.iter().enumerate() {
            text.push_str(&format!("\n{}) {}", i + 1, descriptor.description));
        }
        text
    }

    /// Parameter metadata as a JSON array, for automated sweep drivers.
    fn parameter_configuration(&self) -> serde_json::Value {
        serde_json::to_value(self.parameter_descriptors())
            .unwrap_or_else(|_| serde_json::Value::Array(Vec::new()))
    }
}

/// Builds blocks from one (dirty ER) or two (clean-clean ER) profile collections.
pub trait BlockBuilding: MethodDescription {
    /// Group profiles sharing a blocking key into blocks.
    ///
    /// Profile indices in the returned blocks are positions within the
    /// respective input slice. An empty first collection yields no blocks.
    fn build_blocks(
        &self,
        profiles1: &[EntityProfile],
        profiles2: Option<&[EntityProfile]>,
    ) -> Result<Vec<Block>>;
}

/// Rewrites a block collection (purging, filtering, meta-blocking).
pub trait BlockProcessing: MethodDescription {
    /// Produce a new block collection from `blocks`.
    fn refine_blocks(&self, blocks: Vec<Block>) -> Result<Vec<Block>>;
}

/// A scored candidate pair: profile indices on side 1 and side 2
/// (both on side 1 for dirty ER) with a similarity in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityPair {
    /// First profile index
    pub entity1: usize,
    /// Second profile index
    pub entity2: usize,
    /// Similarity assigned by the matcher
    pub similarity: f64,
}

/// Output of an entity-matching stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityPairs {
    /// Whether indices of `entity2` refer to the second collection
    pub clean_clean: bool,
    /// Scored pairs
    pub pairs: Vec<SimilarityPair>,
}

/// Scores the candidate pairs induced by a block collection.
pub trait EntityMatching: MethodDescription {
    /// Compare every candidate pair of `blocks`.
    fn execute_comparisons(&self, blocks: &[Block]) -> Result<SimilarityPairs>;
}

/// A group of profiles judged to describe the same real-world entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquivalenceCluster {
    /// Member indices from the first collection
    pub entities_d1: Vec<usize>,
    /// Member indices from the second collection
    pub entities_d2: Vec<usize>,
}

/// Turns scored pairs into duplicate groups.
pub trait EntityClustering: MethodDescription {
    /// Partition the profiles referenced by `pairs` into clusters.
    fn duplicates(&self, pairs: &SimilarityPairs) -> Result<Vec<EquivalenceCluster>>;
}

/// Enumerates the configurations of a method for automatic sweeps.
///
/// Every call returns a new, immutable method value; nothing is mutated
/// except the free-running generator behind `next_random_configuration`.
pub trait ConfigurationSearch {
    /// The configured method produced by the search
    type Method;

    /// Number of grid configurations (product over all parameters).
    fn number_of_grid_configurations(&self) -> usize;

    /// The method configured with grid point `iteration`.
    fn numbered_grid_configuration(&self, iteration: usize) -> Result<Self::Method>;

    /// The method configured with the reproducible random draw `iteration`.
    fn numbered_random_configuration(&self, iteration: usize) -> Result<Self::Method>;

    /// The method configured with fresh, non-reproducible random draws.
    fn next_random_configuration(&mut self) -> Result<Self::Method>;
}
