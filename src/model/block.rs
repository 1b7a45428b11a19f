//! Blocks: groups of profiles that share a blocking key.

use serde::Serialize;

/// Whether a block was built from one collection or two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Dirty ER: every pair inside the block is a candidate
    Unilateral,
    /// Clean-clean ER: only cross-collection pairs are candidates
    Bilateral,
}

/// A set of profile indices from one or two collections.
///
/// Indices are kept sorted and deduplicated. The blocking key that produced
/// the block is not retained; downstream stages only need membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[must_use]
pub struct Block {
    kind: BlockKind,
    side1: Vec<usize>,
    side2: Vec<usize>,
}

impl Block {
    /// Create a dirty-ER block.
    pub fn unilateral(side1: impl IntoIterator<Item = usize>) -> Self {
        Self {
            kind: BlockKind::Unilateral,
            side1: normalize(side1),
            side2: Vec::new(),
        }
    }

    /// Create a clean-clean ER block.
    pub fn bilateral(
        side1: impl IntoIterator<Item = usize>,
        side2: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            kind: BlockKind::Bilateral,
            side1: normalize(side1),
            side2: normalize(side2),
        }
    }

    /// Block kind
    #[must_use]
    pub const fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Profile indices from the first collection.
    #[must_use]
    pub fn profile_indices_side1(&self) -> &[usize] {
        &self.side1
    }

    /// Profile indices from the second collection (empty for dirty ER).
    #[must_use]
    pub fn profile_indices_side2(&self) -> &[usize] {
        &self.side2
    }

    /// Total number of profile references.
    #[must_use]
    pub fn total_profiles(&self) -> usize {
        self.side1.len() + self.side2.len()
    }

    /// Number of candidate pairs this block induces.
    #[must_use]
    pub fn comparisons(&self) -> u64 {
        match self.kind {
            BlockKind::Unilateral => {
                let n = self.side1.len() as u64;
                n * n.saturating_sub(1) / 2
            }
            BlockKind::Bilateral => self.side1.len() as u64 * self.side2.len() as u64,
        }
    }

    /// Whether the block can contribute at least one candidate pair.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self.kind {
            BlockKind::Unilateral => self.side1.len() >= 2,
            BlockKind::Bilateral => !self.side1.is_empty() && !self.side2.is_empty(),
        }
    }
}

fn normalize(ids: impl IntoIterator<Item = usize>) -> Vec<usize> {
    let mut ids: Vec<usize> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Aggregate figures over a block collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlockStats {
    /// Number of blocks
    pub blocks: usize,
    /// Sum of candidate pairs over all blocks (pairs repeated across blocks count twice)
    pub comparisons: u64,
    /// Sum of profile references over all blocks
    pub profile_references: usize,
    /// Profile references of the largest block
    pub largest_block: usize,
}

impl BlockStats {
    /// Compute statistics for a block collection.
    pub fn from_blocks(blocks: &[Block]) -> Self {
        blocks.iter().fold(Self::default(), |mut stats, block| {
            let size = block.total_profiles();
            stats.blocks += 1;
            stats.comparisons += block.comparisons();
            stats.profile_references += size;
            stats.largest_block = stats.largest_block.max(size);
            stats
        })
    }
}
