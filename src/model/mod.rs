//! Data model shared by every pipeline stage.
//!
//! Profiles are owned by the reader and borrowed by the stages; blocks are
//! owned by whichever stage produced them last.

mod block;
mod profile;

pub use block::{Block, BlockKind, BlockStats};
pub use profile::{Attribute, EntityProfile};
