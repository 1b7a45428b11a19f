//! Pipeline contracts and orchestration.
//!
//! Entity resolution runs read → block → process blocks → match → cluster.
//! This crate implements blocking; the other stages are traits so callers can
//! plug in their own methods, and [`Workflow`] wires blocking and block
//! processing together from configuration.

mod reader;
mod traits;
mod workflow;

pub use reader::{EntityReader, JsonEntityReader};
pub use traits::{
    BlockBuilding, BlockProcessing, ConfigurationSearch, EntityClustering, EntityMatching,
    EquivalenceCluster, MethodDescription, SimilarityPair, SimilarityPairs,
};
pub use workflow::{StageReport, Workflow, WorkflowResult};
