//! Configuration-driven blocking workflow.
//!
//! A workflow is an explicit list of stages: one blocking method followed by
//! any number of block-processing stages. Running it measures each stage and
//! records the `name->name` summary used when comparing configurations.

use super::{BlockBuilding, BlockProcessing, MethodDescription};
use crate::blocking::BlockingMethod;
use crate::error::{ErrorContext, Result};
use crate::model::{Block, BlockStats, EntityProfile};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Blocking followed by block processing.
pub struct Workflow {
    block_building: BlockingMethod,
    block_processing: Vec<Box<dyn BlockProcessing + Send + Sync>>,
}

impl Workflow {
    /// Workflow with only a blocking stage
    #[must_use]
    pub fn new(block_building: BlockingMethod) -> Self {
        Self {
            block_building,
            block_processing: Vec::new(),
        }
    }

    /// Append a block-processing stage (builder style)
    #[must_use]
    pub fn with_processing(mut self, stage: impl BlockProcessing + Send + Sync + 'static) -> Self {
        self.block_processing.push(Box::new(stage));
        self
    }

    /// The blocking stage
    #[must_use]
    pub const fn block_building(&self) -> &BlockingMethod {
        &self.block_building
    }

    /// `name->name` summary of every stage
    #[must_use]
    pub fn workflow_name(&self) -> String {
        std::iter::once(self.block_building.method_name())
            .chain(self.block_processing.iter().map(|s| s.method_name()))
            .collect::<Vec<_>>()
            .join("->")
    }

    /// Run every stage over the given collections.
    pub fn run(
        &self,
        profiles1: &[EntityProfile],
        profiles2: Option<&[EntityProfile]>,
    ) -> Result<WorkflowResult> {
        let started = Instant::now();
        let mut stages = Vec::with_capacity(1 + self.block_processing.len());

        let stage_started = Instant::now();
        let mut blocks = self
            .block_building
            .build_blocks(profiles1, profiles2)
            .with_context(|| format!("running {}", self.block_building.method_name()))?;
        stages.push(StageReport::new(
            &self.block_building,
            &blocks,
            stage_started.elapsed(),
        ));

        for stage in &self.block_processing {
            let stage_started = Instant::now();
            blocks = stage
                .refine_blocks(blocks)
                .with_context(|| format!("running {}", stage.method_name()))?;
            let report = StageReport::new(stage.as_ref(), &blocks, stage_started.elapsed());
            tracing::info!(
                stage = report.name,
                blocks = report.stats.blocks,
                comparisons = report.stats.comparisons,
                "refined blocks"
            );
            stages.push(report);
        }

        Ok(WorkflowResult {
            stats: BlockStats::from_blocks(&blocks),
            blocks,
            workflow_name: self.workflow_name(),
            stages,
            elapsed: started.elapsed(),
        })
    }
}

/// Outcome of one stage.
#[derive(Debug, Clone, Serialize)]
pub struct StageReport {
    /// Method name
    pub name: &'static str,
    /// Method configuration at run time
    pub configuration: String,
    /// Blocks after the stage
    pub stats: BlockStats,
    /// Wall-clock duration of the stage
    pub elapsed: Duration,
}

impl StageReport {
    fn new(method: &dyn MethodDescription, blocks: &[Block], elapsed: Duration) -> Self {
        Self {
            name: method.method_name(),
            configuration: method.method_configuration(),
            stats: BlockStats::from_blocks(blocks),
            elapsed,
        }
    }
}

/// Outcome of a workflow run.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowResult {
    /// Blocks after the last stage
    pub blocks: Vec<Block>,
    /// Statistics of the final blocks
    pub stats: BlockStats,
    /// `name->name` summary of the stages
    pub workflow_name: String,
    /// Per-stage reports, in execution order
    pub stages: Vec<StageReport>,
    /// Wall-clock duration of the whole run
    pub elapsed: Duration,
}

impl WorkflowResult {
    /// Configuration of every stage, one per line
    #[must_use]
    pub fn workflow_configuration(&self) -> String {
        self.stages
            .iter()
            .map(|stage| stage.configuration.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
