//! Workflow, reader and configuration integration tests.
//!
//! These tests exercise the read → block → process pipeline with the JSON
//! fixture collections and configuration files on disk.

use er_blocking::config::{
    AppConfig, ConfigurationSelection, OutputFormat, Validatable, load_config_file,
};
use er_blocking::parameters::ParameterDescriptor;
use er_blocking::{
    Block, BlockBuilding, BlockingError, BlockingMethodKind, BlockProcessing, EntityReader,
    JsonEntityReader, MethodDescription, Result, StandardBlocking, Workflow,
};
use std::path::{Path, PathBuf};

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

/// Drops blocks with more than `max_profiles` profiles.
struct SizePurging {
    max_profiles: usize,
}

impl MethodDescription for SizePurging {
    fn method_name(&self) -> &'static str {
        "Size-Based Block Purging"
    }

    fn method_info(&self) -> String {
        "Discards oversized blocks.".to_string()
    }

    fn parameter_descriptors(&self) -> Vec<ParameterDescriptor> {
        Vec::new()
    }

    fn method_configuration(&self) -> String {
        format!("Max Profiles={}", self.max_profiles)
    }
}

impl BlockProcessing for SizePurging {
    fn refine_blocks(&self, blocks: Vec<Block>) -> Result<Vec<Block>> {
        Ok(blocks
            .into_iter()
            .filter(|block| block.total_profiles() <= self.max_profiles)
            .collect())
    }
}

/// Always fails.
struct FailingStage;

impl MethodDescription for FailingStage {
    fn method_name(&self) -> &'static str {
        "Failing Stage"
    }

    fn method_info(&self) -> String {
        String::new()
    }

    fn parameter_descriptors(&self) -> Vec<ParameterDescriptor> {
        Vec::new()
    }

    fn method_configuration(&self) -> String {
        String::new()
    }
}

impl BlockProcessing for FailingStage {
    fn refine_blocks(&self, _blocks: Vec<Block>) -> Result<Vec<Block>> {
        Err(BlockingError::stage("Failing Stage", "no blocks for you"))
    }
}

// ============================================================================
// Reader Tests
// ============================================================================

mod reader {
    use super::*;

    #[test]
    fn reads_fixture_collections() {
        let d1 = JsonEntityReader::new(fixture_path("people_d1.json"))
            .entity_profiles()
            .unwrap();
        let d2 = JsonEntityReader::new(fixture_path("people_d2.json"))
            .entity_profiles()
            .unwrap();

        assert_eq!(d1.len(), 3);
        assert_eq!(d2.len(), 3);
        assert_eq!(d1[0].entity_url, "d1/1");
        assert_eq!(d2[1].len(), 1);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = JsonEntityReader::new(fixture_path("missing.json"))
            .entity_profiles()
            .unwrap_err();
        assert!(matches!(err, BlockingError::Read { .. }));
    }
}

// ============================================================================
// Workflow Tests
// ============================================================================

mod workflow {
    use super::*;

    fn collections() -> (Vec<er_blocking::EntityProfile>, Vec<er_blocking::EntityProfile>) {
        (
            JsonEntityReader::new(fixture_path("people_d1.json"))
                .entity_profiles()
                .unwrap(),
            JsonEntityReader::new(fixture_path("people_d2.json"))
                .entity_profiles()
                .unwrap(),
        )
    }

    #[test]
    fn clean_clean_fixture_blocks() {
        let (d1, d2) = collections();
        let result = Workflow::new(BlockingMethodKind::ExtendedQGrams.default_method())
            .run(&d1, Some(d2.as_slice()))
            .unwrap();

        // "Robert", "Maria", "Gonzalonzale" and 7 combinations of "Springfield"
        assert_eq!(result.stats.blocks, 10);
        assert_eq!(result.stats.comparisons, 10);
        for block in &result.blocks {
            let pair = (
                block.profile_indices_side1()[0],
                block.profile_indices_side2()[0],
            );
            assert!(pair == (0, 0) || pair == (1, 1), "unexpected pair {pair:?}");
        }
    }

    #[test]
    fn standard_blocking_on_fixtures() {
        let (d1, d2) = collections();
        let blocks = StandardBlocking.build_blocks(&d1, Some(d2.as_slice())).unwrap();
        // "Springfield" and "Maria"
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn processing_stages_run_in_order() {
        let d1 = vec![
            er_blocking::EntityProfile::new("1").with_attribute("name", "a b"),
            er_blocking::EntityProfile::new("2").with_attribute("name", "a b"),
            er_blocking::EntityProfile::new("3").with_attribute("name", "a"),
        ];
        let workflow = Workflow::new(BlockingMethodKind::Standard.default_method())
            .with_processing(SizePurging { max_profiles: 2 });

        assert_eq!(
            workflow.workflow_name(),
            "Standard Blocking->Size-Based Block Purging"
        );

        let result = workflow.run(&d1, None).unwrap();
        assert_eq!(result.stages.len(), 2);
        assert_eq!(result.stages[0].stats.blocks, 2);
        assert_eq!(result.stages[1].stats.blocks, 1);
        assert_eq!(result.stats.blocks, 1);
        assert_eq!(result.blocks[0].profile_indices_side1(), &[0, 1]);
        assert_eq!(
            result.workflow_configuration(),
            "Parameter-free method\nMax Profiles=2"
        );
    }

    #[test]
    fn stage_failure_carries_stage_name() {
        let d1 = vec![
            er_blocking::EntityProfile::new("1").with_attribute("name", "a"),
            er_blocking::EntityProfile::new("2").with_attribute("name", "a"),
        ];
        let err = Workflow::new(BlockingMethodKind::Standard.default_method())
            .with_processing(FailingStage)
            .run(&d1, None)
            .unwrap_err();

        assert!(!err.is_configuration_error());
        assert!(err.to_string().contains("Failing Stage"));
    }
}

// ============================================================================
// Configuration Tests
// ============================================================================

mod configuration {
    use super::*;

    #[test]
    fn config_file_drives_method() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join(".er-blocking.yaml");
        std::fs::write(
            &path,
            "blocking:\n  method: q-grams\n  selection:\n    mode: grid\n    iteration: 2\noutput:\n  format: json\n",
        )
        .unwrap();

        let config = load_config_file(&path).unwrap();
        assert!(config.is_valid());
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(
            config.blocking.selection,
            ConfigurationSelection::Grid { iteration: 2 }
        );

        let method = config.blocking.resolve().unwrap();
        assert_eq!(method.method_configuration(), "Q-gram Size=4");
    }

    #[test]
    fn invalid_file_config_is_reported_per_field() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(
            &path,
            "blocking:\n  method: standard\n  threshold: 0.9\nexecution:\n  threads: 0\n",
        )
        .unwrap();

        let config = load_config_file(&path).unwrap();
        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["blocking.threshold", "execution.threads"]);
    }

    #[test]
    fn empty_file_is_default_config() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "{}\n").unwrap();

        assert_eq!(load_config_file(&path).unwrap(), AppConfig::default());
    }
}
