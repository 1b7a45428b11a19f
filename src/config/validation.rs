//! Configuration validation for er-blocking.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, BlockingConfig, ConfigurationSelection, ExecutionConfig, OutputConfig};
use crate::blocking::BlockingMethodKind;
use crate::parameters::DEFAULT_RANDOM_BUDGET;
use crate::pipeline::ConfigurationSearch;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.blocking.validate());
        errors.extend(self.execution.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for BlockingConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(q_gram_size) = self.q_gram_size {
            if self.method == BlockingMethodKind::Standard {
                errors.push(ConfigError::new(
                    "blocking.q_gram_size",
                    "Standard blocking takes no q-gram size",
                ));
            } else if q_gram_size == 0 {
                errors.push(ConfigError::new(
                    "blocking.q_gram_size",
                    "Q-gram size must be at least 1",
                ));
            }
        }

        if let Some(threshold) = self.threshold {
            if self.method != BlockingMethodKind::ExtendedQGrams {
                errors.push(ConfigError::new(
                    "blocking.threshold",
                    format!("{} blocking takes no combination threshold", self.method),
                ));
            } else if !(threshold > 0.0 && threshold <= 1.0) {
                errors.push(ConfigError::new(
                    "blocking.threshold",
                    format!("Threshold must be in (0.0, 1.0], got {threshold}"),
                ));
            }
        }

        if self.selection.is_search() && (self.q_gram_size.is_some() || self.threshold.is_some())
        {
            errors.push(ConfigError::new(
                "blocking.selection",
                "Explicit parameters cannot be combined with grid or random selection",
            ));
        }

        match self.selection {
            ConfigurationSelection::Grid { iteration } => {
                let count = self
                    .method
                    .search()
                    .map_or(0, |search| search.number_of_grid_configurations());
                if iteration >= count {
                    errors.push(ConfigError::new(
                        "blocking.selection.iteration",
                        format!(
                            "Grid iteration {iteration} is out of range for {} ({count} configurations)",
                            self.method
                        ),
                    ));
                }
            }
            ConfigurationSelection::Random { iteration } => {
                let count = match self.method {
                    BlockingMethodKind::Standard => 1,
                    _ => DEFAULT_RANDOM_BUDGET,
                };
                if iteration >= count {
                    errors.push(ConfigError::new(
                        "blocking.selection.iteration",
                        format!(
                            "Random iteration {iteration} is out of range for {} ({count} configurations)",
                            self.method
                        ),
                    ));
                }
            }
            ConfigurationSelection::Default | ConfigurationSelection::NextRandom => {}
        }

        errors
    }
}

impl Validatable for ExecutionConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.threads == Some(0) {
            errors.push(ConfigError::new(
                "execution.threads",
                "Thread count must be at least 1",
            ));
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file
            && let Some(parent) = file_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            errors.push(ConfigError::new(
                "output.file",
                format!("Parent directory does not exist: {}", parent.display()),
            ));
        }

        errors
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_threshold_validation() {
        let valid = BlockingConfig {
            threshold: Some(1.0),
            ..BlockingConfig::default()
        };
        assert!(valid.is_valid());

        for threshold in [0.0, -0.5, 1.5, f64::NAN] {
            let invalid = BlockingConfig {
                threshold: Some(threshold),
                ..BlockingConfig::default()
            };
            assert!(!invalid.is_valid(), "threshold {threshold} accepted");
        }
    }

    #[test]
    fn test_parameters_must_apply_to_method() {
        let config = BlockingConfig {
            method: BlockingMethodKind::QGrams,
            threshold: Some(0.9),
            ..BlockingConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "blocking.threshold");

        let config = BlockingConfig {
            method: BlockingMethodKind::Standard,
            q_gram_size: Some(3),
            ..BlockingConfig::default()
        };
        assert!(!config.is_valid());
    }

    #[test]
    fn test_grid_iteration_bounds() {
        let in_range = BlockingConfig {
            selection: ConfigurationSelection::Grid { iteration: 19 },
            ..BlockingConfig::default()
        };
        assert!(in_range.is_valid());

        let out_of_range = BlockingConfig {
            selection: ConfigurationSelection::Grid { iteration: 20 },
            ..BlockingConfig::default()
        };
        assert!(!out_of_range.is_valid());
    }

    #[test]
    fn test_search_selection_excludes_explicit_parameters() {
        let config = BlockingConfig {
            q_gram_size: Some(4),
            selection: ConfigurationSelection::NextRandom,
            ..BlockingConfig::default()
        };
        assert!(!config.is_valid());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let config = ExecutionConfig { threads: Some(0) };
        assert!(!config.is_valid());
    }

    #[test]
    fn test_output_parent_must_exist() {
        let config = OutputConfig {
            file: Some(PathBuf::from("/nonexistent/dir/blocks.json")),
            ..OutputConfig::default()
        };
        assert!(!config.is_valid());
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::new("test_field", "test error message");
        assert_eq!(error.to_string(), "test_field: test error message");
    }
}
