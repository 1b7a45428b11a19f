//! Configuration types for er-blocking.
//!
//! Provides structured configuration for choosing and parameterizing a
//! blocking method, running it, and writing its output.

use super::validation::Validatable;
use crate::blocking::{BlockingMethod, BlockingMethodKind};
use crate::error::{BlockingError, Result};
use crate::pipeline::{ConfigurationSearch, MethodDescription};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// Every section has defaults, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Blocking method and how its parameters are chosen
    pub blocking: BlockingConfig,
    /// Execution settings
    pub execution: ExecutionConfig,
    /// Output format and destination
    pub output: OutputConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the blocking method.
    pub const fn method(mut self, method: BlockingMethodKind) -> Self {
        self.config.blocking.method = method;
        self
    }

    /// Set an explicit q-gram size.
    pub const fn q_gram_size(mut self, q_gram_size: Option<usize>) -> Self {
        self.config.blocking.q_gram_size = q_gram_size;
        self
    }

    /// Set an explicit combination threshold.
    pub const fn threshold(mut self, threshold: Option<f64>) -> Self {
        self.config.blocking.threshold = threshold;
        self
    }

    /// Choose how the method configuration is selected.
    pub const fn selection(mut self, selection: ConfigurationSelection) -> Self {
        self.config.blocking.selection = selection;
        self
    }

    /// Set the worker thread count.
    pub const fn threads(mut self, threads: Option<usize>) -> Self {
        self.config.execution.threads = threads;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Blocking Configuration
// ============================================================================

/// Blocking method selection.
///
/// With the default selection, `q_gram_size` and `threshold` override the
/// method defaults. Grid and random selections pick both from the method's
/// search space instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BlockingConfig {
    /// Blocking method
    pub method: BlockingMethodKind,
    /// Characters per q-gram (q-grams and extended q-grams only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q_gram_size: Option<usize>,
    /// Combination threshold in (0, 1] (extended q-grams only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    /// How the method configuration is chosen
    pub selection: ConfigurationSelection,
}

impl BlockingConfig {
    /// Switch to another method, dropping parameters set for the old one.
    pub fn set_method(&mut self, method: BlockingMethodKind) {
        if self.method != method {
            self.method = method;
            self.q_gram_size = None;
            self.threshold = None;
        }
    }

    /// Turn the configuration into a configured blocking method.
    ///
    /// Fails with a validation error listing every problem if the
    /// configuration is invalid.
    pub fn resolve(&self) -> Result<BlockingMethod> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(BlockingError::validation(
                errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            ));
        }

        let method = match self.selection {
            ConfigurationSelection::Default => {
                self.method.configure(self.q_gram_size, self.threshold)?
            }
            ConfigurationSelection::Grid { iteration } => {
                self.method.search()?.numbered_grid_configuration(iteration)?
            }
            ConfigurationSelection::Random { iteration } => {
                self.method.search()?.numbered_random_configuration(iteration)?
            }
            ConfigurationSelection::NextRandom => self.method.search()?.next_random_configuration()?,
        };
        tracing::debug!(
            method = method.method_name(),
            configuration = %method.method_configuration(),
            "resolved blocking method"
        );
        Ok(method)
    }
}

/// Where the parameters of the blocking method come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum ConfigurationSelection {
    /// Method defaults, overridden by explicit values
    #[default]
    Default,
    /// Grid configuration number `iteration`
    Grid { iteration: usize },
    /// Reproducible random configuration number `iteration`
    Random { iteration: usize },
    /// A fresh random configuration on every run
    NextRandom,
}

impl ConfigurationSelection {
    /// Whether parameters are taken from a search space
    #[must_use]
    pub const fn is_search(&self) -> bool {
        !matches!(self, Self::Default)
    }
}

// ============================================================================
// Execution Configuration
// ============================================================================

/// Execution settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Worker threads for key computation (all cores if unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
}

// ============================================================================
// Output Configuration
// ============================================================================

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

/// Output format of the block-building commands.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable statistics
    #[default]
    Summary,
    /// Full block list as JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summary => write!(f, "summary"),
            Self::Json => write!(f, "json"),
        }
    }
}
