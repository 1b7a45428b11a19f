//! The closed set of blocking methods and their search spaces.

use super::{
    ExtendedQGramsBlocking, ExtendedQGramsSearch, KeyGenerator, KeySet, QGramsBlocking,
    QGramsSearch, StandardBlocking,
};
use crate::error::{BlockingError, Result};
use crate::parameters::ParameterDescriptor;
use crate::pipeline::{ConfigurationSearch, MethodDescription};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Name of a blocking method, as used in configuration files and on the CLI.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum BlockingMethodKind {
    /// Standard (token) blocking
    Standard,
    /// Q-grams blocking
    QGrams,
    /// Extended q-grams blocking
    #[default]
    ExtendedQGrams,
}

impl BlockingMethodKind {
    /// Kebab-case name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::QGrams => "q-grams",
            Self::ExtendedQGrams => "extended-q-grams",
        }
    }

    /// All methods
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Standard, Self::QGrams, Self::ExtendedQGrams]
    }

    /// The method with its default configuration.
    #[must_use]
    pub fn default_method(&self) -> BlockingMethod {
        match self {
            Self::Standard => BlockingMethod::Standard(StandardBlocking),
            Self::QGrams => BlockingMethod::QGrams(QGramsBlocking::default()),
            Self::ExtendedQGrams => BlockingMethod::ExtendedQGrams(ExtendedQGramsBlocking::default()),
        }
    }

    /// The grid/random search space of the method.
    pub fn search(&self) -> Result<BlockingSearch> {
        Ok(match self {
            Self::Standard => BlockingSearch::Standard,
            Self::QGrams => BlockingSearch::QGrams(QGramsSearch::new()?),
            Self::ExtendedQGrams => BlockingSearch::ExtendedQGrams(ExtendedQGramsSearch::new()?),
        })
    }

    /// Build the method from explicit parameter values, falling back to
    /// defaults for the ones not given.
    ///
    /// Parameters the method does not take are rejected rather than ignored.
    pub fn configure(&self, q_gram_size: Option<usize>, threshold: Option<f64>) -> Result<BlockingMethod> {
        match self {
            Self::Standard => {
                if q_gram_size.is_some() || threshold.is_some() {
                    return Err(BlockingError::config(
                        "standard blocking takes no q-gram size or threshold",
                    ));
                }
                Ok(BlockingMethod::Standard(StandardBlocking))
            }
            Self::QGrams => {
                if threshold.is_some() {
                    return Err(BlockingError::config(
                        "q-grams blocking takes no combination threshold",
                    ));
                }
                let default = QGramsBlocking::default();
                Ok(BlockingMethod::QGrams(QGramsBlocking::new(
                    q_gram_size.unwrap_or(default.q_gram_size()),
                )?))
            }
            Self::ExtendedQGrams => {
                let default = ExtendedQGramsBlocking::default();
                Ok(BlockingMethod::ExtendedQGrams(ExtendedQGramsBlocking::new(
                    q_gram_size.unwrap_or(default.q_gram_size()),
                    threshold.unwrap_or(default.threshold()),
                )?))
            }
        }
    }
}

impl std::fmt::Display for BlockingMethodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for BlockingMethodKind {
    type Err = BlockingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "standard" | "token" | "standard-blocking" => Ok(Self::Standard),
            "q-grams" | "qgrams" | "q-grams-blocking" => Ok(Self::QGrams),
            "extended-q-grams" | "extended-qgrams" | "extended-q-grams-blocking" => {
                Ok(Self::ExtendedQGrams)
            }
            other => Err(BlockingError::config(format!(
                "unknown blocking method '{other}'. Valid options: {}",
                Self::all()
                    .iter()
                    .map(Self::name)
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}

/// A configured blocking method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockingMethod {
    /// Standard (token) blocking
    Standard(StandardBlocking),
    /// Q-grams blocking
    QGrams(QGramsBlocking),
    /// Extended q-grams blocking
    ExtendedQGrams(ExtendedQGramsBlocking),
}

impl BlockingMethod {
    /// Which method this is
    #[must_use]
    pub const fn kind(&self) -> BlockingMethodKind {
        match self {
            Self::Standard(_) => BlockingMethodKind::Standard,
            Self::QGrams(_) => BlockingMethodKind::QGrams,
            Self::ExtendedQGrams(_) => BlockingMethodKind::ExtendedQGrams,
        }
    }

    fn description(&self) -> &dyn MethodDescription {
        match self {
            Self::Standard(m) => m,
            Self::QGrams(m) => m,
            Self::ExtendedQGrams(m) => m,
        }
    }
}

impl Default for BlockingMethod {
    fn default() -> Self {
        BlockingMethodKind::default().default_method()
    }
}

impl KeyGenerator for BlockingMethod {
    fn blocking_keys(&self, attribute_value: &str) -> KeySet {
        match self {
            Self::Standard(m) => m.blocking_keys(attribute_value),
            Self::QGrams(m) => m.blocking_keys(attribute_value),
            Self::ExtendedQGrams(m) => m.blocking_keys(attribute_value),
        }
    }
}

impl MethodDescription for BlockingMethod {
    fn method_name(&self) -> &'static str {
        self.description().method_name()
    }

    fn method_info(&self) -> String {
        self.description().method_info()
    }

    fn parameter_descriptors(&self) -> Vec<ParameterDescriptor> {
        self.description().parameter_descriptors()
    }

    fn method_configuration(&self) -> String {
        self.description().method_configuration()
    }
}

/// Search space of any blocking method.
#[derive(Debug, Clone)]
pub enum BlockingSearch {
    /// Standard blocking has a single configuration
    Standard,
    /// Sweep over the q-gram size
    QGrams(QGramsSearch),
    /// Sweep over q-gram size and combination threshold
    ExtendedQGrams(ExtendedQGramsSearch),
}

impl ConfigurationSearch for BlockingSearch {
    type Method = BlockingMethod;

    fn number_of_grid_configurations(&self) -> usize {
        match self {
            Self::Standard => 1,
            Self::QGrams(s) => s.number_of_grid_configurations(),
            Self::ExtendedQGrams(s) => s.number_of_grid_configurations(),
        }
    }

    fn numbered_grid_configuration(&self, iteration: usize) -> Result<BlockingMethod> {
        match self {
            Self::Standard => standard_only(iteration),
            Self::QGrams(s) => s.numbered_grid_configuration(iteration).map(BlockingMethod::QGrams),
            Self::ExtendedQGrams(s) => s
                .numbered_grid_configuration(iteration)
                .map(BlockingMethod::ExtendedQGrams),
        }
    }

    fn numbered_random_configuration(&self, iteration: usize) -> Result<BlockingMethod> {
        match self {
            Self::Standard => standard_only(iteration),
            Self::QGrams(s) => s
                .numbered_random_configuration(iteration)
                .map(BlockingMethod::QGrams),
            Self::ExtendedQGrams(s) => s
                .numbered_random_configuration(iteration)
                .map(BlockingMethod::ExtendedQGrams),
        }
    }

    fn next_random_configuration(&mut self) -> Result<BlockingMethod> {
        match self {
            Self::Standard => Ok(BlockingMethod::Standard(StandardBlocking)),
            Self::QGrams(s) => s.next_random_configuration().map(BlockingMethod::QGrams),
            Self::ExtendedQGrams(s) => s
                .next_random_configuration()
                .map(BlockingMethod::ExtendedQGrams),
        }
    }
}

fn standard_only(iteration: usize) -> Result<BlockingMethod> {
    if iteration == 0 {
        Ok(BlockingMethod::Standard(StandardBlocking))
    } else {
        Err(BlockingError::out_of_range(iteration, 1))
    }
}
