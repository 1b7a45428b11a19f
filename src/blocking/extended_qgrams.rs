//! Extended q-grams blocking.
//!
//! Instead of using single q-grams as keys, a token's q-grams are combined
//! into longer keys: every order-preserving combination of at least
//! `max(1, floor(k * threshold))` of the token's `k` q-grams becomes a key.
//! Two tokens then share a key when they agree on almost all of their
//! q-grams, which tolerates a few altered characters.
//!
//! For `"roberts"` with q-gram size 6 the q-grams are `robert` and `oberts`,
//! the minimum length is `max(1, floor(2 * 0.95)) = 1` and the keys are
//! `robert`, `oberts` and `robertoberts`.

use super::qgrams::{
    DEFAULT_Q_GRAM_SIZE, MAX_Q_GRAM_SIZE, MIN_Q_GRAM_SIZE, Q_GRAM_SIZE_NAME, Q_GRAM_SIZE_STEP,
    q_gram_size_descriptor, validate_q_gram_size,
};
use super::{KeyGenerator, KeySet, combinations, tokenizer};
use crate::error::{BlockingError, Result};
use crate::parameters::{
    DEFAULT_RANDOM_SEED, GridSearch, ParameterDescriptor, ParameterSpace, RandomSearch,
    mixed_radix,
};
use crate::pipeline::{ConfigurationSearch, MethodDescription};

/// Q-grams per token that take part in combinations; later q-grams are ignored.
pub const MAX_Q_GRAMS: usize = 15;

const DEFAULT_THRESHOLD: f64 = 0.95;
const MIN_GRID_THRESHOLD: f64 = 0.8;
const MAX_GRID_THRESHOLD: f64 = 0.95;
const THRESHOLD_STEP: f64 = 0.05;
const MAX_RANDOM_THRESHOLD: f64 = 0.99;

const THRESHOLD_NAME: &str = "Combination Threshold";

/// Distinct seed so threshold draws do not mirror q-gram size draws.
const THRESHOLD_SEED: u64 = DEFAULT_RANDOM_SEED ^ 0x9E37_79B9_7F4A_7C15;

/// Blocking on combinations of q-grams.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtendedQGramsBlocking {
    q_gram_size: usize,
    threshold: f64,
}

impl ExtendedQGramsBlocking {
    /// Create the method.
    ///
    /// Fails for q-gram sizes below 1 and thresholds outside `(0, 1]`.
    pub fn new(q_gram_size: usize, threshold: f64) -> Result<Self> {
        validate_q_gram_size(q_gram_size)?;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(BlockingError::invalid_parameter(
                THRESHOLD_NAME,
                format!("threshold must lie in (0, 1], got {threshold}"),
            ));
        }
        Ok(Self {
            q_gram_size,
            threshold,
        })
    }

    /// Number of characters per q-gram
    #[must_use]
    pub const fn q_gram_size(&self) -> usize {
        self.q_gram_size
    }

    /// Share of a token's q-grams that every key must combine
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Smallest number of q-grams combined into a key for a token with
    /// `q_grams` q-grams.
    #[must_use]
    pub fn minimum_length(&self, q_grams: usize) -> usize {
        ((q_grams as f64 * self.threshold).floor() as usize).max(1)
    }

    fn token_keys(&self, token: &str, keys: &mut KeySet) {
        let mut q_grams = tokenizer::n_grams(self.q_gram_size, token);
        match q_grams.len() {
            0 => {}
            1 => {
                keys.extend(q_grams);
            }
            _ => {
                q_grams.truncate(MAX_Q_GRAMS);
                let minimum_length = self.minimum_length(q_grams.len());
                for length in minimum_length..=q_grams.len() {
                    keys.extend(combinations(&q_grams, length));
                }
            }
        }
    }
}

impl Default for ExtendedQGramsBlocking {
    fn default() -> Self {
        Self {
            q_gram_size: DEFAULT_Q_GRAM_SIZE,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl KeyGenerator for ExtendedQGramsBlocking {
    fn blocking_keys(&self, attribute_value: &str) -> KeySet {
        let mut keys = KeySet::new();
        for token in tokenizer::tokens(attribute_value) {
            self.token_keys(token, &mut keys);
        }
        keys
    }
}

impl MethodDescription for ExtendedQGramsBlocking {
    fn method_name(&self) -> &'static str {
        "Extended Q-Grams Blocking"
    }

    fn method_info(&self) -> String {
        format!(
            "{}: it creates one block for every combination of q-grams that represents at least two entities.\n\
             The q-grams are extracted from any token in the attribute values of any entity.",
            self.method_name()
        )
    }

    fn parameter_descriptors(&self) -> Vec<ParameterDescriptor> {
        vec![
            q_gram_size_descriptor(),
            ParameterDescriptor::new(
                THRESHOLD_NAME,
                DEFAULT_THRESHOLD,
                MIN_GRID_THRESHOLD,
                MAX_GRID_THRESHOLD,
                THRESHOLD_STEP,
                format!(
                    "The {THRESHOLD_NAME} (t) defines the number of q-grams that are combined to form an individual blocking key.\n\
                     The minimum number l_min of q-grams per blocking key is l_min = max(1, floor(k * t)), \
                     where k is the number of q-grams of the original token."
                ),
            ),
        ]
    }

    fn method_configuration(&self) -> String {
        format!(
            "{Q_GRAM_SIZE_NAME}={},\t{THRESHOLD_NAME}={}",
            self.q_gram_size, self.threshold
        )
    }
}

/// Joint search over q-gram size (outer) and combination threshold (inner).
#[derive(Debug, Clone)]
pub struct ExtendedQGramsSearch {
    grid_q_gram_size: GridSearch<usize>,
    grid_threshold: GridSearch<f64>,
    random_q_gram_size: RandomSearch<usize>,
    random_threshold: RandomSearch<f64>,
}

impl ExtendedQGramsSearch {
    /// Search the default domain: sizes 2 to 6, grid thresholds 0.80 to 0.95,
    /// random thresholds 0.80 to 0.99.
    pub fn new() -> Result<Self> {
        Ok(Self {
            grid_q_gram_size: GridSearch::new(MIN_Q_GRAM_SIZE, MAX_Q_GRAM_SIZE, Q_GRAM_SIZE_STEP)?,
            grid_threshold: GridSearch::new(MIN_GRID_THRESHOLD, MAX_GRID_THRESHOLD, THRESHOLD_STEP)?,
            random_q_gram_size: RandomSearch::from_range(MIN_Q_GRAM_SIZE, MAX_Q_GRAM_SIZE)?
                .with_seed(DEFAULT_RANDOM_SEED),
            random_threshold: RandomSearch::from_range(MIN_GRID_THRESHOLD, MAX_RANDOM_THRESHOLD)?
                .with_seed(THRESHOLD_SEED),
        })
    }
}

impl ConfigurationSearch for ExtendedQGramsSearch {
    type Method = ExtendedQGramsBlocking;

    fn number_of_grid_configurations(&self) -> usize {
        self.grid_q_gram_size.count() * self.grid_threshold.count()
    }

    fn numbered_grid_configuration(&self, iteration: usize) -> Result<ExtendedQGramsBlocking> {
        let indices = mixed_radix(
            iteration,
            &[self.grid_q_gram_size.count(), self.grid_threshold.count()],
        )?;
        ExtendedQGramsBlocking::new(
            self.grid_q_gram_size.value_at(indices[0])?,
            self.grid_threshold.value_at(indices[1])?,
        )
    }

    fn numbered_random_configuration(&self, iteration: usize) -> Result<ExtendedQGramsBlocking> {
        ExtendedQGramsBlocking::new(
            self.random_q_gram_size.value_at(iteration)?,
            self.random_threshold.value_at(iteration)?,
        )
    }

    fn next_random_configuration(&mut self) -> Result<ExtendedQGramsBlocking> {
        ExtendedQGramsBlocking::new(
            self.random_q_gram_size.next_random(),
            self.random_threshold.next_random(),
        )
    }
}
