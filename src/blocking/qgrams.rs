//! Q-grams blocking: every character q-gram of every token is a key.

use super::{KeyGenerator, KeySet, tokenizer};
use crate::error::{BlockingError, Result};
use crate::parameters::{
    DEFAULT_RANDOM_SEED, GridSearch, ParameterDescriptor, ParameterSpace, RandomSearch,
};
use crate::pipeline::{ConfigurationSearch, MethodDescription};

pub(super) const DEFAULT_Q_GRAM_SIZE: usize = 6;
pub(super) const MIN_Q_GRAM_SIZE: usize = 2;
pub(super) const MAX_Q_GRAM_SIZE: usize = 6;
pub(super) const Q_GRAM_SIZE_STEP: usize = 1;

pub(super) const Q_GRAM_SIZE_NAME: &str = "Q-gram Size";

pub(super) fn q_gram_size_descriptor() -> ParameterDescriptor {
    ParameterDescriptor::new(
        Q_GRAM_SIZE_NAME,
        DEFAULT_Q_GRAM_SIZE,
        MIN_Q_GRAM_SIZE,
        MAX_Q_GRAM_SIZE,
        Q_GRAM_SIZE_STEP,
        format!("The {Q_GRAM_SIZE_NAME} defines the number of characters that comprise every q-gram."),
    )
}

pub(super) fn validate_q_gram_size(q_gram_size: usize) -> Result<()> {
    if q_gram_size == 0 {
        return Err(BlockingError::invalid_parameter(
            Q_GRAM_SIZE_NAME,
            "q-grams must contain at least 1 character",
        ));
    }
    Ok(())
}

/// Blocking on the character q-grams of every token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QGramsBlocking {
    q_gram_size: usize,
}

impl QGramsBlocking {
    /// Create the method, rejecting q-gram sizes below 1.
    pub fn new(q_gram_size: usize) -> Result<Self> {
        validate_q_gram_size(q_gram_size)?;
        Ok(Self { q_gram_size })
    }

    /// Number of characters per q-gram
    #[must_use]
    pub const fn q_gram_size(&self) -> usize {
        self.q_gram_size
    }
}

impl Default for QGramsBlocking {
    fn default() -> Self {
        Self {
            q_gram_size: DEFAULT_Q_GRAM_SIZE,
        }
    }
}

impl KeyGenerator for QGramsBlocking {
    fn blocking_keys(&self, attribute_value: &str) -> KeySet {
        tokenizer::tokens(attribute_value)
            .flat_map(|token| tokenizer::n_grams(self.q_gram_size, token))
            .collect()
    }
}

impl MethodDescription for QGramsBlocking {
    fn method_name(&self) -> &'static str {
        "Q-Grams Blocking"
    }

    fn method_info(&self) -> String {
        format!(
            "{}: it creates one block for every q-gram that is extracted from any token in the attribute values of any entity.\n\
             The q-gram must be shared by at least two entities.",
            self.method_name()
        )
    }

    fn parameter_descriptors(&self) -> Vec<ParameterDescriptor> {
        vec![q_gram_size_descriptor()]
    }

    fn method_configuration(&self) -> String {
        format!("{Q_GRAM_SIZE_NAME}={}", self.q_gram_size)
    }
}

/// Grid and random search over the q-gram size.
#[derive(Debug, Clone)]
pub struct QGramsSearch {
    grid_q_gram_size: GridSearch<usize>,
    random_q_gram_size: RandomSearch<usize>,
}

impl QGramsSearch {
    /// Search the default domain: sizes 2 to 6.
    pub fn new() -> Result<Self> {
        Ok(Self {
            grid_q_gram_size: GridSearch::new(MIN_Q_GRAM_SIZE, MAX_Q_GRAM_SIZE, Q_GRAM_SIZE_STEP)?,
            random_q_gram_size: RandomSearch::from_range(MIN_Q_GRAM_SIZE, MAX_Q_GRAM_SIZE)?
                .with_seed(DEFAULT_RANDOM_SEED),
        })
    }
}

impl ConfigurationSearch for QGramsSearch {
    type Method = QGramsBlocking;

    fn number_of_grid_configurations(&self) -> usize {
        self.grid_q_gram_size.count()
    }

    fn numbered_grid_configuration(&self, iteration: usize) -> Result<QGramsBlocking> {
        QGramsBlocking::new(self.grid_q_gram_size.value_at(iteration)?)
    }

    fn numbered_random_configuration(&self, iteration: usize) -> Result<QGramsBlocking> {
        QGramsBlocking::new(self.random_q_gram_size.value_at(iteration)?)
    }

    fn next_random_configuration(&mut self) -> Result<QGramsBlocking> {
        QGramsBlocking::new(self.random_q_gram_size.next_random())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_q_grams_of_every_token() {
        let method = QGramsBlocking::new(3).unwrap();
        let keys: Vec<String> = method.blocking_keys("abcd ab").into_iter().collect();
        assert_eq!(keys, vec!["abc", "bcd", "ab"]);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(QGramsBlocking::new(0).is_err());
    }

    #[test]
    fn test_grid_sweep() {
        let search = QGramsSearch::new().unwrap();
        assert_eq!(search.number_of_grid_configurations(), 5);
        let sizes: Vec<usize> = (0..5)
            .map(|i| search.numbered_grid_configuration(i).unwrap().q_gram_size())
            .collect();
        assert_eq!(sizes, vec![2, 3, 4, 5, 6]);
        assert!(search.numbered_grid_configuration(5).is_err());
    }

    #[test]
    fn test_random_configurations() {
        let mut search = QGramsSearch::new().unwrap();
        let first = search.numbered_random_configuration(4).unwrap();
        assert_eq!(first, search.numbered_random_configuration(4).unwrap());
        let size = search.next_random_configuration().unwrap().q_gram_size();
        assert!((2..=6).contains(&size));
    }

    #[test]
    fn test_configuration_string() {
        assert_eq!(QGramsBlocking::default().method_configuration(), "Q-gram Size=6");
    }
}
