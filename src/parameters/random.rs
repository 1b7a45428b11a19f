//! Random search with reproducible, index-keyed draws.

use super::{ParameterSpace, SearchValue};
use crate::error::{BlockingError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Number of random trials a search space offers unless told otherwise.
pub const DEFAULT_RANDOM_BUDGET: usize = 100;

/// Base seed for index-keyed draws.
pub const DEFAULT_RANDOM_SEED: u64 = 0x5EED_B10C;

/// Random search over `centre ± spread`.
///
/// `value_at(i)` seeds a fresh ChaCha8 generator with `seed + i`, so the same
/// index yields the same value on every run and in any call order.
/// `next_random` draws from a free-running generator seeded from OS entropy
/// and gives no reproducibility guarantee.
#[derive(Debug, Clone)]
pub struct RandomSearch<T> {
    low: T,
    high: T,
    budget: usize,
    seed: u64,
    rng: ChaCha8Rng,
}

impl<T: SearchValue> RandomSearch<T> {
    /// Random search centred on `centre`, at most `spread` away from it.
    ///
    /// Fails when either bound of `centre ± spread` is not representable,
    /// e.g. an integer spread larger than its centre.
    pub fn new(centre: T, spread: T) -> Result<Self> {
        ensure_finite("centre", centre)?;
        ensure_finite("spread", spread)?;
        let (low, high) = T::around(centre, spread).ok_or_else(|| {
            BlockingError::invalid_parameter(
                "spread",
                format!("random search range {centre} ± {spread} is not representable"),
            )
        })?;
        if low > high {
            return Err(BlockingError::invalid_parameter(
                "spread",
                format!("random search spread must not be negative, got {spread}"),
            ));
        }
        Self::from_range(low, high)
    }

    /// Random search over the closed range `[min, max]`.
    pub fn from_range(min: T, max: T) -> Result<Self> {
        ensure_finite("min", min)?;
        ensure_finite("max", max)?;
        if min > max {
            return Err(BlockingError::invalid_parameter(
                "range",
                format!("random search minimum {min} exceeds maximum {max}"),
            ));
        }
        if T::checked_span(min, max).is_none() {
            return Err(BlockingError::invalid_parameter(
                "range",
                format!("random search range [{min}, {max}] is too wide to sample"),
            ));
        }
        Ok(Self::with_bounds(min, max))
    }

    fn with_bounds(low: T, high: T) -> Self {
        Self {
            low,
            high,
            budget: DEFAULT_RANDOM_BUDGET,
            seed: DEFAULT_RANDOM_SEED,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Set the number of index-addressable trials.
    pub fn with_budget(mut self, budget: usize) -> Result<Self> {
        if budget == 0 {
            return Err(BlockingError::invalid_parameter(
                "budget",
                "random search needs at least one trial",
            ));
        }
        self.budget = budget;
        Ok(self)
    }

    /// Set the base seed of index-keyed draws.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Lower and upper bound of the draws
    pub fn bounds(&self) -> (T, T) {
        (self.low, self.high)
    }

    /// Draw a value from the free-running generator.
    pub fn next_random(&mut self) -> T {
        T::sample(&mut self.rng, self.low, self.high)
    }
}

fn ensure_finite<T: SearchValue>(parameter: &str, value: T) -> Result<()> {
    if T::is_finite(value) {
        Ok(())
    } else {
        Err(BlockingError::invalid_parameter(
            parameter,
            format!("random search {parameter} must be finite, got {value}"),
        ))
    }
}

impl<T: SearchValue> ParameterSpace for RandomSearch<T> {
    type Value = T;

    fn count(&self) -> usize {
        self.budget
    }

    fn value_at(&self, iteration: usize) -> Result<T> {
        if iteration >= self.budget {
            return Err(BlockingError::out_of_range(iteration, self.budget));
        }
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed.wrapping_add(iteration as u64));
        Ok(T::sample(&mut rng, self.low, self.high))
    }
}
