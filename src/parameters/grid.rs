//! Exhaustive grid over a stepped range.

use super::{ParameterSpace, SearchValue};
use crate::error::{BlockingError, Result};

/// Grid search over `[min, max]` stepped by `step`.
///
/// `count = floor((max - min) / step) + 1` and `value_at(i) = min + i * step`,
/// so every iteration maps to a distinct value inside the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSearch<T> {
    min: T,
    max: T,
    step: T,
    count: usize,
}

impl<T: SearchValue> GridSearch<T> {
    /// Create a grid, rejecting non-finite bounds, non-positive steps,
    /// inverted ranges and grids too large to enumerate.
    pub fn new(min: T, max: T, step: T) -> Result<Self> {
        for (parameter, value) in [("min", min), ("max", max), ("step", step)] {
            if !T::is_finite(value) {
                return Err(BlockingError::invalid_parameter(
                    parameter,
                    format!("grid {parameter} must be finite, got {value}"),
                ));
            }
        }
        if !T::is_positive(step) {
            return Err(BlockingError::invalid_parameter(
                "step",
                format!("grid step must be positive, got {step}"),
            ));
        }
        if min > max {
            return Err(BlockingError::invalid_parameter(
                "range",
                format!("grid minimum {min} exceeds maximum {max}"),
            ));
        }

        let count = T::grid_len(min, max, step).ok_or_else(|| {
            BlockingError::invalid_parameter(
                "range",
                format!("grid [{min}, {max}] with step {step} has too many points"),
            )
        })?;

        Ok(Self {
            min,
            max,
            step,
            count,
        })
    }

    /// Lower bound
    pub fn min(&self) -> T {
        self.min
    }

    /// Upper bound
    pub fn max(&self) -> T {
        self.max
    }

    /// Step between consecutive values
    pub fn step(&self) -> T {
        self.step
    }
}

impl<T: SearchValue> ParameterSpace for GridSearch<T> {
    type Value = T;

    fn count(&self) -> usize {
        self.count
    }

    fn value_at(&self, iteration: usize) -> Result<T> {
        if iteration >= self.count {
            return Err(BlockingError::out_of_range(iteration, self.count));
        }
        Ok(T::grid_value(self.min, self.max, self.step, iteration))
    }
}
