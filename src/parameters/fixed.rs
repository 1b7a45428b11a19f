//! Single-value parameter space.

use super::ParameterSpace;
use crate::error::{BlockingError, Result};

/// A parameter pinned to one value: exactly one configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedValue<T> {
    value: T,
}

impl<T: Copy> FixedValue<T> {
    /// Pin a parameter to `value`.
    pub const fn new(value: T) -> Self {
        Self { value }
    }

    /// The pinned value
    pub fn value(&self) -> T {
        self.value
    }
}

impl<T: Copy> ParameterSpace for FixedValue<T> {
    type Value = T;

    fn count(&self) -> usize {
        1
    }

    fn value_at(&self, iteration: usize) -> Result<T> {
        if iteration == 0 {
            Ok(self.value)
        } else {
            Err(BlockingError::out_of_range(iteration, 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_configuration() {
        let fixed = FixedValue::new(6_usize);
        assert_eq!(fixed.count(), 1);
        assert_eq!(fixed.value_at(0).unwrap(), 6);
        assert!(fixed.value_at(1).is_err());
        assert_eq!(fixed.values(), vec![6]);
    }
}
