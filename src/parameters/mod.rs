//! Parameter spaces for automatic configuration sweeps.
//!
//! Every tunable algorithm describes each of its parameters with one of three
//! interchangeable strategies, all addressed by a single iteration index:
//!
//! - [`FixedValue`]: a single value, one configuration
//! - [`GridSearch`]: `min`, `min + step`, ... up to `max`
//! - [`RandomSearch`]: reproducible draws keyed by the iteration index, plus
//!   a free-running generator for unbounded random sweeps
//!
//! Several parameters are swept together with [`mixed_radix`], which splits a
//! global iteration index into one index per parameter (outermost first).
//!
//! ```rust
//! use er_blocking::parameters::{mixed_radix, GridSearch, ParameterSpace};
//!
//! let q_gram_size = GridSearch::new(2_usize, 6, 1).unwrap();
//! let threshold = GridSearch::new(0.8_f64, 0.95, 0.05).unwrap();
//!
//! let indices = mixed_radix(9, &[q_gram_size.count(), threshold.count()]).unwrap();
//! assert_eq!(indices, vec![2, 1]);
//! assert_eq!(q_gram_size.value_at(indices[0]).unwrap(), 4);
//! ```

mod descriptor;
mod fixed;
mod grid;
mod random;

pub use descriptor::{ParameterDescriptor, ParameterType};
pub use fixed::FixedValue;
pub use grid::GridSearch;
pub use random::{DEFAULT_RANDOM_BUDGET, DEFAULT_RANDOM_SEED, RandomSearch};

use crate::error::{BlockingError, Result};
use rand::Rng;

/// A parameter domain enumerable by iteration index.
pub trait ParameterSpace {
    /// Type of the parameter values
    type Value;

    /// Number of distinct configurations this space can produce (at least 1).
    fn count(&self) -> usize;

    /// Value of the configuration at `iteration`, for `iteration < count()`.
    fn value_at(&self, iteration: usize) -> Result<Self::Value>;

    /// Every value of the space, in iteration order.
    fn values(&self) -> Vec<Self::Value> {
        (0..self.count())
            .filter_map(|i| self.value_at(i).ok())
            .collect()
    }
}

/// Numeric types that can be swept by grid and random search.
pub trait SearchValue:
    Copy + PartialOrd + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static
{
    /// Type tag reported in parameter descriptors
    const TYPE: ParameterType;

    /// Number of grid points in `[min, max]` stepped by `step`, or `None`
    /// when the count does not fit in a `usize`.
    fn grid_len(min: Self, max: Self, step: Self) -> Option<usize>;

    /// The `i`-th grid point, never above `max`.
    fn grid_value(min: Self, max: Self, step: Self, i: usize) -> Self;

    /// Whether `step` is strictly positive.
    fn is_positive(step: Self) -> bool;

    /// Whether `value` is a usable bound (not NaN, not infinite).
    fn is_finite(value: Self) -> bool;

    /// Width of `[low, high]`, or `None` when it is not representable.
    fn checked_span(low: Self, high: Self) -> Option<Self>;

    /// Lower and upper bound of `centre ± spread`, or `None` when either
    /// bound is not representable.
    fn around(centre: Self, spread: Self) -> Option<(Self, Self)>;

    /// A uniform draw from `[low, high]`.
    fn sample<R: Rng + ?Sized>(rng: &mut R, low: Self, high: Self) -> Self;
}

impl SearchValue for usize {
    const TYPE: ParameterType = ParameterType::Integer;

    fn grid_len(min: Self, max: Self, step: Self) -> Option<usize> {
        max.checked_sub(min)?.checked_div(step)?.checked_add(1)
    }

    fn grid_value(min: Self, max: Self, step: Self, i: usize) -> Self {
        min.saturating_add(i.saturating_mul(step)).min(max)
    }

    fn is_positive(step: Self) -> bool {
        step > 0
    }

    fn is_finite(_value: Self) -> bool {
        true
    }

    fn checked_span(low: Self, high: Self) -> Option<Self> {
        high.checked_sub(low)
    }

    fn around(centre: Self, spread: Self) -> Option<(Self, Self)> {
        Some((centre.checked_sub(spread)?, centre.checked_add(spread)?))
    }

    fn sample<R: Rng + ?Sized>(rng: &mut R, low: Self, high: Self) -> Self {
        rng.gen_range(low..=high)
    }
}

/// Tolerance for floating grids: `(0.95 - 0.8) / 0.05` is `2.9999999999999996`.
const GRID_EPSILON: f64 = 1e-9;
const GRID_SCALE: f64 = 1e9;

impl SearchValue for f64 {
    const TYPE: ParameterType = ParameterType::Float;

    fn grid_len(min: Self, max: Self, step: Self) -> Option<usize> {
        let intervals = ((max - min) / step + GRID_EPSILON).floor();
        if !intervals.is_finite() || intervals < 0.0 || intervals >= usize::MAX as f64 {
            return None;
        }
        (intervals as usize).checked_add(1)
    }

    fn grid_value(min: Self, max: Self, step: Self, i: usize) -> Self {
        let raw = min + i as f64 * step;
        // Snap to the tolerance so 0.8 + 0.05 reads back as 0.85
        let scaled = raw * GRID_SCALE;
        let value = if scaled.is_finite() {
            scaled.round() / GRID_SCALE
        } else {
            raw
        };
        value.clamp(min, max)
    }

    fn is_positive(step: Self) -> bool {
        step > 0.0
    }

    fn is_finite(value: Self) -> bool {
        value.is_finite()
    }

    fn checked_span(low: Self, high: Self) -> Option<Self> {
        let span = high - low;
        span.is_finite().then_some(span)
    }

    fn around(centre: Self, spread: Self) -> Option<(Self, Self)> {
        let (low, high) = (centre - spread, centre + spread);
        (low.is_finite() && high.is_finite()).then_some((low, high))
    }

    fn sample<R: Rng + ?Sized>(rng: &mut R, low: Self, high: Self) -> Self {
        if low >= high {
            return low;
        }
        rng.gen_range(low..=high)
    }
}

/// Split a global iteration index into one index per parameter.
///
/// `counts` lists the configuration count of each parameter, outermost first.
/// For two parameters A and B: `i_a = i / count_b`, `i_b = i - i_a * count_b`.
pub fn mixed_radix(iteration: usize, counts: &[usize]) -> Result<Vec<usize>> {
    let total = total_configurations(counts);
    if iteration >= total {
        return Err(BlockingError::out_of_range(iteration, total));
    }

    let mut indices = vec![0; counts.len()];
    let mut remaining = iteration;
    for (slot, &count) in indices.iter_mut().zip(counts).rev() {
        *slot = remaining % count;
        remaining /= count;
    }
    Ok(indices)
}

/// Product of per-parameter configuration counts.
#[must_use]
pub fn total_configurations(counts: &[usize]) -> usize {
    counts.iter().product()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_radix_two_parameters() {
        // 5 q-gram sizes (outer) x 4 thresholds (inner)
        let counts = [5, 4];
        assert_eq!(mixed_radix(0, &counts).unwrap(), vec![0, 0]);
        assert_eq!(mixed_radix(3, &counts).unwrap(), vec![0, 3]);
        assert_eq!(mixed_radix(4, &counts).unwrap(), vec![1, 0]);
        assert_eq!(mixed_radix(19, &counts).unwrap(), vec![4, 3]);
    }

    #[test]
    fn test_mixed_radix_matches_nested_division() {
        let counts = [3, 4, 2];
        for i in 0..24 {
            let indices = mixed_radix(i, &counts).unwrap();
            let outer = i / (4 * 2);
            let middle = (i - outer * 8) / 2;
            let inner = i - outer * 8 - middle * 2;
            assert_eq!(indices, vec![outer, middle, inner]);
        }
    }

    #[test]
    fn test_mixed_radix_out_of_range() {
        let err = mixed_radix(20, &[5, 4]).unwrap_err();
        assert!(matches!(
            err,
            BlockingError::IterationOutOfRange {
                iteration: 20,
                count: 20
            }
        ));
    }

    #[test]
    fn test_mixed_radix_no_parameters() {
        assert_eq!(mixed_radix(0, &[]).unwrap(), Vec::<usize>::new());
        assert!(mixed_radix(1, &[]).is_err());
    }

    #[test]
    fn test_float_grid_len_tolerates_rounding() {
        assert_eq!(f64::grid_len(0.8, 0.95, 0.05), Some(4));
        assert_eq!(f64::grid_len(0.0, 1.0, 0.1), Some(11));
        assert_eq!(usize::grid_len(2, 6, 1), Some(5));
        assert_eq!(usize::grid_len(2, 7, 2), Some(3));
    }

    #[test]
    fn test_grid_len_overflow_is_none() {
        assert_eq!(usize::grid_len(0, usize::MAX, 1), None);
        assert_eq!(f64::grid_len(-f64::MAX, f64::MAX, 1.0), None);
        assert_eq!(f64::grid_len(0.0, 1.0, f64::MIN_POSITIVE), None);
    }

    #[test]
    fn test_around_rejects_unrepresentable_bounds() {
        assert_eq!(usize::around(4, 2), Some((2, 6)));
        assert_eq!(usize::around(2, 5), None);
        assert_eq!(usize::around(usize::MAX, 1), None);
        assert_eq!(f64::around(0.5, 0.1).map(|(low, _)| low), Some(0.4));
        assert_eq!(f64::around(f64::MAX, f64::MAX), None);
    }

    #[test]
    fn test_float_grid_values_are_snapped() {
        assert_eq!(f64::grid_value(0.8, 0.95, 0.05, 1).to_string(), "0.85");
        assert_eq!(f64::grid_value(0.8, 0.95, 0.05, 3), 0.95);
        assert_eq!(f64::grid_value(0.0, 1.0, 0.1, 3).to_string(), "0.3");
    }
}
