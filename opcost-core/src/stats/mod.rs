//! Aggregate statistics over fixed-size series.
//!
//! Only the mean and the population standard deviation are provided. Both
//! are independent of the order of their input.

use statrs::statistics::Statistics;

/// Arithmetic mean, `Σx / n`. Returns NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().mean()
}

/// Population standard deviation, `sqrt(Σ(x - mean)² / n)`.
///
/// Divides by `n`, not `n - 1`. Returns NaN for an empty slice.
pub fn std_dev(values: &[f64]) -> f64 {
    values.iter().population_std_dev()
}

/// Mean and standard deviation of one series of values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleStats {
    pub mean: f64,
    pub std_dev: f64,
    pub count: usize,
}

impl SampleStats {
    /// Summarize a slice of values. Both aggregates are NaN when it is empty.
    pub fn of(values: &[f64]) -> Self {
        Self {
            mean: mean(values),
            std_dev: std_dev(values),
            count: values.len(),
        }
    }
}
