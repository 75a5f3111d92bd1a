//! Reductions of a group of samples to one observable.
//!
//! Every estimator reduces a subset of the samples (a leave-one-out set, a
//! resampled set, or a bin) to a single number before applying its function.
//! The usual reduction is the mean. Reducing with the variance instead gives
//! errors for fluctuation quantities such as the specific heat
//! `C ~ (<E^2> - <E>^2) / T^2` or the susceptibility.

use serde::Serialize;

use crate::precision::Precision;

/// How a group of samples is reduced to one value.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::FromStr, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Reduce {
    /// Arithmetic mean
    #[default]
    #[display("mean")]
    Mean,
    /// Population variance (divisor `n`)
    #[display("variance")]
    Variance,
    /// Square root of the population variance
    #[display("stddev")]
    StdDev,
}

impl Reduce {
    /// Reduces `values`, accumulating at `precision`.
    ///
    /// The iterator is cloned for the second pass of the variance.
    ///
    /// # Examples
    ///
    /// ```
    /// use mocasinns_stats::{precision::Precision, reduce::Reduce};
    ///
    /// let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    /// assert_eq!(Reduce::Mean.apply(values.iter().copied(), Precision::F64), 5.0);
    /// assert_eq!(Reduce::Variance.apply(values.iter().copied(), Precision::F64), 4.0);
    /// assert_eq!(Reduce::StdDev.apply(values.iter().copied(), Precision::F64), 2.0);
    /// ```
    #[must_use]
    pub fn apply<I>(self, values: I, precision: Precision) -> f64
    where
        I: Iterator<Item = f64> + Clone,
    {
        match self {
            Self::Mean => precision.mean(values),
            Self::Variance => variance(values, precision),
            Self::StdDev => variance(values, precision).sqrt(),
        }
    }
}

fn variance<I>(values: I, precision: Precision) -> f64
where
    I: Iterator<Item = f64> + Clone,
{
    let mean = precision.mean(values.clone());
    precision.mean(values.map(|value| (value - mean) * (value - mean)))
}
