//! Moments of a sample and the (mean, error) result types returned by every estimator.

use serde::Serialize;

use crate::{error::InvalidInputError, precision::Precision};

/// A point estimate with its standard error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Estimate {
    /// The estimated value.
    pub mean: f64,
    /// The standard error of [`Self::mean`].
    pub error: f64,
}

impl Estimate {
    #[must_use]
    pub const fn new(mean: f64, error: f64) -> Self {
        Self { mean, error }
    }
}

impl From<(f64, f64)> for Estimate {
    fn from((mean, error): (f64, f64)) -> Self {
        Self { mean, error }
    }
}

/// Estimates for a batch of independent runs, one entry per run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EstimateSeries {
    pub means: Vec<f64>,
    pub errors: Vec<f64>,
}

impl EstimateSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.means.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }

    /// Returns the estimate at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Estimate> {
        Some(Estimate::new(*self.means.get(index)?, *self.errors.get(index)?))
    }

    pub fn iter(&self) -> impl Iterator<Item = Estimate> + '_ {
        self.means
            .iter()
            .zip(&self.errors)
            .map(|(&mean, &error)| Estimate::new(mean, error))
    }
}

impl FromIterator<Estimate> for EstimateSeries {
    fn from_iter<I: IntoIterator<Item = Estimate>>(iter: I) -> Self {
        let (means, errors) = iter.into_iter().map(|e| (e.mean, e.error)).unzip();
        Self { means, errors }
    }
}

/// Arithmetic mean in double precision. NaN for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    Precision::F64.mean(values.iter().copied())
}

/// Variance with divisor `n`.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn population_variance(values: &[f64]) -> f64 {
    let mean = mean(values);
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

/// Standard deviation with divisor `n`.
#[must_use]
pub fn population_std_dev(values: &[f64]) -> f64 {
    population_variance(values).sqrt()
}

/// Mean of `replicates` and their population standard deviation scaled by `correction`.
pub(crate) fn summarize(replicates: &[f64], correction: f64) -> Estimate {
    Estimate::new(mean(replicates), correction * population_std_dev(replicates))
}

/// Sample mean and standard error of the mean, `std_dev / sqrt(n - 1)`.
///
/// This is the default combiner of [`average`](crate::average::average).
/// A single value yields a NaN error.
///
/// # Examples
///
/// ```
/// use mocasinns_stats::descriptive::mean_and_standard_error;
///
/// let estimate = mean_and_standard_error(&[1.0, 3.0]).unwrap();
/// assert_eq!(estimate.mean, 2.0);
/// assert_eq!(estimate.error, 1.0);
/// assert!(mean_and_standard_error(&[1.0]).unwrap().error.is_nan());
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn mean_and_standard_error(values: &[f64]) -> Result<Estimate, InvalidInputError> {
    if values.is_empty() {
        return Err(InvalidInputError::TooFewSamples {
            required: 1,
            actual: 0,
        });
    }
    let n = values.len() as f64;
    Ok(Estimate::new(
        mean(values),
        population_std_dev(values) / (n - 1.0).sqrt(),
    ))
}

/// Applies `function` to the plain sample mean and reports a zero error.
///
/// There is no way to assess the error of a non-linear function this way;
/// use [`jackknife`](crate::jackknife::jackknife) or
/// [`bootstrap`](crate::bootstrap::bootstrap) when the error matters.
pub fn naive<F>(
    samples: &[f64],
    mut function: F,
    precision: Precision,
) -> Result<Estimate, InvalidInputError>
where
    F: FnMut(f64) -> f64,
{
    if samples.is_empty() {
        return Err(InvalidInputError::TooFewSamples {
            required: 1,
            actual: 0,
        });
    }
    Ok(Estimate::new(
        function(precision.mean(samples.iter().copied())),
        0.0,
    ))
}
