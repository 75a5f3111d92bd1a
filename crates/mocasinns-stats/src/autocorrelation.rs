//! Normalized autocorrelation functions of sample series.
//!
//! For a series `x_0 .. x_{n-1}` with mean `m` and population variance `v`,
//! the normalized autocorrelation at lag `t` is
//!
//! ```text
//! c(t) = (mean over i of x_i * x_{i+t}  -  m^2) / v
//! ```
//!
//! where the inner mean runs over the `n - t` available pairs. `c(0)` is 1
//! and the function decays roughly like `exp(-t / tau)` for a Markov chain
//! with autocorrelation time `tau`. A constant series has zero variance and
//! yields non-finite values.

use crate::{
    descriptive::{self, EstimateSeries},
    error::InvalidInputError,
};

/// Normalized autocorrelation function of `samples` for lags `0..n`.
///
/// # Examples
///
/// ```
/// use mocasinns_stats::autocorrelation::autocorrelation;
///
/// let c = autocorrelation(&[1.0, -1.0, 1.0, -1.0]).unwrap();
/// assert_eq!(c.len(), 4);
/// assert_eq!(c[0], 1.0);
/// assert_eq!(c[1], -1.0);
/// ```
pub fn autocorrelation(samples: &[f64]) -> Result<Vec<f64>, InvalidInputError> {
    if samples.len() < 2 {
        return Err(InvalidInputError::TooFewSamples {
            required: 2,
            actual: samples.len(),
        });
    }
    let mean = descriptive::mean(samples);
    let variance = descriptive::population_variance(samples);
    Ok((0..samples.len())
        .map(|lag| {
            let products = samples
                .iter()
                .zip(&samples[lag..])
                .map(|(a, b)| a * b)
                .collect::<Vec<_>>();
            (descriptive::mean(&products) - mean * mean) / variance
        })
        .collect())
}

/// Mean and standard error of the autocorrelation function over independent runs.
///
/// Runs may differ in length; lags are computed up to the shortest run.
/// The error at each lag is `sqrt(population_variance / (runs - 1))`.
#[expect(clippy::cast_precision_loss)]
pub fn autocorrelation_runs<S>(runs: &[S]) -> Result<EstimateSeries, InvalidInputError>
where
    S: AsRef<[f64]>,
{
    if runs.len() < 2 {
        return Err(InvalidInputError::TooFewSamples {
            required: 2,
            actual: runs.len(),
        });
    }
    let functions = runs
        .iter()
        .map(|run| autocorrelation(run.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    let max_lag = functions.iter().map(Vec::len).min().unwrap_or(0);
    let scale = (runs.len() - 1) as f64;

    let mut at_lag = Vec::with_capacity(functions.len());
    Ok((0..max_lag)
        .map(|lag| {
            at_lag.clear();
            at_lag.extend(functions.iter().map(|function| function[lag]));
            descriptive::Estimate::new(
                descriptive::mean(&at_lag),
                (descriptive::population_variance(&at_lag) / scale).sqrt(),
            )
        })
        .collect())
}
