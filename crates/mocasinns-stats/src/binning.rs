//! Binning analysis for correlated time series
//!
//! Consecutive samples of a Markov chain are correlated, so the naive
//! standard error underestimates the true one. Averaging the series in bins
//! of `bin_size` consecutive samples produces bin means that are nearly
//! independent once the bin size exceeds the autocorrelation time.
//!
//! # Algorithm
//!
//! 1. Split the `n` samples into `m = n / bin_size` bins of consecutive samples;
//!    the last bin also takes the `n % bin_size` leftover samples
//! 2. Apply `function` to the mean of every bin
//! 3. Report the mean of those values and `sqrt(population_variance / (m - 1))`
//!
//! Increasing the bin size until the error stops growing is the usual way to
//! read off a reliable error, see [`binning_errors`].
//!
//! # Examples
//!
//! ```
//! use mocasinns_stats::{binning::binning, precision::Precision, transform};
//!
//! let samples = [1.0, 1.0, 3.0, 3.0, 5.0, 5.0];
//! let estimate = binning(&samples, 2, transform::identity, Precision::F64).unwrap();
//!
//! // Bin means are 1, 3 and 5
//! assert_eq!(estimate.mean, 3.0);
//! assert!((estimate.error - (4.0_f64 / 3.0).sqrt()).abs() < 1e-12);
//! ```

use crate::{
    descriptive::{self, Estimate},
    error::InvalidInputError,
    precision::Precision,
    reduce::Reduce,
};

/// Estimates the mean of `function` applied to bin means, and its standard error.
///
/// Fails if `bin_size` is zero or the series does not fill at least two bins.
pub fn binning<F>(
    samples: &[f64],
    bin_size: usize,
    function: F,
    precision: Precision,
) -> Result<Estimate, InvalidInputError>
where
    F: FnMut(f64) -> f64,
{
    binning_reduced(samples, bin_size, function, Reduce::Mean, precision)
}

/// Like [`binning`], but reduces every bin with `reduce` instead of the mean.
///
/// # Examples
///
/// ```
/// use mocasinns_stats::{binning::binning_reduced, precision::Precision, reduce::Reduce, transform};
///
/// let samples = [0.0, 2.0, 1.0, 5.0];
/// let estimate =
///     binning_reduced(&samples, 2, transform::identity, Reduce::Variance, Precision::F64).unwrap();
///
/// // Bin variances are 1 and 4
/// assert_eq!(estimate.mean, 2.5);
/// assert_eq!(estimate.error, 1.5);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn binning_reduced<F>(
    samples: &[f64],
    bin_size: usize,
    mut function: F,
    reduce: Reduce,
    precision: Precision,
) -> Result<Estimate, InvalidInputError>
where
    F: FnMut(f64) -> f64,
{
    let bins = bins(samples, bin_size)?;
    let values = bins
        .iter()
        .map(|bin| function(reduce.apply(bin.iter().copied(), precision)))
        .collect::<Vec<_>>();

    let variance = descriptive::population_variance(&values);
    Ok(Estimate::new(
        descriptive::mean(&values),
        (variance / (bins.len() - 1) as f64).sqrt(),
    ))
}

/// Splits `samples` into `samples.len() / bin_size` consecutive bins, the
/// last of which also takes the leftover samples.
///
/// Fails if `bin_size` is zero or fewer than two bins result.
pub(crate) fn bins(samples: &[f64], bin_size: usize) -> Result<Vec<&[f64]>, InvalidInputError> {
    if bin_size == 0 {
        return Err(InvalidInputError::ZeroBinSize);
    }
    let bin_count = samples.len() / bin_size;
    if bin_count < 2 {
        return Err(InvalidInputError::TooFewSamples {
            required: 2 * bin_size,
            actual: samples.len(),
        });
    }
    Ok((0..bin_count)
        .map(|bin| {
            let start = bin * bin_size;
            let end = if bin == bin_count - 1 {
                samples.len()
            } else {
                start + bin_size
            };
            &samples[start..end]
        })
        .collect())
}

/// Runs [`binning`] with the identity function for bin sizes `1, 2, 4, ...`
/// as long as at least two bins remain.
///
/// Returns `(bin_size, estimate)` pairs in increasing bin size.
pub fn binning_errors(
    samples: &[f64],
    precision: Precision,
) -> Result<Vec<(usize, Estimate)>, InvalidInputError> {
    if samples.len() < 2 {
        return Err(InvalidInputError::TooFewSamples {
            required: 2,
            actual: samples.len(),
        });
    }
    std::iter::successors(Some(1_usize), |size| size.checked_mul(2))
        .take_while(|&size| samples.len() / size >= 2)
        .map(|size| Ok((size, binning(samples, size, |x| x, precision)?)))
        .collect()
}
