//! Leave-one-out jackknife estimation.
//!
//! For `n` samples, the `i`-th replicate is `function` applied to the mean of
//! all samples except sample `i`. The jackknife estimate is the mean of the
//! `n` replicates, and its error is `sqrt(n - 1)` times their population
//! standard deviation (divisor `n`).
//!
//! Applying a non-linear `function` to leave-one-out means rather than to
//! the raw samples is what makes the estimate useful for quantities such as
//! `<E>^2`.

use crate::{
    binning,
    descriptive::{self, Estimate, EstimateSeries},
    error::InvalidInputError,
    matrix::SampleMatrix,
    precision::Precision,
    reduce::Reduce,
};

/// Computes the jackknife mean and error of `function` applied to the mean of `samples`.
///
/// Fails when fewer than two samples are given.
///
/// # Examples
///
/// ```
/// use mocasinns_stats::{jackknife::jackknife, precision::Precision, transform};
///
/// let samples = [1.0, 2.0, 3.0, 4.0, 5.0];
///
/// let estimate = jackknife(&samples, transform::identity, Precision::F64).unwrap();
/// assert!((estimate.mean - 3.0).abs() < 1e-12);
/// assert!((estimate.error - 0.5_f64.sqrt()).abs() < 1e-12);
///
/// let estimate = jackknife(&samples, |x| x * x, Precision::F64).unwrap();
/// assert!((estimate.mean - 9.125).abs() < 1e-12);
/// assert!((estimate.error - (2887.0_f64 / 160.0).sqrt()).abs() < 1e-12);
/// ```
pub fn jackknife<F>(
    samples: &[f64],
    function: F,
    precision: Precision,
) -> Result<Estimate, InvalidInputError>
where
    F: FnMut(f64) -> f64,
{
    jackknife_reduced(samples, function, Reduce::Mean, precision)
}

/// Like [`jackknife`], but reduces every leave-one-out set with `reduce`.
///
/// With [`Reduce::Variance`] this gives the jackknife error of a fluctuation
/// quantity such as the specific heat.
pub fn jackknife_reduced<F>(
    samples: &[f64],
    mut function: F,
    reduce: Reduce,
    precision: Precision,
) -> Result<Estimate, InvalidInputError>
where
    F: FnMut(f64) -> f64,
{
    check_len(samples.len())?;
    let replicates = replicates(samples, &mut function, reduce, precision);
    tracing::debug!(replicates = replicates.len(), %reduce, "jackknife finished");
    Ok(descriptive::summarize(
        &replicates,
        correction(samples.len()),
    ))
}

/// Jackknife over bins of `bin_size` consecutive samples.
///
/// Each bin is reduced to its mean; replicate `j` is `function` applied to
/// the mean of all bin means except bin `j`. The last bin also takes the
/// leftover samples. With `bin_size == 1` this is [`jackknife`].
///
/// Fails if `bin_size` is zero or fewer than two bins result.
///
/// # Examples
///
/// ```
/// use mocasinns_stats::{jackknife::jackknife_binned, precision::Precision, transform};
///
/// // Bin means are 1, 2, 3, 4 and 5
/// let samples = [1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 4.0, 4.0, 5.0, 5.0];
/// let estimate = jackknife_binned(&samples, 2, transform::identity, Precision::F64).unwrap();
/// assert!((estimate.mean - 3.0).abs() < 1e-12);
/// assert!((estimate.error - 0.5_f64.sqrt()).abs() < 1e-12);
/// ```
pub fn jackknife_binned<F>(
    samples: &[f64],
    bin_size: usize,
    function: F,
    precision: Precision,
) -> Result<Estimate, InvalidInputError>
where
    F: FnMut(f64) -> f64,
{
    jackknife_binned_reduced(samples, bin_size, function, Reduce::Mean, precision)
}

/// Like [`jackknife_binned`], but reduces every bin with `reduce`.
pub fn jackknife_binned_reduced<F>(
    samples: &[f64],
    bin_size: usize,
    mut function: F,
    reduce: Reduce,
    precision: Precision,
) -> Result<Estimate, InvalidInputError>
where
    F: FnMut(f64) -> f64,
{
    let reduced = binning::bins(samples, bin_size)?
        .into_iter()
        .map(|bin| reduce.apply(bin.iter().copied(), precision))
        .collect::<Vec<_>>();
    let replicates = replicates(&reduced, &mut function, Reduce::Mean, precision);
    tracing::debug!(
        replicates = replicates.len(),
        bin_size,
        %reduce,
        "binned jackknife finished"
    );
    Ok(descriptive::summarize(
        &replicates,
        correction(reduced.len()),
    ))
}

/// Runs the jackknife independently on every run of `matrix`.
///
/// `function` is applied element-wise to each run's leave-one-out means.
///
/// # Examples
///
/// ```
/// use mocasinns_stats::{
///     jackknife::jackknife_batch, matrix::SampleMatrix, precision::Precision, transform,
/// };
///
/// let matrix = SampleMatrix::from_runs([[1.0, 2.0, 3.0, 4.0, 5.0], [2.0, 3.0, 4.0, 5.0, 6.0]])
///     .unwrap();
/// let series = jackknife_batch(&matrix, transform::identity, Precision::F64).unwrap();
/// assert!((series.means[0] - 3.0).abs() < 1e-12);
/// assert!((series.means[1] - 4.0).abs() < 1e-12);
/// assert!((series.errors[1] - 0.5_f64.sqrt()).abs() < 1e-12);
/// ```
pub fn jackknife_batch<F>(
    matrix: &SampleMatrix,
    mut function: F,
    precision: Precision,
) -> Result<EstimateSeries, InvalidInputError>
where
    F: FnMut(f64) -> f64,
{
    check_len(matrix.run_len())?;
    let correction = correction(matrix.run_len());
    let series = matrix
        .iter_runs()
        .map(|run| {
            let replicates = replicates(run, &mut function, Reduce::Mean, precision);
            descriptive::summarize(&replicates, correction)
        })
        .collect::<EstimateSeries>();
    tracing::debug!(
        runs = matrix.runs(),
        replicates = matrix.run_len(),
        "batched jackknife finished"
    );
    Ok(series)
}

fn check_len(len: usize) -> Result<(), InvalidInputError> {
    if len < 2 {
        return Err(InvalidInputError::TooFewSamples {
            required: 2,
            actual: len,
        });
    }
    Ok(())
}

#[expect(clippy::cast_precision_loss)]
fn correction(len: usize) -> f64 {
    ((len - 1) as f64).sqrt()
}

fn replicates<F>(samples: &[f64], function: &mut F, reduce: Reduce, precision: Precision) -> Vec<f64>
where
    F: FnMut(f64) -> f64,
{
    (0..samples.len())
        .map(|left_out| {
            let others = samples
                .iter()
                .enumerate()
                .filter(move |&(index, _)| index != left_out)
                .map(|(_, &value)| value);
            function(reduce.apply(others, precision))
        })
        .collect()
}
