//! Bootstrap estimation by resampling with replacement.
//!
//! Every variant shares one skeleton: draw as many indices as there are
//! samples, uniformly and with replacement, take the mean of the drawn
//! samples, apply `function`, and repeat `bootstrap_number` times. The
//! estimate is the mean of those replicates and its error is their
//! population standard deviation scaled by `sqrt(B / (B - 1))` for
//! `B = bootstrap_number`.
//!
//! The random source is always passed in explicitly. Use a seeded generator
//! such as `rand_pcg::Pcg64` for reproducible results.

use rand::Rng;

use crate::{
    descriptive::{self, Estimate, EstimateSeries},
    error::InvalidInputError,
    matrix::SampleMatrix,
    precision::Precision,
    reduce::Reduce,
};

/// Bootstrap mean and error of `function` applied to the mean of `samples`.
///
/// # Examples
///
/// ```
/// use mocasinns_stats::{bootstrap::bootstrap, precision::Precision, transform};
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg64;
///
/// let mut rng = Pcg64::seed_from_u64(7);
/// let samples = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let estimate = bootstrap(&samples, 1000, transform::identity, Precision::F64, &mut rng).unwrap();
/// assert!((estimate.mean - 3.0).abs() < 0.2);
/// ```
pub fn bootstrap<F, R>(
    samples: &[f64],
    bootstrap_number: usize,
    function: F,
    precision: Precision,
    rng: &mut R,
) -> Result<Estimate, InvalidInputError>
where
    F: FnMut(f64) -> f64,
    R: Rng + ?Sized,
{
    bootstrap_reduced(samples, bootstrap_number, function, Reduce::Mean, precision, rng)
}

/// Like [`bootstrap`], but reduces every resampled set with `reduce`.
///
/// # Examples
///
/// ```
/// use mocasinns_stats::{bootstrap::bootstrap_reduced, precision::Precision, reduce::Reduce, transform};
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg64;
///
/// let mut rng = Pcg64::seed_from_u64(3);
/// let samples = [4.0; 8];
/// let estimate = bootstrap_reduced(
///     &samples,
///     100,
///     transform::identity,
///     Reduce::Variance,
///     Precision::F64,
///     &mut rng,
/// )
/// .unwrap();
/// assert_eq!(estimate.mean, 0.0);
/// ```
pub fn bootstrap_reduced<F, R>(
    samples: &[f64],
    bootstrap_number: usize,
    mut function: F,
    reduce: Reduce,
    precision: Precision,
    rng: &mut R,
) -> Result<Estimate, InvalidInputError>
where
    F: FnMut(f64) -> f64,
    R: Rng + ?Sized,
{
    check_resamples(bootstrap_number)?;
    check_samples(samples.len())?;
    let mut indices = Vec::with_capacity(samples.len());
    let replicates = (0..bootstrap_number)
        .map(|_| function(resample(samples, &mut indices, reduce, precision, rng)))
        .collect::<Vec<_>>();
    tracing::debug!(
        bootstrap_number,
        samples = samples.len(),
        %reduce,
        "bootstrap finished"
    );
    Ok(descriptive::summarize(&replicates, correction(bootstrap_number)))
}

/// Runs the bootstrap on every run of `matrix`.
///
/// Each iteration draws one set of indices and applies it to all runs, so
/// runs holding different observables of the same measurements stay paired.
/// `function` is applied element-wise to each run's resampled mean.
pub fn bootstrap_batch<F, R>(
    matrix: &SampleMatrix,
    bootstrap_number: usize,
    mut function: F,
    precision: Precision,
    rng: &mut R,
) -> Result<EstimateSeries, InvalidInputError>
where
    F: FnMut(f64) -> f64,
    R: Rng + ?Sized,
{
    check_resamples(bootstrap_number)?;
    let n = matrix.run_len();
    check_samples(n)?;

    // replicates[run][iteration]
    let mut replicates = vec![Vec::with_capacity(bootstrap_number); matrix.runs()];
    let mut indices = vec![0; n];
    for _ in 0..bootstrap_number {
        for index in &mut indices {
            *index = rng.random_range(0..n);
        }
        for (run, values) in matrix.iter_runs().zip(&mut replicates) {
            values.push(function(precision.mean(indices.iter().map(|&i| run[i]))));
        }
    }
    tracing::debug!(
        bootstrap_number,
        runs = matrix.runs(),
        samples = n,
        "batched bootstrap finished"
    );
    let correction = correction(bootstrap_number);
    Ok(replicates
        .iter()
        .map(|values| descriptive::summarize(values, correction))
        .collect())
}

/// Bootstrap mean and error of `function(mean(a), mean(b))` for two independent data sets.
///
/// Both sets are resampled independently, each with its own size. The
/// default combination is [`transform::add`](crate::transform::add).
pub fn bootstrap_2<F, R>(
    samples_a: &[f64],
    samples_b: &[f64],
    bootstrap_number: usize,
    mut function: F,
    precision: Precision,
    rng: &mut R,
) -> Result<Estimate, InvalidInputError>
where
    F: FnMut(f64, f64) -> f64,
    R: Rng + ?Sized,
{
    check_resamples(bootstrap_number)?;
    check_samples(samples_a.len())?;
    check_samples(samples_b.len())?;
    let mut indices = Vec::new();
    let replicates = (0..bootstrap_number)
        .map(|_| {
            let mean_a = resample(samples_a, &mut indices, Reduce::Mean, precision, rng);
            let mean_b = resample(samples_b, &mut indices, Reduce::Mean, precision, rng);
            function(mean_a, mean_b)
        })
        .collect::<Vec<_>>();
    tracing::debug!(
        bootstrap_number,
        samples_a = samples_a.len(),
        samples_b = samples_b.len(),
        "two-sample bootstrap finished"
    );
    Ok(descriptive::summarize(&replicates, correction(bootstrap_number)))
}

/// Bootstrap mean and error of a function of `N` independently measured quantities.
///
/// `function` receives the resampled means in the order of `sample_list`.
/// The default combination is [`transform::sum_of_all`](crate::transform::sum_of_all).
///
/// # Examples
///
/// ```
/// use mocasinns_stats::{bootstrap::bootstrap_n, precision::Precision};
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg64;
///
/// let mut rng = Pcg64::seed_from_u64(1);
/// let energy = [1.0, 1.0, 1.0];
/// let energy_squared = [4.0, 4.0];
/// // Variance-like combination of two constant observables
/// let estimate = bootstrap_n(
///     &[&energy[..], &energy_squared[..]],
///     100,
///     |means| means[1] - means[0] * means[0],
///     Precision::F64,
///     &mut rng,
/// )
/// .unwrap();
/// assert_eq!(estimate.mean, 3.0);
/// assert_eq!(estimate.error, 0.0);
/// ```
pub fn bootstrap_n<S, F, R>(
    sample_list: &[S],
    bootstrap_number: usize,
    mut function: F,
    precision: Precision,
    rng: &mut R,
) -> Result<Estimate, InvalidInputError>
where
    S: AsRef<[f64]>,
    F: FnMut(&[f64]) -> f64,
    R: Rng + ?Sized,
{
    check_resamples(bootstrap_number)?;
    for samples in sample_list {
        check_samples(samples.as_ref().len())?;
    }
    let mut means = vec![0.0; sample_list.len()];
    let mut indices = Vec::new();
    let replicates = (0..bootstrap_number)
        .map(|_| {
            for (mean, samples) in means.iter_mut().zip(sample_list) {
                *mean = resample(samples.as_ref(), &mut indices, Reduce::Mean, precision, rng);
            }
            function(&means)
        })
        .collect::<Vec<_>>();
    tracing::debug!(
        bootstrap_number,
        quantities = sample_list.len(),
        "multi-sample bootstrap finished"
    );
    Ok(descriptive::summarize(&replicates, correction(bootstrap_number)))
}

/// Draws `samples.len()` indices with replacement into `indices` and reduces
/// the selected samples.
fn resample<R>(
    samples: &[f64],
    indices: &mut Vec<usize>,
    reduce: Reduce,
    precision: Precision,
    rng: &mut R,
) -> f64
where
    R: Rng + ?Sized,
{
    let n = samples.len();
    indices.clear();
    indices.extend((0..n).map(|_| rng.random_range(0..n)));
    reduce.apply(indices.iter().map(|&index| samples[index]), precision)
}

fn check_resamples(bootstrap_number: usize) -> Result<(), InvalidInputError> {
    if bootstrap_number < 2 {
        return Err(InvalidInputError::TooFewResamples {
            actual: bootstrap_number,
        });
    }
    Ok(())
}

fn check_samples(len: usize) -> Result<(), InvalidInputError> {
    if len == 0 {
        return Err(InvalidInputError::TooFewSamples {
            required: 1,
            actual: 0,
        });
    }
    Ok(())
}

#[expect(clippy::cast_precision_loss)]
fn correction(bootstrap_number: usize) -> f64 {
    let b = bootstrap_number as f64;
    (b / (b - 1.0)).sqrt()
}
