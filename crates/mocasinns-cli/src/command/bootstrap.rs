use mocasinns_stats::{bootstrap, reduce::Reduce};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64;
use serde::Serialize;

use crate::util::Output;

use super::series::{SeriesArg, Transform};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BootstrapArg {
    #[clap(flatten)]
    series: SeriesArg,
    /// Number of bootstrap resamplings
    #[arg(long, default_value_t = 1000)]
    resamples: usize,
    /// Seed for reproducible resampling (default: random)
    #[arg(long)]
    seed: Option<u64>,
    /// Reduction of each resampled set (mean, variance or stddev)
    #[arg(long, default_value = "mean")]
    reduce: Reduce,
    /// Function applied to each reduced value
    #[arg(long, default_value = "identity")]
    transform: Transform,
}

#[derive(Debug, Serialize)]
struct BootstrapReport {
    column: usize,
    samples: usize,
    resamples: usize,
    seed: u64,
    reduce: Reduce,
    transform: Transform,
    mean: f64,
    error: f64,
}

pub(crate) fn run(arg: &BootstrapArg) -> anyhow::Result<()> {
    let BootstrapArg {
        series,
        resamples,
        seed,
        reduce,
        transform,
    } = arg;
    let samples = series.read_samples()?;

    // Record the seed actually used so that the run can be repeated
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = Pcg64::seed_from_u64(seed);
    tracing::info!("Bootstrapping {} samples with {resamples} resamplings", samples.len());
    let estimate = bootstrap::bootstrap_reduced(
        &samples,
        *resamples,
        |x| transform.apply(x),
        *reduce,
        series.table.precision,
        &mut rng,
    )?;

    let report = BootstrapReport {
        column: series.column,
        samples: samples.len(),
        resamples: *resamples,
        seed,
        reduce: *reduce,
        transform: *transform,
        mean: estimate.mean,
        error: estimate.error,
    };
    Output::save_json(&report, series.output.as_deref())
}
