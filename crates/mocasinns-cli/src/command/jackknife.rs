use mocasinns_stats::{jackknife, reduce::Reduce};
use serde::Serialize;

use crate::util::Output;

use super::series::{SeriesArg, Transform};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct JackknifeArg {
    #[clap(flatten)]
    series: SeriesArg,
    /// Leave out whole bins of this many consecutive samples (default: single samples)
    #[arg(long)]
    bin_size: Option<usize>,
    /// Reduction of each leave-one-out set (mean, variance or stddev)
    #[arg(long, default_value = "mean")]
    reduce: Reduce,
    /// Function applied to each reduced value
    #[arg(long, default_value = "identity")]
    transform: Transform,
}

#[derive(Debug, Serialize)]
struct JackknifeReport {
    column: usize,
    samples: usize,
    bin_size: usize,
    reduce: Reduce,
    transform: Transform,
    mean: f64,
    error: f64,
}

pub(crate) fn run(arg: &JackknifeArg) -> anyhow::Result<()> {
    let JackknifeArg {
        series,
        bin_size,
        reduce,
        transform,
    } = arg;
    let samples = series.read_samples()?;
    let precision = series.table.precision;
    let function = |x| transform.apply(x);

    let estimate = match bin_size {
        Some(bin_size) => {
            jackknife::jackknife_binned_reduced(&samples, *bin_size, function, *reduce, precision)?
        }
        None => jackknife::jackknife_reduced(&samples, function, *reduce, precision)?,
    };

    let report = JackknifeReport {
        column: series.column,
        samples: samples.len(),
        bin_size: bin_size.unwrap_or(1),
        reduce: *reduce,
        transform: *transform,
        mean: estimate.mean,
        error: estimate.error,
    };
    Output::save_json(&report, series.output.as_deref())
}
