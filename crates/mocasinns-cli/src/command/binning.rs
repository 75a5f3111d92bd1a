use mocasinns_stats::{binning, descriptive::Estimate, reduce::Reduce};
use serde::Serialize;

use crate::util::Output;

use super::series::{SeriesArg, Transform};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BinningArg {
    #[clap(flatten)]
    series: SeriesArg,
    /// Number of consecutive samples per bin (default: scan powers of two)
    #[arg(long)]
    bin_size: Option<usize>,
    /// Reduction of each bin (mean, variance or stddev), only used with --bin-size
    #[arg(long, default_value = "mean")]
    reduce: Reduce,
    /// Function applied to each reduced bin, only used with --bin-size
    #[arg(long, default_value = "identity")]
    transform: Transform,
}

#[derive(Debug, Serialize)]
struct BinningRow {
    bin_size: usize,
    mean: f64,
    error: f64,
}

impl BinningRow {
    fn new(bin_size: usize, estimate: Estimate) -> Self {
        Self {
            bin_size,
            mean: estimate.mean,
            error: estimate.error,
        }
    }
}

pub(crate) fn run(arg: &BinningArg) -> anyhow::Result<()> {
    let BinningArg {
        series,
        bin_size,
        reduce,
        transform,
    } = arg;
    let samples = series.read_samples()?;
    let precision = series.table.precision;

    let rows = match bin_size {
        Some(bin_size) => {
            let estimate = binning::binning_reduced(
                &samples,
                *bin_size,
                |x| transform.apply(x),
                *reduce,
                precision,
            )?;
            vec![BinningRow::new(*bin_size, estimate)]
        }
        None => binning::binning_errors(&samples, precision)?
            .into_iter()
            .map(|(bin_size, estimate)| BinningRow::new(bin_size, estimate))
            .collect(),
    };
    for row in &rows {
        tracing::debug!(
            "bin size {:>6}: {:.6} +- {:.6}",
            row.bin_size,
            row.mean,
            row.error
        );
    }
    Output::save_json(&rows, series.output.as_deref())
}
