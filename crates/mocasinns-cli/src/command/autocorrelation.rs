use std::path::PathBuf;

use anyhow::Context;
use mocasinns_stats::{autocorrelation, descriptive::EstimateSeries};
use serde::Serialize;

use crate::util::{self, Output, TableArg};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AutocorrelationArg {
    /// Table files, one per independent run
    #[arg(required = true)]
    files: Vec<PathBuf>,
    /// Column holding the samples
    #[arg(long, default_value_t = 0)]
    column: usize,
    /// Largest lag to report (default: all)
    #[arg(long)]
    max_lag: Option<usize>,
    #[clap(flatten)]
    table: TableArg,
    /// Output file path (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum AutocorrelationReport {
    Single { values: Vec<f64> },
    Runs(EstimateSeries),
}

pub(crate) fn run(arg: &AutocorrelationArg) -> anyhow::Result<()> {
    let options = arg.table.load_options();
    let runs = arg
        .files
        .iter()
        .map(|file| util::read_column(file, arg.column, &options))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let lags = arg.max_lag.map_or(usize::MAX, |max_lag| max_lag.saturating_add(1));

    let report = if let [samples] = runs.as_slice() {
        let mut values = autocorrelation::autocorrelation(samples)
            .context("Failed to compute autocorrelation function")?;
        values.truncate(lags);
        AutocorrelationReport::Single { values }
    } else {
        let mut series = autocorrelation::autocorrelation_runs(&runs)
            .context("Failed to compute autocorrelation function over runs")?;
        series.means.truncate(lags);
        series.errors.truncate(lags);
        tracing::info!("Averaged autocorrelation over {} runs", runs.len());
        AutocorrelationReport::Runs(series)
    };
    Output::save_json(&report, arg.output.as_deref())
}
