use std::path::PathBuf;

use anyhow::Context;
use mocasinns_stats::{average, jackknife, transform};

use crate::util::{self, Output, TableArg};

/// How the values of one key are combined across runs
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub(crate) enum Method {
    /// Sample mean and standard error of the mean
    #[default]
    Mean,
    /// Jackknife mean and error
    Jackknife,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AverageArg {
    /// Table files, one per independent run
    #[arg(required = true)]
    files: Vec<PathBuf>,
    /// Key columns (comma-separated)
    #[arg(long, value_delimiter = ',', default_values_t = [0])]
    key_columns: Vec<usize>,
    /// Value columns (comma-separated)
    #[arg(long, value_delimiter = ',', default_values_t = [1])]
    value_columns: Vec<usize>,
    /// Combination method (mean or jackknife)
    #[arg(long, default_value = "mean")]
    method: Method,
    #[clap(flatten)]
    table: TableArg,
    /// Output file path (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &AverageArg) -> anyhow::Result<()> {
    let options = arg
        .table
        .load_options()
        .with_key_columns(arg.key_columns.clone())
        .with_value_columns(arg.value_columns.clone());
    let mappings = arg
        .files
        .iter()
        .map(|file| util::read_mapping_file(file, &options))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let precision = arg.table.precision;
    let averaged = match arg.method {
        Method::Mean => average::average(&mappings),
        Method::Jackknife => average::average_with(&mappings, |values| {
            jackknife::jackknife(values, transform::identity, precision)
        }),
    }
    .context("Failed to average tables")?;
    tracing::info!(
        "Averaged {} keys over {} runs",
        averaged.means.len(),
        mappings.len()
    );
    Output::save_json(&averaged, arg.output.as_deref())
}
