//! Arguments shared by the single-column subcommands

use std::path::PathBuf;

use mocasinns_stats::transform;

use crate::util::{self, TableArg};

/// Function applied to sample means before estimating
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Transform {
    #[default]
    Identity,
    Square,
    Abs,
}

impl Transform {
    pub(crate) fn apply(self, x: f64) -> f64 {
        match self {
            Transform::Identity => transform::identity(x),
            Transform::Square => transform::square(x),
            Transform::Abs => x.abs(),
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SeriesArg {
    /// Path to the table file
    pub file: PathBuf,
    /// Column holding the samples
    #[arg(long, default_value_t = 0)]
    pub column: usize,
    #[clap(flatten)]
    pub table: TableArg,
    /// Output file path (default: stdout)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl SeriesArg {
    pub(crate) fn read_samples(&self) -> anyhow::Result<Vec<f64>> {
        util::read_column(&self.file, self.column, &self.table.load_options())
    }
}
