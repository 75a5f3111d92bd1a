use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::{
    autocorrelation::AutocorrelationArg, average::AverageArg, binning::BinningArg,
    bootstrap::BootstrapArg, jackknife::JackknifeArg,
};

mod autocorrelation;
mod average;
mod binning;
mod bootstrap;
mod jackknife;
mod series;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v: debug, -vv: trace); `RUST_LOG` takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// What analysis to run
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Jackknife mean and error of one column
    Jackknife(#[clap(flatten)] JackknifeArg),
    /// Bootstrap mean and error of one column
    Bootstrap(#[clap(flatten)] BootstrapArg),
    /// Binning analysis of one column
    Binning(#[clap(flatten)] BinningArg),
    /// Normalized autocorrelation function of one column
    Autocorrelation(#[clap(flatten)] AutocorrelationArg),
    /// Average keyed tables from repeated runs
    Average(#[clap(flatten)] AverageArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(args.verbose);
    match args.mode {
        Mode::Jackknife(arg) => jackknife::run(&arg)?,
        Mode::Bootstrap(arg) => bootstrap::run(&arg)?,
        Mode::Binning(arg) => binning::run(&arg)?,
        Mode::Autocorrelation(arg) => autocorrelation::run(&arg)?,
        Mode::Average(arg) => average::run(&arg)?,
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
