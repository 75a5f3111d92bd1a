//! Statistical post-processing of Monte Carlo simulation output.
//!
//! This crate turns raw per-sample observable values into point estimates
//! with error bars:
//!
//! - **Tables and mappings**: Read delimited numeric tables and key them by
//!   one or more columns (e.g. temperature, system size)
//! - **Averaging**: Combine keyed mappings from repeated runs into per-key means and errors
//! - **Jackknife**: Leave-one-out estimates of (non-linear) functions of sample means
//! - **Bootstrap**: Resampling estimates for one, two or `N` independently measured quantities
//! - **Binning and autocorrelation**: Error estimates and diagnostics for correlated series
//! - **Reducers**: Errors of fluctuation quantities by reducing to the variance instead of the mean
//!
//! # Modules
//!
//! - [`table`]: Numeric tables, [`table::Cell`] keys/values and [`table::KeyedMapping`]
//! - [`loader`]: Parsing delimited text into tables and mappings
//! - [`matrix`]: Batches of equally long sample runs for the batched estimators
//! - [`average`]: Element-wise averaging of keyed mappings
//! - [`jackknife`]: Jackknife mean and error, plain and binned
//! - [`bootstrap`]: Bootstrap mean and error
//! - [`binning`]: Binning analysis
//! - [`autocorrelation`]: Normalized autocorrelation functions
//! - [`descriptive`]: Moments and the [`descriptive::Estimate`] result type
//! - [`reduce`]: Mean, variance and standard deviation reducers for sample groups
//! - [`precision`]: Accumulation precision (`f32` or `f64`)
//! - [`transform`]: Named default functions for the estimators
//! - [`error`]: Error types
//!
//! # Examples
//!
//! ## Jackknife error of a non-linear quantity
//!
//! ```
//! use mocasinns_stats::{jackknife::jackknife, precision::Precision};
//!
//! let magnetization = [0.9, 1.1, 1.0, 0.8, 1.2];
//! let squared = jackknife(&magnetization, |m| m * m, Precision::F64).unwrap();
//! assert!(squared.error > 0.0);
//! ```
//!
//! ## Bootstrap with an explicit random source
//!
//! ```
//! use mocasinns_stats::{bootstrap::bootstrap_2, precision::Precision, transform};
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg64;
//!
//! let mut rng = Pcg64::seed_from_u64(0);
//! let a = [1.0, 2.0, 3.0];
//! let b = [10.0, 20.0];
//! let sum = bootstrap_2(&a, &b, 500, transform::add, Precision::F64, &mut rng).unwrap();
//! assert!((sum.mean - 17.0).abs() < 2.0);
//! ```
//!
//! ## Averaging repeated runs
//!
//! ```
//! use mocasinns_stats::{
//!     average,
//!     loader::{self, LoadOptions},
//!     table::Cell,
//! };
//!
//! let options = LoadOptions::default();
//! let runs = ["1 0.5\n2 0.7\n", "1 0.7\n2 0.9\n"]
//!     .iter()
//!     .map(|text| loader::read_mapping(text.as_bytes(), &options))
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//!
//! let averaged = average::average(&runs).unwrap();
//! let mean = averaged.means.get(&Cell::Scalar(2.0)).and_then(Cell::as_scalar).unwrap();
//! assert!((mean - 0.8).abs() < 1e-12);
//! ```

pub mod autocorrelation;
pub mod average;
pub mod binning;
pub mod bootstrap;
pub mod descriptive;
pub mod error;
pub mod jackknife;
pub mod loader;
pub mod matrix;
pub mod precision;
pub mod reduce;
pub mod table;
pub mod transform;
