//! Element-wise averaging of keyed mappings from repeated measurement series.
//!
//! Every input mapping is typically the result of one independent simulation
//! run. For each key present in any of them, the values contributed by the
//! mappings that contain that key are combined into a mean and an error.
//! Mappings lacking a key simply contribute nothing for it, so keys may end
//! up averaged over different numbers of runs.
//!
//! # Examples
//!
//! ```
//! use mocasinns_stats::{average, table::{Cell, KeyedMapping}};
//!
//! let runs: Vec<KeyedMapping> = vec![
//!     [(2.0, 1.0), (4.0, 1.0)].into_iter().collect(),
//!     [(2.0, 2.0), (4.0, 3.0)].into_iter().collect(),
//! ];
//! let averaged = average::average(&runs).unwrap();
//! assert_eq!(averaged.means.get(&Cell::Scalar(4.0)), Some(&Cell::Scalar(2.0)));
//! assert_eq!(averaged.errors.get(&Cell::Scalar(4.0)), Some(&Cell::Scalar(1.0)));
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    descriptive::{self, Estimate},
    error::InvalidInputError,
    table::{Cell, KeyedMapping},
};

/// Per-key means and errors. Both mappings have the same key set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AveragedMapping {
    pub means: KeyedMapping,
    pub errors: KeyedMapping,
}

/// Averages `mappings` with the sample mean and the standard error of the mean.
///
/// Keys contributed by a single mapping get a NaN error.
pub fn average(mappings: &[KeyedMapping]) -> Result<AveragedMapping, InvalidInputError> {
    average_with(mappings, descriptive::mean_and_standard_error)
}

/// Averages `mappings`, reducing each key's contributions with `combine`.
///
/// `combine` receives the contributed values in mapping order. Tuple values
/// are combined component by component, and all contributions for a key must
/// have the same arity. An error returned by `combine` aborts the whole
/// average and is passed through unchanged.
///
/// # Examples
///
/// The jackknife can stand in for the default combiner:
///
/// ```
/// use mocasinns_stats::{average, jackknife, precision::Precision, table::KeyedMapping, transform};
///
/// let runs: Vec<KeyedMapping> = vec![
///     [(1.0, 1.0)].into_iter().collect(),
///     [(1.0, 2.0)].into_iter().collect(),
///     [(1.0, 3.0)].into_iter().collect(),
/// ];
/// let averaged = average::average_with(&runs, |values| {
///     jackknife::jackknife(values, transform::identity, Precision::F64)
/// })
/// .unwrap();
/// assert_eq!(averaged.means.len(), 1);
/// ```
pub fn average_with<F, E>(mappings: &[KeyedMapping], mut combine: F) -> Result<AveragedMapping, E>
where
    F: FnMut(&[f64]) -> Result<Estimate, E>,
    E: From<InvalidInputError>,
{
    let mut contributions: BTreeMap<&Cell, Vec<&Cell>> = BTreeMap::new();
    for mapping in mappings {
        for (key, value) in mapping {
            contributions.entry(key).or_default().push(value);
        }
    }
    tracing::debug!(
        mappings = mappings.len(),
        keys = contributions.len(),
        "averaging keyed mappings"
    );

    let mut averaged = AveragedMapping::default();
    for (key, values) in contributions {
        let (mean, error) = combine_values(&values, &mut combine)?;
        averaged.means.insert(key.clone(), mean);
        averaged.errors.insert(key.clone(), error);
    }
    Ok(averaged)
}

fn combine_values<F, E>(values: &[&Cell], combine: &mut F) -> Result<(Cell, Cell), E>
where
    F: FnMut(&[f64]) -> Result<Estimate, E>,
    E: From<InvalidInputError>,
{
    // Contributions are non-empty, every key was inserted together with a value
    let first = values[0];
    let arity = first.arity();
    if let Some(mismatch) = values.iter().find(|value| value.arity() != arity) {
        return Err(InvalidInputError::ArityMismatch {
            expected: arity,
            actual: mismatch.arity(),
        }
        .into());
    }
    // Same arity, so the only possible mix is a scalar and a 1-tuple
    if values.iter().any(|value| value.is_scalar() != first.is_scalar()) {
        return Err(InvalidInputError::ShapeMismatch { arity }.into());
    }

    let mut means = Vec::with_capacity(arity);
    let mut errors = Vec::with_capacity(arity);
    let mut component = Vec::with_capacity(values.len());
    for index in 0..arity {
        component.clear();
        component.extend(values.iter().map(|value| value.as_slice()[index]));
        let estimate = combine(&component)?;
        means.push(estimate.mean);
        errors.push(estimate.error);
    }

    Ok(match first {
        Cell::Scalar(_) => (Cell::Scalar(means[0]), Cell::Scalar(errors[0])),
        Cell::Tuple(_) => (Cell::Tuple(means), Cell::Tuple(errors)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping<const N: usize>(entries: [(f64, f64); N]) -> KeyedMapping {
        entries.into_iter().collect()
    }

    fn scalar(mapping: &KeyedMapping, key: f64) -> f64 {
        mapping
            .get(&Cell::Scalar(key))
            .and_then(Cell::as_scalar)
            .unwrap()
    }

    #[test]
    fn test_union_of_keys_with_uneven_counts() {
        let runs = [
            mapping([(2.0, 1.0), (4.0, 1.0)]),
            mapping([(2.0, 2.0), (4.0, 3.0)]),
            mapping([(2.0, 1.5)]),
        ];
        let averaged = average(&runs).unwrap();

        assert_eq!(averaged.means.len(), 2);
        assert_eq!(averaged.errors.len(), 2);
        assert!((scalar(&averaged.means, 2.0) - 1.5).abs() < 1e-12);
        assert!((scalar(&averaged.means, 4.0) - 2.0).abs() < 1e-12);
        let expected = (1.0_f64 / 6.0).sqrt() / 2.0_f64.sqrt();
        assert!((scalar(&averaged.errors, 2.0) - expected).abs() < 1e-12);
        assert!((scalar(&averaged.errors, 4.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_contribution_has_nan_error() {
        let runs = [mapping([(1.0, 5.0)]), mapping([(2.0, 7.0)])];
        let averaged = average(&runs).unwrap();
        assert_eq!(scalar(&averaged.means, 1.0), 5.0);
        assert!(scalar(&averaged.errors, 1.0).is_nan());
    }

    #[test]
    fn test_tuple_values_combine_per_component() {
        let runs: Vec<KeyedMapping> = vec![
            [(1.0, vec![1.0, 10.0])].into_iter().collect(),
            [(1.0, vec![3.0, 30.0])].into_iter().collect(),
        ];
        let averaged = average(&runs).unwrap();
        assert_eq!(
            averaged.means.get(&Cell::Scalar(1.0)),
            Some(&Cell::Tuple(vec![2.0, 20.0]))
        );
        assert_eq!(
            averaged.errors.get(&Cell::Scalar(1.0)),
            Some(&Cell::Tuple(vec![1.0, 10.0]))
        );
    }

    #[test]
    fn test_arity_mismatch() {
        let runs: Vec<KeyedMapping> = vec![
            [(1.0, Cell::Tuple(vec![1.0, 2.0]))].into_iter().collect(),
            [(1.0, Cell::Scalar(1.0))].into_iter().collect(),
        ];
        assert_eq!(
            average(&runs),
            Err(InvalidInputError::ArityMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_scalar_and_one_tuple_do_not_mix() {
        let runs: Vec<KeyedMapping> = vec![
            [(1.0, Cell::Scalar(1.0))].into_iter().collect(),
            [(1.0, Cell::Tuple(vec![2.0]))].into_iter().collect(),
        ];
        let err = average(&runs).unwrap_err();
        assert_eq!(err, InvalidInputError::ShapeMismatch { arity: 1 });
        assert_eq!(
            err.to_string(),
            "cannot combine a scalar with a tuple of arity 1"
        );
    }

    #[test]
    fn test_negative_zero_key_averages_with_zero() {
        let options = crate::loader::LoadOptions::default();
        let runs = ["0.0 1.0\n0.5 2.0\n", "-0.0 3.0\n0.5 4.0\n"]
            .iter()
            .map(|text| crate::loader::read_mapping(text.as_bytes(), &options).unwrap())
            .collect::<Vec<_>>();
        let averaged = average(&runs).unwrap();
        assert_eq!(averaged.means.len(), 2);
        assert_eq!(scalar(&averaged.means, 0.0), 2.0);
        assert_eq!(scalar(&averaged.errors, 0.0), 1.0);
        assert_eq!(scalar(&averaged.means, 0.5), 3.0);
    }

    #[test]
    fn test_combine_error_propagates() {
        #[derive(Debug, PartialEq)]
        enum CombineError {
            Rejected(usize),
            Invalid,
        }
        impl From<InvalidInputError> for CombineError {
            fn from(_: InvalidInputError) -> Self {
                Self::Invalid
            }
        }

        let runs = [mapping([(1.0, 1.0), (2.0, 2.0)]), mapping([(2.0, 3.0)])];
        let mut calls = 0;
        let result = average_with(&runs, |values| {
            calls += 1;
            if values.len() < 2 {
                return Err(CombineError::Rejected(values.len()));
            }
            Ok(Estimate::new(0.0, 0.0))
        });
        assert_eq!(result, Err(CombineError::Rejected(1)));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_empty_input() {
        let averaged = average(&[]).unwrap();
        assert!(averaged.means.is_empty());
        assert!(averaged.errors.is_empty());
    }
}
