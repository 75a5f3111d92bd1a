//! Named default functions for the estimators.
//!
//! Any closure with a matching signature works in their place; these exist so
//! the defaults have a name at the call site.

/// Returns its argument unchanged. Default for single-sample estimators.
#[must_use]
pub fn identity(x: f64) -> f64 {
    x
}

#[must_use]
pub fn square(x: f64) -> f64 {
    x * x
}

/// Default combination for [`bootstrap_2`](crate::bootstrap::bootstrap_2).
#[must_use]
pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

/// Default combination for [`bootstrap_n`](crate::bootstrap::bootstrap_n).
#[must_use]
pub fn sum_of_all(values: &[f64]) -> f64 {
    values.iter().sum()
}
