//! Invariants of the estimators that must hold for any input.
//!
//! These complement the unit tests in each module with properties checked
//! over several generated data sets.

use mocasinns_stats::{
    average,
    bootstrap::{bootstrap, bootstrap_2, bootstrap_n},
    descriptive,
    jackknife::{jackknife, jackknife_batch, jackknife_binned},
    matrix::SampleMatrix,
    precision::Precision,
    table::{Cell, KeyedMapping, Table},
    transform,
};
use rand::SeedableRng as _;
use rand_distr::{Distribution as _, Normal, Uniform};
use rand_pcg::Pcg64;

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

fn generated_series(seed: u64) -> Vec<Vec<f64>> {
    let mut rng = Pcg64::seed_from_u64(seed);
    let len = Uniform::new_inclusive(2, 40).unwrap();
    let value = Uniform::new(-100.0, 100.0).unwrap();
    (0..25)
        .map(|_| {
            let n = len.sample(&mut rng);
            (0..n).map(|_| value.sample(&mut rng)).collect()
        })
        .collect()
}

// ============================================================================
// Jackknife
// ============================================================================

mod jackknife_properties {
    use super::*;

    #[test]
    fn identity_reproduces_sample_mean() {
        for samples in generated_series(1) {
            let estimate = jackknife(&samples, transform::identity, Precision::F64).unwrap();
            assert_close(estimate.mean, descriptive::mean(&samples), 1e-9);
        }
    }

    #[test]
    fn identity_error_is_standard_error_of_mean() {
        for samples in generated_series(2) {
            let estimate = jackknife(&samples, transform::identity, Precision::F64).unwrap();
            let expected = descriptive::mean_and_standard_error(&samples).unwrap();
            assert_close(estimate.error, expected.error, 1e-9 * expected.error.max(1.0));
        }
    }

    #[test]
    fn error_is_shift_invariant() {
        for samples in generated_series(3) {
            let shifted: Vec<f64> = samples.iter().map(|x| x + 1234.5).collect();
            let original = jackknife(&samples, transform::identity, Precision::F64).unwrap();
            let moved = jackknife(&shifted, transform::identity, Precision::F64).unwrap();
            assert_close(moved.error, original.error, 1e-8 * original.error.max(1.0));
            assert_close(moved.mean, original.mean + 1234.5, 1e-8);
        }
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        for samples in generated_series(4) {
            let first = jackknife(&samples, |x| x.powi(3), Precision::F64).unwrap();
            let second = jackknife(&samples, |x| x.powi(3), Precision::F64).unwrap();
            assert_eq!(first.mean.to_bits(), second.mean.to_bits());
            assert_eq!(first.error.to_bits(), second.error.to_bits());
        }
    }

    #[test]
    fn unit_bins_reproduce_plain_jackknife() {
        for samples in generated_series(5) {
            let plain = jackknife(&samples, transform::square, Precision::F64).unwrap();
            let binned = jackknife_binned(&samples, 1, transform::square, Precision::F64).unwrap();
            assert_eq!(plain, binned);
        }
    }

    #[test]
    fn known_values() {
        let samples = [1.0, 2.0, 3.0, 4.0, 5.0];
        let linear = jackknife(&samples, transform::identity, Precision::F64).unwrap();
        assert_close(linear.mean, 3.0, 1e-12);
        assert_close(linear.error, 0.5_f64.sqrt(), 1e-12);

        let squared = jackknife(&samples, transform::square, Precision::F64).unwrap();
        assert_close(squared.mean, 9.125, 1e-12);
        assert_close(squared.error, (2887.0_f64 / 160.0).sqrt(), 1e-12);
    }

    #[test]
    fn batch_over_runs() {
        let matrix =
            SampleMatrix::from_runs([[1.0, 2.0, 3.0, 4.0, 5.0], [2.0, 3.0, 4.0, 5.0, 6.0]])
                .unwrap();
        let series = jackknife_batch(&matrix, transform::identity, Precision::F64).unwrap();
        assert_close(series.means[0], 3.0, 1e-12);
        assert_close(series.means[1], 4.0, 1e-12);
        for error in &series.errors {
            assert_close(*error, 0.5_f64.sqrt(), 1e-12);
        }
    }
}

// ============================================================================
// Bootstrap
// ============================================================================

mod bootstrap_properties {
    use super::*;

    /// Normal samples drawn in mirrored pairs `mean ± d`, so the sample mean
    /// is exactly `mean` and only the resampling scatter remains.
    fn normal_samples(rng: &mut Pcg64, mean: f64, std_dev: f64, n: usize) -> Vec<f64> {
        let normal = Normal::new(0.0, std_dev).unwrap();
        (0..n / 2)
            .flat_map(|_| {
                let deviation = normal.sample(rng);
                [mean + deviation, mean - deviation]
            })
            .collect()
    }

    #[test]
    fn normal_sample_recovers_mean_and_error() {
        let mut rng = Pcg64::seed_from_u64(7);
        let samples = normal_samples(&mut rng, 5.0, 2.0, 1000);
        let estimate =
            bootstrap(&samples, 2000, transform::identity, Precision::F64, &mut rng).unwrap();
        assert_close(estimate.mean, 5.0, 0.1);
        assert_close(estimate.mean, descriptive::mean(&samples), 0.01);
        assert_close(estimate.error, 2.0 / 999.0_f64.sqrt(), 0.01);
    }

    #[test]
    fn two_sample_sum_of_normals() {
        let mut rng = Pcg64::seed_from_u64(8);
        let a = normal_samples(&mut rng, 5.0, 2.0, 1000);
        let b = normal_samples(&mut rng, 3.0, 1.0, 1000);
        let pair = bootstrap_2(&a, &b, 1000, transform::add, Precision::F64, &mut rng).unwrap();
        assert_close(pair.mean, 8.0, 0.1);
        assert_close(
            pair.mean,
            descriptive::mean(&a) + descriptive::mean(&b),
            0.02,
        );

        let list =
            bootstrap_n(&[&a, &b], 1000, transform::sum_of_all, Precision::F64, &mut rng)
                .unwrap();
        assert_close(list.mean, pair.mean, 0.03);
        assert_close(list.error, pair.error, 0.01);
    }

    #[test]
    fn same_seed_same_result() {
        let samples = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        let run = |seed| {
            bootstrap(
                &samples,
                100,
                transform::square,
                Precision::F64,
                &mut Pcg64::seed_from_u64(seed),
            )
            .unwrap()
        };
        assert_eq!(run(17), run(17));
        assert_ne!(run(17), run(18));
    }
}

// ============================================================================
// Tables and averaging
// ============================================================================

mod mapping_properties {
    use super::*;

    #[test]
    fn every_row_maps_once_with_last_write_wins() {
        let table = Table::from_rows([
            [1.0, 10.0],
            [2.0, 20.0],
            [1.0, 30.0],
            [3.0, 40.0],
        ])
        .unwrap();
        let mapping = table.to_mapping(&[0], &[1]).unwrap();
        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping.get(&Cell::Scalar(1.0)), Some(&Cell::Scalar(30.0)));
        assert_eq!(mapping.get(&Cell::Scalar(2.0)), Some(&Cell::Scalar(20.0)));
        assert_eq!(mapping.get(&Cell::Scalar(3.0)), Some(&Cell::Scalar(40.0)));
    }

    #[test]
    fn average_of_uneven_runs() {
        let runs: Vec<KeyedMapping> = vec![
            [(2.0, 1.0), (4.0, 1.0)].into_iter().collect(),
            [(2.0, 2.0), (4.0, 3.0)].into_iter().collect(),
            [(2.0, 1.5)].into_iter().collect(),
        ];
        let averaged = average::average(&runs).unwrap();
        let get = |mapping: &KeyedMapping, key| {
            mapping
                .get(&Cell::Scalar(key))
                .and_then(Cell::as_scalar)
                .unwrap()
        };

        assert_close(get(&averaged.means, 2.0), 1.5, 1e-12);
        assert_close(get(&averaged.means, 4.0), 2.0, 1e-12);
        assert_close(
            get(&averaged.errors, 2.0),
            (1.0_f64 / 6.0).sqrt() / 2.0_f64.sqrt(),
            1e-12,
        );
        assert_close(get(&averaged.errors, 4.0), 1.0, 1e-12);
        assert!(averaged.means.keys().eq(averaged.errors.keys()));
    }
}
