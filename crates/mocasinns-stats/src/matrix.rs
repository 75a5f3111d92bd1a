//! Batches of equally long sample runs.

use crate::{error::InvalidInputError, table::Table};

/// A batch of independent sample runs of equal length, stored row-major.
///
/// Each row is one run; the batched estimators resample along the row, so
/// the result has one entry per row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleMatrix {
    data: Vec<f64>,
    runs: usize,
    run_len: usize,
}

impl SampleMatrix {
    /// Builds a matrix from runs, failing if they differ in length.
    ///
    /// # Examples
    ///
    /// ```
    /// use mocasinns_stats::matrix::SampleMatrix;
    ///
    /// let matrix = SampleMatrix::from_runs([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
    /// assert_eq!(matrix.runs(), 2);
    /// assert_eq!(matrix.run(1), &[4.0, 5.0, 6.0]);
    /// ```
    pub fn from_runs<I, R>(runs: I) -> Result<Self, InvalidInputError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[f64]>,
    {
        let mut matrix = Self::default();
        for run in runs {
            let run = run.as_ref();
            if matrix.runs == 0 {
                matrix.run_len = run.len();
            } else if run.len() != matrix.run_len {
                return Err(InvalidInputError::RaggedRows {
                    expected: matrix.run_len,
                    actual: run.len(),
                });
            }
            matrix.data.extend_from_slice(run);
            matrix.runs += 1;
        }
        Ok(matrix)
    }

    /// Takes the given table columns as runs, so each selected observable
    /// becomes one row.
    pub fn from_table_columns(table: &Table, columns: &[usize]) -> Result<Self, InvalidInputError> {
        let runs = columns
            .iter()
            .map(|&column| table.column(column))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_runs(runs)
    }

    #[must_use]
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Number of samples in every run.
    #[must_use]
    pub fn run_len(&self) -> usize {
        self.run_len
    }

    #[must_use]
    pub fn run(&self, index: usize) -> &[f64] {
        &self.data[index * self.run_len..(index + 1) * self.run_len]
    }

    pub fn iter_runs(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.runs).map(|index| self.run(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_runs_rejected() {
        let runs: [&[f64]; 2] = [&[1.0, 2.0, 3.0], &[1.0]];
        assert_eq!(
            SampleMatrix::from_runs(runs),
            Err(InvalidInputError::RaggedRows {
                expected: 3,
                actual: 1
            })
        );
    }

    #[test]
    fn test_from_table_columns() {
        let table = Table::from_rows([[1.0, 10.0], [2.0, 20.0], [3.0, 30.0]]).unwrap();
        let matrix = SampleMatrix::from_table_columns(&table, &[1, 0]).unwrap();
        assert_eq!(matrix.runs(), 2);
        assert_eq!(matrix.run_len(), 3);
        assert_eq!(matrix.run(0), &[10.0, 20.0, 30.0]);
        assert_eq!(matrix.run(1), &[1.0, 2.0, 3.0]);
        assert_eq!(matrix.iter_runs().count(), 2);
    }
}
