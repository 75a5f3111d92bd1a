//! Rectangular numeric tables and their conversion into keyed mappings.
//!
//! A [`Table`] holds observations in rows and variables in columns. Selecting
//! key and value columns turns it into a [`KeyedMapping`], the form used to
//! combine repeated simulation runs with [`average`](crate::average::average).
//!
//! # Examples
//!
//! ```
//! use mocasinns_stats::table::{Cell, Table};
//!
//! let table = Table::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
//!
//! let mapping = table.to_mapping(&[0], &[1]).unwrap();
//! assert_eq!(mapping.get(&Cell::Scalar(4.0)), Some(&Cell::Scalar(5.0)));
//!
//! let mapping = table.to_mapping(&[0, 1], &[2]).unwrap();
//! assert_eq!(
//!     mapping.get(&Cell::Tuple(vec![1.0, 2.0])),
//!     Some(&Cell::Scalar(3.0))
//! );
//! ```

use std::{cmp::Ordering, collections::BTreeMap, slice};

use serde::{Serialize, Serializer};

use crate::error::{ColumnRole, InvalidInputError};

/// A key or value of a [`KeyedMapping`]: one number, or an ordered tuple of numbers.
///
/// Cells are totally ordered (scalars before tuples, numbers compared with
/// [`f64::total_cmp`]) so they can be used as map keys. Negative zero is
/// stored and compared as positive zero.
#[derive(Debug, Clone, derive_more::IsVariant, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Scalar(f64),
    Tuple(Vec<f64>),
}

impl Cell {
    /// Builds a scalar for a single value and a tuple otherwise.
    #[must_use]
    pub fn from_values(mut values: Vec<f64>) -> Self {
        if values.len() == 1 {
            Self::Scalar(unsigned_zero(values[0]))
        } else {
            values.iter_mut().for_each(|value| *value = unsigned_zero(*value));
            Self::Tuple(values)
        }
    }

    /// The components of this cell; a scalar has exactly one.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Self::Scalar(value) => slice::from_ref(value),
            Self::Tuple(values) => values,
        }
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.as_slice().len()
    }

    #[must_use]
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(value) => Some(*value),
            Self::Tuple(_) => None,
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Scalar(unsigned_zero(value))
    }
}

impl From<Vec<f64>> for Cell {
    fn from(values: Vec<f64>) -> Self {
        Self::Tuple(values.into_iter().map(unsigned_zero).collect())
    }
}

// -0.0 + 0.0 == +0.0
fn unsigned_zero(value: f64) -> f64 {
    value + 0.0
}

fn compare_values(a: f64, b: f64) -> Ordering {
    unsigned_zero(a).total_cmp(&unsigned_zero(b))
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cell {}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => compare_values(*a, *b),
            (Self::Scalar(_), Self::Tuple(_)) => Ordering::Less,
            (Self::Tuple(_), Self::Scalar(_)) => Ordering::Greater,
            (Self::Tuple(a), Self::Tuple(b)) => a
                .iter()
                .zip(b)
                .map(|(&x, &y)| compare_values(x, y))
                .find(|ord| ord.is_ne())
                .unwrap_or_else(|| a.len().cmp(&b.len())),
        }
    }
}

/// An associative map from [`Cell`] keys to [`Cell`] values, iterated in key order.
///
/// Built once from a table and read-only afterwards. Inserting an existing
/// key replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyedMapping {
    entries: BTreeMap<Cell, Cell>,
}

impl KeyedMapping {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, returning the value it replaced.
    pub fn insert(&mut self, key: Cell, value: Cell) -> Option<Cell> {
        self.entries.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &Cell) -> Option<&Cell> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &Cell) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Cell> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Cell, &Cell)> {
        self.entries.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for KeyedMapping
where
    K: Into<Cell>,
    V: Into<Cell>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a KeyedMapping {
    type Item = (&'a Cell, &'a Cell);
    type IntoIter = std::collections::btree_map::Iter<'a, Cell, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Serialized as a sequence of `[key, value]` pairs, since keys are not strings.
impl Serialize for KeyedMapping {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.entries.iter())
    }
}

/// A rectangular table of numbers, rows are observations and columns are variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    data: Vec<f64>,
    width: usize,
    rows: usize,
}

impl Table {
    /// Builds a table from rows, failing if they differ in length.
    pub fn from_rows<I, R>(rows: I) -> Result<Self, InvalidInputError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[f64]>,
    {
        let mut table = Self::default();
        for row in rows {
            table.push_row(row.as_ref())?;
        }
        Ok(table)
    }

    pub(crate) fn push_row(&mut self, row: &[f64]) -> Result<(), InvalidInputError> {
        if self.rows == 0 {
            self.width = row.len();
        } else if row.len() != self.width {
            return Err(InvalidInputError::RaggedRows {
                expected: self.width,
                actual: row.len(),
            });
        }
        self.data.extend_from_slice(row);
        self.rows += 1;
        Ok(())
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn row(&self, index: usize) -> &[f64] {
        &self.data[index * self.width..(index + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.rows).map(|index| self.row(index))
    }

    /// Copies out one column.
    pub fn column(&self, index: usize) -> Result<Vec<f64>, InvalidInputError> {
        self.check_column(index)?;
        Ok(self.rows().map(|row| row[index]).collect())
    }

    fn check_column(&self, column: usize) -> Result<(), InvalidInputError> {
        if column >= self.width {
            return Err(InvalidInputError::ColumnOutOfRange {
                column,
                width: self.width,
            });
        }
        Ok(())
    }

    fn check_columns(&self, columns: &[usize], role: ColumnRole) -> Result<(), InvalidInputError> {
        if columns.is_empty() {
            return Err(InvalidInputError::EmptyColumns { role });
        }
        if self.is_empty() {
            return Ok(());
        }
        columns.iter().try_for_each(|&column| self.check_column(column))
    }

    /// Converts the table into a mapping from `key_columns` to `value_columns`.
    ///
    /// Keys and values are scalars when one column is selected and tuples (in
    /// the given column order) otherwise. When several rows produce the same
    /// key the last of them wins.
    pub fn to_mapping(
        &self,
        key_columns: &[usize],
        value_columns: &[usize],
    ) -> Result<KeyedMapping, InvalidInputError> {
        self.check_columns(key_columns, ColumnRole::Key)?;
        self.check_columns(value_columns, ColumnRole::Value)?;

        let select = |row: &[f64], columns: &[usize]| {
            Cell::from_values(columns.iter().map(|&c| row[c]).collect())
        };
        Ok(self
            .rows()
            .map(|row| (select(row, key_columns), select(row, value_columns)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]).unwrap()
    }

    #[test]
    fn test_scalar_mapping() {
        let mapping = sample_table().to_mapping(&[0], &[1]).unwrap();
        let expected: KeyedMapping = [(1.0, 2.0), (4.0, 5.0), (7.0, 8.0)].into_iter().collect();
        assert_eq!(mapping, expected);
    }

    #[test]
    fn test_tuple_values() {
        let mapping = sample_table().to_mapping(&[0], &[1, 2]).unwrap();
        assert_eq!(
            mapping.get(&Cell::Scalar(4.0)),
            Some(&Cell::Tuple(vec![5.0, 6.0]))
        );
    }

    #[test]
    fn test_tuple_keys_keep_column_order() {
        let mapping = sample_table().to_mapping(&[1, 0], &[2]).unwrap();
        assert_eq!(
            mapping.get(&Cell::Tuple(vec![8.0, 7.0])),
            Some(&Cell::Scalar(9.0))
        );
        assert!(!mapping.contains_key(&Cell::Tuple(vec![7.0, 8.0])));
    }

    #[test]
    fn test_last_row_wins_on_duplicate_key() {
        let table = Table::from_rows([[1.0, 10.0], [2.0, 20.0], [1.0, 30.0]]).unwrap();
        let mapping = table.to_mapping(&[0], &[1]).unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get(&Cell::Scalar(1.0)), Some(&Cell::Scalar(30.0)));
    }

    #[test]
    fn test_negative_zero_key_merges_with_zero() {
        let table = Table::from_rows([[0.0, 1.0], [-0.0, 9.0], [0.5, 2.0]]).unwrap();
        let mapping = table.to_mapping(&[0], &[1]).unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get(&Cell::Scalar(0.0)), Some(&Cell::Scalar(9.0)));
        assert_eq!(mapping.get(&Cell::Scalar(-0.0)), Some(&Cell::Scalar(9.0)));

        let key = mapping.keys().next().and_then(Cell::as_scalar).unwrap();
        assert!(key.is_sign_positive());
        assert!(Cell::from_values(vec![-0.0, 1.0]).as_slice()[0].is_sign_positive());
        let json = serde_json::to_string(&Cell::from(-0.0)).unwrap();
        assert_eq!(json, "0.0");
    }

    #[test]
    fn test_column_validation() {
        let table = sample_table();
        assert_eq!(
            table.to_mapping(&[], &[1]),
            Err(InvalidInputError::EmptyColumns {
                role: ColumnRole::Key
            })
        );
        assert_eq!(
            table.to_mapping(&[0], &[3]),
            Err(InvalidInputError::ColumnOutOfRange {
                column: 3,
                width: 3
            })
        );
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let rows: [&[f64]; 2] = [&[1.0, 2.0], &[3.0]];
        assert_eq!(
            Table::from_rows(rows),
            Err(InvalidInputError::RaggedRows {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_empty_table() {
        let table = Table::default();
        assert_eq!(table.len(), 0);
        assert_eq!(table.rows().count(), 0);
        assert!(table.to_mapping(&[0], &[1]).unwrap().is_empty());
    }

    #[test]
    fn test_table_accessors() {
        let table = sample_table();
        assert_eq!(table.len(), 3);
        assert_eq!(table.width(), 3);
        assert_eq!(table.row(1), &[4.0, 5.0, 6.0]);
        assert_eq!(table.column(2).unwrap(), vec![3.0, 6.0, 9.0]);
        assert!(table.column(5).is_err());
    }

    #[test]
    fn test_cell_ordering() {
        let mut cells = vec![
            Cell::Tuple(vec![1.0, 2.0]),
            Cell::Scalar(3.0),
            Cell::Tuple(vec![1.0]),
            Cell::Scalar(-1.0),
        ];
        cells.sort();
        assert_eq!(
            cells,
            vec![
                Cell::Scalar(-1.0),
                Cell::Scalar(3.0),
                Cell::Tuple(vec![1.0]),
                Cell::Tuple(vec![1.0, 2.0]),
            ]
        );
    }

    #[test]
    fn test_mapping_serializes_as_pairs() {
        let mapping: KeyedMapping = [(1.0, Cell::Tuple(vec![2.0, 3.0]))].into_iter().collect();
        let json = serde_json::to_string(&mapping).unwrap();
        assert_eq!(json, "[[1.0,[2.0,3.0]]]");
    }
}
