// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Matrix cell data.
//!
//! Cells are stored in the explicit form: every physical data row is a list of
//! `(r, c, z)` triples whose row/column indices address the headings directly.
//! Dense rows (one value per column, positionally aligned) are converted into
//! that form on construction.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::error::ConfigError;
use crate::heading::AxisHeading;

/// A cell value: numeric or categorical.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    /// A numeric value.
    Number(f64),
    /// A categorical value.
    Category(String),
}

impl CellValue {
    /// The numeric value, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Category(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Category(s) => f.write_str(s),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Category(String::from(value))
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Category(value)
    }
}

/// One cell: logical row `r`, logical column `c`, value `z`.
#[derive(Clone, Debug, PartialEq)]
pub struct CellEntry {
    /// Logical row index (into the row headings).
    pub r: usize,
    /// Logical column index (into the column headings).
    pub c: usize,
    /// Cell value.
    pub z: CellValue,
}

impl CellEntry {
    /// Creates a cell.
    pub fn new(r: usize, c: usize, z: impl Into<CellValue>) -> Self {
        Self { r, c, z: z.into() }
    }
}

/// A row of the original record input: a title, optional count and dense values.
#[derive(Clone, Debug, PartialEq)]
pub struct RowRecord {
    /// Row title.
    pub title: String,
    /// Optional row count.
    pub count: Option<u64>,
    /// One value per column.
    pub values: Vec<CellValue>,
}

/// The cells of a matrix, grouped by physical data row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatrixData {
    rows: Vec<Vec<CellEntry>>,
    dense_width: Option<Vec<usize>>,
}

impl MatrixData {
    /// Builds data from explicit `(r, c, z)` rows.
    pub fn from_sparse(rows: Vec<Vec<CellEntry>>) -> Self {
        Self {
            rows,
            dense_width: None,
        }
    }

    /// Builds data from dense rows; value `i` of row `j` becomes cell `(j, i)`.
    pub fn from_dense<V: Into<CellValue>>(rows: Vec<Vec<V>>) -> Self {
        let mut widths = Vec::with_capacity(rows.len());
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(r, values)| {
                widths.push(values.len());
                values
                    .into_iter()
                    .enumerate()
                    .map(|(c, z)| CellEntry::new(r, c, z))
                    .collect()
            })
            .collect();
        Self {
            rows,
            dense_width: Some(widths),
        }
    }

    /// Splits record input into row headings and dense data.
    pub fn from_records(records: Vec<RowRecord>) -> (Vec<AxisHeading>, Self) {
        let mut headings = Vec::with_capacity(records.len());
        let mut values = Vec::with_capacity(records.len());
        for record in records {
            headings.push(AxisHeading {
                name: record.title,
                count: record.count,
            });
            values.push(record.values);
        }
        (headings, Self::from_dense(values))
    }

    /// Number of physical data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Physical data rows.
    pub fn rows(&self) -> &[Vec<CellEntry>] {
        &self.rows
    }

    /// All cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = &CellEntry> + '_ {
        self.rows.iter().flatten()
    }

    /// Checks the data against `rows` row headings and `columns` column headings.
    pub fn validate(&self, rows: usize, columns: usize) -> Result<(), ConfigError> {
        if self.rows.len() != rows {
            return Err(ConfigError::RowCountMismatch {
                data: self.rows.len(),
                headings: rows,
            });
        }
        if let Some(widths) = &self.dense_width {
            for (row, &len) in widths.iter().enumerate() {
                if len != columns {
                    return Err(ConfigError::RowLengthMismatch { row, len, columns });
                }
            }
        }
        for (row, cells) in self.rows.iter().enumerate() {
            for cell in cells {
                if cell.r >= rows || cell.c >= columns {
                    return Err(ConfigError::CellOutOfBounds {
                        row,
                        r: cell.r,
                        c: cell.c,
                        rows,
                        columns,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn dense_rows_use_array_positions() {
        let data = MatrixData::from_dense(vec![vec![1, 2], vec![3, 4]]);
        let cells: Vec<_> = data.cells().map(|c| (c.r, c.c)).collect();
        assert_eq!(cells, [(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert!(data.validate(2, 2).is_ok());
    }

    #[test]
    fn ragged_dense_rows_are_rejected() {
        let data = MatrixData::from_dense(vec![vec![1, 2], vec![3]]);
        assert_eq!(
            data.validate(2, 2),
            Err(ConfigError::RowLengthMismatch {
                row: 1,
                len: 1,
                columns: 2,
            })
        );
    }

    #[test]
    fn row_count_must_match_headings() {
        let data = MatrixData::from_dense(vec![vec![1]]);
        assert_eq!(
            data.validate(2, 1),
            Err(ConfigError::RowCountMismatch {
                data: 1,
                headings: 2,
            })
        );
    }

    #[test]
    fn sparse_cells_may_be_reordered_but_not_out_of_range() {
        let data = MatrixData::from_sparse(vec![
            vec![CellEntry::new(1, 2, "x")],
            vec![CellEntry::new(0, 0, 1.5)],
        ]);
        assert!(data.validate(2, 3).is_ok());

        let err = data.validate(2, 2).unwrap_err();
        assert!(matches!(err, ConfigError::CellOutOfBounds { r: 1, c: 2, .. }));
    }

    #[test]
    fn records_split_into_headings_and_values() {
        let (headings, data) = MatrixData::from_records(vec![
            RowRecord {
                title: "Row 1".into(),
                count: None,
                values: vec![1.into(), 3.into()],
            },
            RowRecord {
                title: "Row 2".into(),
                count: Some(2),
                values: vec![3.into(), 2.into()],
            },
        ]);
        assert_eq!(headings[1], AxisHeading::with_count("Row 2", 2));
        assert_eq!(data.row_count(), 2);
        assert!(data.validate(2, 2).is_ok());
    }
}
