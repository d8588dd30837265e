// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration and ordering errors.
//!
//! Every error here is a deterministic function of the caller's configuration:
//! nothing is retried, and nothing silently falls back. Text measurement
//! failures are the one recoverable case and never reach these types.

extern crate alloc;

use alloc::string::String;

use crate::order::Axis;

/// Errors raised while resolving an axis ordering.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    /// The requested sort key has no permutation for this axis.
    #[error("unknown sort key {key:?} for {axis}")]
    UnknownSortKey {
        /// Axis the key was looked up on.
        axis: Axis,
        /// The missing key.
        key: String,
    },
    /// An ordering is not a bijection over `0..len`.
    #[error("ordering is not a permutation of 0..{len}")]
    NotAPermutation {
        /// Length of the rejected ordering.
        len: usize,
    },
    /// An ordering covers a different number of indices than the axis has headings.
    #[error("{axis} ordering {key:?} has {actual} entries, expected {expected}")]
    LengthMismatch {
        /// Axis being ordered.
        axis: Axis,
        /// Sort key of the ordering.
        key: String,
        /// Number of headings on the axis.
        expected: usize,
        /// Number of entries in the ordering.
        actual: usize,
    },
}

/// Errors that make a matrix configuration unrenderable.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The data has a different number of rows than there are row headings.
    #[error("data has {data} rows but {headings} row headings were supplied")]
    RowCountMismatch {
        /// Rows in the data.
        data: usize,
        /// Row headings supplied.
        headings: usize,
    },
    /// A dense data row has a different length than there are column headings.
    #[error("data row {row} has {len} values but there are {columns} column headings")]
    RowLengthMismatch {
        /// Physical data row.
        row: usize,
        /// Number of values in that row.
        len: usize,
        /// Column headings supplied.
        columns: usize,
    },
    /// A sparse cell addresses a row or column outside the headings.
    #[error("cell ({r}, {c}) in data row {row} is outside the {rows}x{columns} matrix")]
    CellOutOfBounds {
        /// Physical data row holding the cell.
        row: usize,
        /// Logical row index of the cell.
        r: usize,
        /// Logical column index of the cell.
        c: usize,
        /// Row headings supplied.
        rows: usize,
        /// Column headings supplied.
        columns: usize,
    },
    /// Neither a color function nor a color scale was supplied.
    #[error("no color mapping supplied")]
    MissingColorMapping,
    /// The minimum cell size is not a positive finite number.
    #[error("minimum cell size must be positive and finite, got {0}")]
    InvalidCellSize(f64),
    /// A font descriptor could not be parsed.
    #[error("unrecognized font descriptor {0:?}")]
    InvalidFont(String),
    /// The configured ordering cannot be used.
    #[error(transparent)]
    Order(#[from] OrderError),
}
