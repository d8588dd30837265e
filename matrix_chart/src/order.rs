// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display orderings for matrix axes.
//!
//! Sort order is data, not logic: callers precompute one permutation per sort key
//! (alphabetical, by count, clustered, ...) and the chart only selects among them.
//! Comparator semantics such as locale-aware collation or tie-breaking stay with
//! the caller.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::error::OrderError;

/// One of the two matrix axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Vertical axis; one band per row heading.
    Rows,
    /// Horizontal axis; one band per column heading.
    Columns,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rows => "rows",
            Self::Columns => "columns",
        })
    }
}

/// An ordered sequence containing every index of an axis exactly once.
///
/// The inverse lookup (logical index to display slot) is precomputed so band
/// scales can position any index in constant time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permutation {
    order: Vec<usize>,
    inverse: Vec<usize>,
}

impl Permutation {
    /// Validates `order` as a bijection over `0..order.len()`.
    pub fn new(order: Vec<usize>) -> Result<Self, OrderError> {
        let len = order.len();
        let mut inverse = vec![usize::MAX; len];
        for (slot, &index) in order.iter().enumerate() {
            match inverse.get_mut(index) {
                Some(s) if *s == usize::MAX => *s = slot,
                _ => return Err(OrderError::NotAPermutation { len }),
            }
        }
        Ok(Self { order, inverse })
    }

    /// The identity ordering `0, 1, ..., len - 1`.
    pub fn identity(len: usize) -> Self {
        let order: Vec<usize> = (0..len).collect();
        Self {
            inverse: order.clone(),
            order,
        }
    }

    /// Number of indices covered.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the ordering covers no indices.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Logical indices in display order.
    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    /// Display slot of a logical index.
    pub fn slot_of(&self, index: usize) -> Option<usize> {
        self.inverse.get(index).copied()
    }

    /// Logical index shown in a display slot.
    pub fn index_at(&self, slot: usize) -> Option<usize> {
        self.order.get(slot).copied()
    }
}

/// Precomputed permutations per axis and sort key.
#[derive(Clone, Debug, Default)]
pub struct OrderTable {
    rows: HashMap<String, Arc<Permutation>>,
    columns: HashMap<String, Arc<Permutation>>,
}

impl OrderTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the ordering for `key` on `axis`.
    pub fn insert(
        &mut self,
        axis: Axis,
        key: impl Into<String>,
        order: Vec<usize>,
    ) -> Result<(), OrderError> {
        let permutation = Permutation::new(order)?;
        self.axis_mut(axis).insert(key.into(), Arc::new(permutation));
        Ok(())
    }

    /// Builder-style [`OrderTable::insert`].
    pub fn with(
        mut self,
        axis: Axis,
        key: impl Into<String>,
        order: Vec<usize>,
    ) -> Result<Self, OrderError> {
        self.insert(axis, key, order)?;
        Ok(self)
    }

    /// Returns the ordering for `key` on `axis`.
    pub fn resolve(&self, axis: Axis, key: &str) -> Result<Arc<Permutation>, OrderError> {
        self.axis(axis)
            .get(key)
            .cloned()
            .ok_or_else(|| OrderError::UnknownSortKey {
                axis,
                key: String::from(key),
            })
    }

    /// Sort keys available on `axis`, in no particular order.
    pub fn keys(&self, axis: Axis) -> impl Iterator<Item = &str> + '_ {
        self.axis(axis).keys().map(String::as_str)
    }

    /// Checks that every ordering on `axis` covers exactly `len` indices.
    pub fn check_axis_len(&self, axis: Axis, len: usize) -> Result<(), OrderError> {
        for (key, permutation) in self.axis(axis) {
            if permutation.len() != len {
                return Err(OrderError::LengthMismatch {
                    axis,
                    key: key.clone(),
                    expected: len,
                    actual: permutation.len(),
                });
            }
        }
        Ok(())
    }

    fn axis(&self, axis: Axis) -> &HashMap<String, Arc<Permutation>> {
        match axis {
            Axis::Rows => &self.rows,
            Axis::Columns => &self.columns,
        }
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut HashMap<String, Arc<Permutation>> {
        match axis {
            Axis::Rows => &mut self.rows,
            Axis::Columns => &mut self.columns,
        }
    }
}

/// Selects the active permutation for an axis.
///
/// Without a key the axis is shown in heading order. A key that the table does
/// not know is an error, never a silent fallback.
pub fn resolve(
    table: Option<&OrderTable>,
    axis: Axis,
    key: Option<&str>,
    len: usize,
) -> Result<Arc<Permutation>, OrderError> {
    let Some(key) = key else {
        return Ok(Arc::new(Permutation::identity(len)));
    };
    let permutation = match table {
        Some(table) => table.resolve(axis, key)?,
        None => {
            return Err(OrderError::UnknownSortKey {
                axis,
                key: String::from(key),
            });
        }
    };
    if permutation.len() != len {
        return Err(OrderError::LengthMismatch {
            axis,
            key: String::from(key),
            expected: len,
            actual: permutation.len(),
        });
    }
    tracing::debug!(%axis, key, len, "resolved axis ordering");
    Ok(permutation)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn permutation_builds_inverse_lookup() {
        let p = Permutation::new(vec![2, 0, 1]).unwrap();
        assert_eq!(p.slot_of(2), Some(0));
        assert_eq!(p.slot_of(0), Some(1));
        assert_eq!(p.slot_of(1), Some(2));
        assert_eq!(p.slot_of(3), None);
        assert_eq!(p.index_at(0), Some(2));
    }

    #[test]
    fn duplicates_and_gaps_are_rejected() {
        assert_eq!(
            Permutation::new(vec![0, 0, 1]),
            Err(OrderError::NotAPermutation { len: 3 })
        );
        assert_eq!(
            Permutation::new(vec![0, 3, 1]),
            Err(OrderError::NotAPermutation { len: 3 })
        );
        assert!(Permutation::new(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn resolves_known_keys_per_axis() {
        let table = OrderTable::new()
            .with(Axis::Rows, "count", vec![1, 0])
            .unwrap()
            .with(Axis::Columns, "name", vec![0, 2, 1])
            .unwrap();

        let rows = table.resolve(Axis::Rows, "count").unwrap();
        assert_eq!(rows.as_slice(), &[1, 0]);

        let err = table.resolve(Axis::Columns, "count").unwrap_err();
        assert_eq!(
            err,
            OrderError::UnknownSortKey {
                axis: Axis::Columns,
                key: "count".into(),
            }
        );
    }

    #[test]
    fn missing_key_means_heading_order() {
        let p = resolve(None, Axis::Rows, None, 4).unwrap();
        assert_eq!(p.as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn key_without_table_is_unknown() {
        let err = resolve(None, Axis::Rows, Some("name"), 2).unwrap_err();
        assert!(matches!(err, OrderError::UnknownSortKey { .. }));
    }

    #[test]
    fn ordering_must_cover_the_axis() {
        let table = OrderTable::new()
            .with(Axis::Rows, "name", vec![1, 0])
            .unwrap();
        let err = resolve(Some(&table), Axis::Rows, Some("name"), 3).unwrap_err();
        assert_eq!(
            err,
            OrderError::LengthMismatch {
                axis: Axis::Rows,
                key: "name".into(),
                expected: 3,
                actual: 2,
            }
        );
        assert!(table.check_axis_len(Axis::Rows, 3).is_err());
        assert!(table.check_axis_len(Axis::Rows, 2).is_ok());
    }
}
