// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Band scales over axis orderings.
//!
//! A matrix band scale is a discrete scale without padding: the `i`-th entry of
//! the ordering gets the `i`-th of `n` equal, contiguous slots spanning
//! `[0, span)`. Positions are looked up by *logical* index, so reordering an axis
//! never requires touching the data.

extern crate alloc;

use alloc::sync::Arc;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::order::Permutation;

/// A discrete, padding-free band scale keyed by logical index.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale {
    order: Arc<Permutation>,
    span: f64,
}

impl BandScale {
    /// Creates a scale laying `order` out over `[0, span)`.
    ///
    /// Negative or non-finite spans collapse to zero.
    pub fn new(order: Arc<Permutation>, span: f64) -> Self {
        let span = if span.is_finite() { span.max(0.0) } else { 0.0 };
        Self { order, span }
    }

    /// Total extent covered by the bands.
    pub fn span(&self) -> f64 {
        self.span
    }

    /// Number of bands.
    pub fn count(&self) -> usize {
        self.order.len()
    }

    /// The ordering used as the scale domain.
    pub fn order(&self) -> &Permutation {
        &self.order
    }

    /// Size of every band; zero for an empty domain.
    pub fn band_width(&self) -> f64 {
        if self.order.is_empty() {
            0.0
        } else {
            self.span / self.order.len() as f64
        }
    }

    /// Offset of the band holding `index`.
    pub fn offset(&self, index: usize) -> Option<f64> {
        let slot = self.order.slot_of(index)?;
        Some(slot as f64 * self.band_width())
    }

    /// `(offset, size)` of the band holding `index`.
    pub fn band(&self, index: usize) -> Option<(f64, f64)> {
        Some((self.offset(index)?, self.band_width()))
    }

    /// Logical index whose band contains `pos`, if any.
    ///
    /// Bands are half-open: a position on a boundary belongs to the later band.
    pub fn index_at(&self, pos: f64) -> Option<usize> {
        let width = self.band_width();
        if width <= 0.0 || pos.is_nan() || pos < 0.0 || pos >= self.span {
            return None;
        }
        let slot = (pos / width).floor();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "slot is non-negative and below the band count"
        )]
        let slot = slot as usize;
        self.order.index_at(slot.min(self.order.len() - 1))
    }

    /// Bands in display order as `(logical index, offset, size)`.
    pub fn bands(&self) -> impl Iterator<Item = (usize, f64, f64)> + '_ {
        let width = self.band_width();
        self.order
            .as_slice()
            .iter()
            .enumerate()
            .map(move |(slot, &index)| (index, slot as f64 * width, width))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    fn scale(order: Vec<usize>, span: f64) -> BandScale {
        BandScale::new(Arc::new(Permutation::new(order).unwrap()), span)
    }

    #[test]
    fn bands_tile_the_span_without_overlap() {
        let s = scale(vec![3, 1, 4, 0, 2], 100.0);
        let mut bands: Vec<(usize, f64, f64)> = s.bands().collect();
        bands.sort_by(|a, b| a.1.total_cmp(&b.1));

        let mut cursor = 0.0;
        let mut seen = [false; 5];
        for (index, offset, size) in bands {
            assert!((offset - cursor).abs() < 1e-9, "gap or overlap at {index}");
            assert!(!seen[index], "index {index} placed twice");
            seen[index] = true;
            cursor = offset + size;
        }
        assert!((cursor - 100.0).abs() < 1e-9);
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn offsets_follow_display_order() {
        let s = scale(vec![2, 0, 1], 30.0);
        assert_eq!(s.offset(2), Some(0.0));
        assert_eq!(s.offset(0), Some(10.0));
        assert_eq!(s.offset(1), Some(20.0));
        assert_eq!(s.band(1), Some((20.0, 10.0)));
        assert_eq!(s.offset(3), None);
    }

    #[test]
    fn empty_domain_has_zero_width_bands() {
        let s = scale(Vec::new(), 250.0);
        assert_eq!(s.band_width(), 0.0);
        assert_eq!(s.bands().count(), 0);
        assert_eq!(s.index_at(10.0), None);
    }

    #[test]
    fn negative_span_is_clamped() {
        let s = scale(vec![0, 1], -40.0);
        assert_eq!(s.span(), 0.0);
        assert_eq!(s.band_width(), 0.0);
    }

    #[test]
    fn inverts_positions_to_logical_indices() {
        let s = scale(vec![1, 0], 40.0);
        assert_eq!(s.index_at(0.0), Some(1));
        assert_eq!(s.index_at(19.9), Some(1));
        assert_eq!(s.index_at(20.0), Some(0));
        assert_eq!(s.index_at(39.9), Some(0));
        assert_eq!(s.index_at(40.0), None);
        assert_eq!(s.index_at(-0.1), None);
        assert_eq!(s.index_at(f64::NAN), None);
    }
}
