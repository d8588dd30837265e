// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint-order conventions for matrix chart marks.
//!
//! Renderers should sort by `(z_index, MarkKey)` for a deterministic tie-break.
//! Header and body backgrounds are left to the host and are not marks.

/// Cell fills.
pub const CELLS: i32 = 0;
/// Gridlines, drawn over cell edges.
pub const GRID_LINES: i32 = 10;

/// Row labels.
pub const ROW_LABELS: i32 = 40;
/// Rotated column headings.
pub const COLUMN_LABELS: i32 = 50;
