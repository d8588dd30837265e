// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One render's worth of marks.
//!
//! A [`MatrixFrame`] is built from the current geometry and emphasis and is
//! never mutated afterwards; every visual leaf reads from it.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::config::MatrixSpec;
use crate::data::MatrixData;
use crate::interaction::{Emphasis, InteractionState};
use crate::layout::GeometrySnapshot;
use crate::marks::{Mark, MarkKey, RectMark, RuleMark, TextAnchor, TextBaseline, TextMark};
use crate::z_order;

/// Marks and geometry for one render.
#[derive(Clone, Debug, PartialEq)]
pub struct MatrixFrame {
    /// Geometry the marks were placed with.
    pub geometry: GeometrySnapshot,
    /// Hover state the opacities were derived from.
    pub state: InteractionState,
    /// Header rectangle (column headings).
    pub header: Rect,
    /// Body rectangle, unscrolled.
    pub body: Rect,
    /// Visible body height.
    pub viewport_height: f64,
    /// One rectangle per data cell.
    pub cells: Vec<RectMark>,
    /// Gridlines at every band boundary.
    pub grid: Vec<RuleMark>,
    /// Row labels, end-anchored left of the cells.
    pub row_labels: Vec<TextMark>,
    /// Column headings, rotated to read bottom-up above the cells.
    pub column_labels: Vec<TextMark>,
    /// Transition duration hint, passed through from [`MatrixSpec`].
    pub transition_duration: String,
}

/// Inputs to [`MatrixFrame::build`].
#[derive(Debug)]
pub(crate) struct FrameInputs<'a> {
    pub(crate) spec: &'a MatrixSpec,
    pub(crate) geometry: &'a GeometrySnapshot,
    pub(crate) state: InteractionState,
    pub(crate) emphasis: &'a Emphasis,
    pub(crate) data: &'a MatrixData,
    pub(crate) row_labels: &'a [String],
    pub(crate) column_labels: &'a [String],
}

impl MatrixFrame {
    pub(crate) fn build(inputs: &FrameInputs<'_>) -> Self {
        let FrameInputs {
            spec,
            geometry: g,
            state,
            emphasis,
            data,
            row_labels,
            column_labels,
        } = *inputs;
        let policy = spec.highlight_policy();

        let cells = match spec.color.as_ref() {
            Some(color) => data
                .cells()
                .filter_map(|cell| {
                    let rect = g.cell_rect(cell.r, cell.c)?;
                    Some(
                        RectMark::new(MarkKey::Cell { row: cell.r, col: cell.c }, rect)
                            .with_fill(color.color(&cell.z))
                            .with_opacity(policy.opacity(emphasis.cell(cell.r, cell.c)))
                            .with_z_index(z_order::CELLS),
                    )
                })
                .collect(),
            None => Vec::new(),
        };

        let grid = grid_rules(g, spec);

        let offset = spec.text_offset.max(0.0);
        let label_x = g.label_width - offset;
        let row_labels = g
            .row_band
            .bands()
            .filter_map(|(row, y, h)| {
                let text = row_labels.get(row)?;
                Some(
                    TextMark::new(
                        MarkKey::RowLabel(row),
                        Point::new(label_x, g.label_height + y + h / 2.0),
                        text.clone(),
                    )
                    .with_font(spec.font.clone())
                    .with_anchor(TextAnchor::End)
                    .with_baseline(TextBaseline::Middle)
                    .with_fill(spec.label_color)
                    .with_opacity(policy.opacity(emphasis.row(row)))
                    .with_z_index(z_order::ROW_LABELS),
                )
            })
            .collect();

        let heading_y = g.label_height - offset;
        let column_labels = g
            .col_band
            .bands()
            .filter_map(|(col, x, w)| {
                let text = column_labels.get(col)?;
                Some(
                    TextMark::new(
                        MarkKey::ColumnLabel(col),
                        Point::new(g.label_width + x + w / 2.0, heading_y),
                        text.clone(),
                    )
                    .with_font(spec.column_font().clone())
                    .with_angle(-90.0)
                    .with_anchor(TextAnchor::Start)
                    .with_baseline(TextBaseline::Middle)
                    .with_fill(spec.label_color)
                    .with_opacity(policy.opacity(emphasis.col(col)))
                    .with_z_index(z_order::COLUMN_LABELS),
                )
            })
            .collect();

        Self {
            geometry: g.clone(),
            state,
            header: g.header_rect(),
            body: g.body_rect(),
            viewport_height: g.viewport_height,
            cells,
            grid,
            row_labels,
            column_labels,
            transition_duration: spec.transition_duration.clone(),
        }
    }

    /// All marks, sorted by `(z_index, key)`.
    pub fn marks(&self) -> Vec<Mark> {
        let mut out: Vec<Mark> = Vec::with_capacity(
            self.cells.len() + self.grid.len() + self.row_labels.len() + self.column_labels.len(),
        );
        out.extend(self.cells.iter().cloned().map(Mark::from));
        out.extend(self.grid.iter().cloned().map(Mark::from));
        out.extend(self.row_labels.iter().cloned().map(Mark::from));
        out.extend(self.column_labels.iter().cloned().map(Mark::from));
        out.sort_by_key(|m| (m.z_index(), m.key()));
        out
    }

    /// The cell mark for logical `(row, col)`, if the data has one.
    pub fn cell(&self, row: usize, col: usize) -> Option<&RectMark> {
        self.cells
            .iter()
            .find(|m| m.key == MarkKey::Cell { row, col })
    }
}

fn grid_rules(g: &GeometrySnapshot, spec: &MatrixSpec) -> Vec<RuleMark> {
    let x0 = g.label_width;
    let x1 = g.label_width + g.effective_content_width;
    let y0 = g.label_height;
    let y1 = g.label_height + g.total_height;
    let rows = g.row_band.count();
    let cols = g.col_band.count();
    if rows == 0 || cols == 0 {
        return Vec::new();
    }

    let row_step = g.row_band.band_width();
    let col_step = g.col_band.band_width();
    let horizontal = (0..=rows).map(|slot| {
        RuleMark::horizontal(MarkKey::RowRule(slot), y0 + slot as f64 * row_step, x0, x1)
    });
    let vertical = (0..=cols).map(|slot| {
        RuleMark::vertical(MarkKey::ColumnRule(slot), x0 + slot as f64 * col_step, y0, y1)
    });
    horizontal
        .chain(vertical)
        .map(|rule| rule.with_stroke(spec.grid_lines_color, 1.0))
        .collect()
}
