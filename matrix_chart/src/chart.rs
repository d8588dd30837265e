// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The matrix chart component.
//!
//! [`MatrixChart`] owns the configuration, the active orderings, the current
//! geometry and the hover state. Geometry is recomputed eagerly whenever one of
//! its inputs changes, so highlights are always derived from current geometry.
//! Label extents are cached between resizes since only headings and fonts
//! affect them.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;
use matrix_text::TextMeasurer;

use crate::config::MatrixSpec;
use crate::data::MatrixData;
use crate::error::ConfigError;
use crate::frame::{FrameInputs, MatrixFrame};
use crate::heading::{AxisHeading, format_all};
use crate::interaction::{Emphasis, Interaction, InteractionState, MatrixEvents};
use crate::layout::{
    GeometrySnapshot, HoverTarget, LabelExtents, LabelMeasureSpec, MatrixLayoutSpec,
};
use crate::order::{self, Axis, Permutation};
use crate::resize::{ResizeController, ViewportSignal};

/// An interactive matrix chart.
pub struct MatrixChart<M> {
    spec: MatrixSpec,
    rows: Vec<AxisHeading>,
    columns: Vec<AxisHeading>,
    row_labels: Vec<String>,
    column_labels: Vec<String>,
    data: MatrixData,
    measurer: M,
    labels: LabelExtents,
    row_order: Arc<Permutation>,
    column_order: Arc<Permutation>,
    geometry: GeometrySnapshot,
    interaction: Interaction,
    resize: ResizeController,
}

impl<M> fmt::Debug for MatrixChart<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixChart")
            .field("spec", &self.spec)
            .field("rows", &self.rows.len())
            .field("columns", &self.columns.len())
            .field("geometry", &self.geometry)
            .field("state", &self.interaction.state())
            .finish_non_exhaustive()
    }
}

impl<M: TextMeasurer> MatrixChart<M> {
    /// Validates the configuration and lays the chart out at its minimum width.
    pub fn new(
        spec: MatrixSpec,
        rows: Vec<AxisHeading>,
        columns: Vec<AxisHeading>,
        data: MatrixData,
        measurer: M,
    ) -> Result<Self, ConfigError> {
        spec.validate()?;
        data.validate(rows.len(), columns.len())?;
        let row_order = resolve_axis(&spec, Axis::Rows, rows.len())?;
        let column_order = resolve_axis(&spec, Axis::Columns, columns.len())?;

        let row_labels = format_all(spec.format_row_heading.as_ref(), &rows);
        let column_labels = format_all(spec.format_column_heading.as_ref(), &columns);
        let labels = measure_labels(&measurer, &spec, &rows, &columns);
        let geometry = arrange(&spec, labels, 0.0, &row_order, &column_order);

        Ok(Self {
            spec,
            rows,
            columns,
            row_labels,
            column_labels,
            data,
            measurer,
            labels,
            row_order,
            column_order,
            geometry,
            interaction: Interaction::new(),
            resize: ResizeController::new(),
        })
    }

    /// Subscribes to `signal` and lays out at the container's current width.
    pub fn mount(&mut self, signal: &mut dyn ViewportSignal, width: f64) -> &GeometrySnapshot {
        self.resize.mount(signal, width);
        self.rearrange();
        &self.geometry
    }

    /// Feeds a new container width and re-arranges.
    ///
    /// The chart never lays out narrower than its minimum width.
    pub fn resize(&mut self, width: f64) -> &GeometrySnapshot {
        self.resize.notify(width);
        self.rearrange();
        &self.geometry
    }

    /// Drops the viewport subscription.
    pub fn unmount(&mut self, signal: &mut dyn ViewportSignal) {
        self.resize.unmount(signal);
    }

    /// Switches the ordering of `axis` to `key` (`None` restores heading order).
    ///
    /// On error the current ordering is kept.
    pub fn set_order(
        &mut self,
        axis: Axis,
        key: Option<&str>,
    ) -> Result<&GeometrySnapshot, ConfigError> {
        let len = match axis {
            Axis::Rows => self.rows.len(),
            Axis::Columns => self.columns.len(),
        };
        let permutation = order::resolve(self.spec.order.as_ref(), axis, key, len)?;
        *self.spec.order_key_mut(axis) = key.map(String::from);
        match axis {
            Axis::Rows => self.row_order = permutation,
            Axis::Columns => self.column_order = permutation,
        }
        self.rearrange();
        Ok(&self.geometry)
    }

    /// Replaces headings and data. Hover state is reset to idle.
    ///
    /// On error the chart is left unchanged.
    pub fn set_data(
        &mut self,
        rows: Vec<AxisHeading>,
        columns: Vec<AxisHeading>,
        data: MatrixData,
    ) -> Result<&GeometrySnapshot, ConfigError> {
        data.validate(rows.len(), columns.len())?;
        let row_order = resolve_axis(&self.spec, Axis::Rows, rows.len())?;
        let column_order = resolve_axis(&self.spec, Axis::Columns, columns.len())?;

        self.row_labels = format_all(self.spec.format_row_heading.as_ref(), &rows);
        self.column_labels = format_all(self.spec.format_column_heading.as_ref(), &columns);
        self.labels = measure_labels(&self.measurer, &self.spec, &rows, &columns);
        self.rows = rows;
        self.columns = columns;
        self.data = data;
        self.row_order = row_order;
        self.column_order = column_order;
        self.interaction.reset();
        self.rearrange();
        Ok(&self.geometry)
    }

    /// Replaces the configuration, keeping headings and data.
    ///
    /// On error the chart is left unchanged.
    pub fn set_spec(&mut self, spec: MatrixSpec) -> Result<&GeometrySnapshot, ConfigError> {
        spec.validate()?;
        let row_order = resolve_axis(&spec, Axis::Rows, self.rows.len())?;
        let column_order = resolve_axis(&spec, Axis::Columns, self.columns.len())?;

        self.row_labels = format_all(spec.format_row_heading.as_ref(), &self.rows);
        self.column_labels = format_all(spec.format_column_heading.as_ref(), &self.columns);
        self.labels = measure_labels(&self.measurer, &spec, &self.rows, &self.columns);
        self.spec = spec;
        self.row_order = row_order;
        self.column_order = column_order;
        self.rearrange();
        Ok(&self.geometry)
    }

    fn rearrange(&mut self) {
        self.geometry = arrange(
            &self.spec,
            self.labels,
            self.resize.container_width(),
            &self.row_order,
            &self.column_order,
        );
    }
}

impl<M> MatrixChart<M> {
    /// The pointer moved over `target`.
    pub fn pointer_over(&mut self, target: HoverTarget, events: &mut dyn MatrixEvents) {
        self.interaction.pointer_over(target, events);
    }

    /// The pointer moved to `point` (chart coordinates, body scrolled by `scroll_top`).
    pub fn pointer_move(&mut self, point: Point, scroll_top: f64, events: &mut dyn MatrixEvents) {
        let target = self.hit_test(point, scroll_top);
        self.interaction.pointer_over(target, events);
    }

    /// The pointer left the chart.
    pub fn pointer_leave(&mut self, events: &mut dyn MatrixEvents) {
        self.interaction.pointer_leave(events);
    }

    /// `target` was clicked.
    pub fn click(&self, target: HoverTarget, events: &mut dyn MatrixEvents) {
        self.interaction.click(target, events);
    }

    /// Maps a chart point to what it is over.
    pub fn hit_test(&self, point: Point, scroll_top: f64) -> HoverTarget {
        self.geometry.hit_test(point, scroll_top)
    }

    /// Current geometry.
    pub fn geometry(&self) -> &GeometrySnapshot {
        &self.geometry
    }

    /// Current hover state.
    pub fn state(&self) -> InteractionState {
        self.interaction.state()
    }

    /// Emphasis for the current state.
    pub fn emphasis(&self) -> Emphasis {
        self.interaction.emphasis(
            self.rows.len(),
            self.columns.len(),
            &self.spec.highlight_policy(),
        )
    }

    /// Builds the marks for the current geometry and hover state.
    pub fn frame(&self) -> MatrixFrame {
        let emphasis = self.emphasis();
        MatrixFrame::build(&FrameInputs {
            spec: &self.spec,
            geometry: &self.geometry,
            state: self.interaction.state(),
            emphasis: &emphasis,
            data: &self.data,
            row_labels: &self.row_labels,
            column_labels: &self.column_labels,
        })
    }

    /// Current configuration.
    pub fn spec(&self) -> &MatrixSpec {
        &self.spec
    }

    /// Row headings.
    pub fn rows(&self) -> &[AxisHeading] {
        &self.rows
    }

    /// Column headings.
    pub fn columns(&self) -> &[AxisHeading] {
        &self.columns
    }

    /// Cached label extents.
    pub fn label_extents(&self) -> LabelExtents {
        self.labels
    }

    /// Whether the chart holds a viewport subscription.
    pub fn is_mounted(&self) -> bool {
        self.resize.is_mounted()
    }
}

fn resolve_axis(
    spec: &MatrixSpec,
    axis: Axis,
    len: usize,
) -> Result<Arc<Permutation>, ConfigError> {
    if let Some(table) = spec.order.as_ref() {
        table.check_axis_len(axis, len)?;
    }
    Ok(order::resolve(spec.order.as_ref(), axis, spec.order_key(axis), len)?)
}

fn measure_labels(
    measurer: &dyn TextMeasurer,
    spec: &MatrixSpec,
    rows: &[AxisHeading],
    columns: &[AxisHeading],
) -> LabelExtents {
    LabelExtents::measure(measurer, &LabelMeasureSpec {
        rows,
        columns,
        row_format: spec.format_row_heading.as_ref(),
        column_format: spec.format_column_heading.as_ref(),
        row_font: &spec.font,
        column_font: spec.column_font(),
        text_offset: spec.text_offset,
        fallback: spec.fallback_label_width,
    })
}

fn arrange(
    spec: &MatrixSpec,
    labels: LabelExtents,
    container_width: f64,
    row_order: &Arc<Permutation>,
    column_order: &Arc<Permutation>,
) -> GeometrySnapshot {
    GeometrySnapshot::arrange(&MatrixLayoutSpec {
        labels,
        min_cell_size: spec.min_rect_size,
        container_width,
        content_max_height: spec.content_max_height,
        row_order: row_order.clone(),
        column_order: column_order.clone(),
    })
}
