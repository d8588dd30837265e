// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measure/arrange layout for matrix charts.
//!
//! - **Measure**: find how much room row labels (left) and rotated column
//!   headings (top) need. This is the only step that consults text metrics, and
//!   it only has to be redone when headings or fonts change.
//! - **Arrange**: turn label extents, cell counts, the container width and the
//!   active orderings into a [`GeometrySnapshot`]. Arrange is a pure function of
//!   its inputs and cheap enough to rerun on every resize.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;

use kurbo::{Point, Rect};
use matrix_text::{TextMeasurer, TextStyle, measure_max};

use crate::heading::{AxisHeading, HeadingFormat, format_all};
use crate::order::Permutation;
use crate::scale::BandScale;

/// Width reserved for a vertical scrollbar when the body scrolls.
pub const SCROLLBAR_SIZE: f64 = 17.0;

/// Label extent used when text cannot be measured.
pub const FALLBACK_LABEL_WIDTH: f64 = 100.0;

/// Room reserved for labels, including the gap between labels and cells.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LabelExtents {
    /// Width reserved left of the cells for row labels.
    pub row_label_width: f64,
    /// Height reserved above the cells for rotated column headings.
    pub column_label_height: f64,
}

/// Inputs to the measure pass.
#[derive(Clone, Copy)]
pub struct LabelMeasureSpec<'a> {
    /// Row headings.
    pub rows: &'a [AxisHeading],
    /// Column headings.
    pub columns: &'a [AxisHeading],
    /// Row label formatter.
    pub row_format: &'a dyn HeadingFormat,
    /// Column heading formatter.
    pub column_format: &'a dyn HeadingFormat,
    /// Row label font.
    pub row_font: &'a TextStyle,
    /// Column heading font.
    pub column_font: &'a TextStyle,
    /// Gap between labels and cells.
    pub text_offset: f64,
    /// Extent used for an axis whose labels cannot be measured.
    pub fallback: f64,
}

impl core::fmt::Debug for LabelMeasureSpec<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LabelMeasureSpec")
            .field("rows", &self.rows.len())
            .field("columns", &self.columns.len())
            .field("row_font", self.row_font)
            .field("column_font", self.column_font)
            .field("text_offset", &self.text_offset)
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}

impl LabelExtents {
    /// Measures the formatted headings of both axes.
    ///
    /// Column headings are drawn rotated by 90 degrees, so their text *width*
    /// becomes the header height. An axis whose labels cannot be measured gets
    /// `spec.fallback` instead; layout degrades rather than fails.
    pub fn measure(measurer: &dyn TextMeasurer, spec: &LabelMeasureSpec<'_>) -> Self {
        let offset = spec.text_offset.max(0.0);
        let row_labels = format_all(spec.row_format, spec.rows);
        let column_labels = format_all(spec.column_format, spec.columns);

        let row_w = measure_axis(measurer, spec.row_font, &row_labels, spec.fallback, "rows");
        let column_w = measure_axis(
            measurer,
            spec.column_font,
            &column_labels,
            spec.fallback,
            "columns",
        );
        Self {
            row_label_width: row_w + offset,
            column_label_height: column_w + offset,
        }
    }
}

fn measure_axis(
    measurer: &dyn TextMeasurer,
    font: &TextStyle,
    labels: &[String],
    fallback: f64,
    axis: &'static str,
) -> f64 {
    match measure_max(measurer, font, labels.iter().map(String::as_str)) {
        Ok(width) => width,
        Err(err) => {
            tracing::warn!(axis, %err, fallback, "label measurement failed; using fallback width");
            fallback.max(0.0)
        }
    }
}

/// Inputs to the arrange pass.
#[derive(Clone, Debug, PartialEq)]
pub struct MatrixLayoutSpec {
    /// Measured label extents.
    pub labels: LabelExtents,
    /// Minimum cell edge length; rows are always exactly this tall.
    pub min_cell_size: f64,
    /// Width currently available in the host container.
    pub container_width: f64,
    /// Body height beyond which the cells scroll.
    pub content_max_height: Option<f64>,
    /// Display order of the rows.
    pub row_order: Arc<Permutation>,
    /// Display order of the columns.
    pub column_order: Arc<Permutation>,
}

impl MatrixLayoutSpec {
    /// Height of the cell body: one `min_cell_size` band per row.
    pub fn content_height(&self) -> f64 {
        self.row_order.len() as f64 * self.min_cell_size.max(0.0)
    }

    /// Whether the body overflows `content_max_height` and needs a scrollbar.
    pub fn scrollbar_reserved(&self) -> bool {
        self.content_max_height
            .is_some_and(|max| self.content_height() > max)
    }

    fn scrollbar_width(&self) -> f64 {
        if self.scrollbar_reserved() {
            SCROLLBAR_SIZE
        } else {
            0.0
        }
    }

    /// Narrowest width that fits labels, minimum-size cells and the scrollbar.
    pub fn min_total_width(&self) -> f64 {
        self.labels.row_label_width.max(0.0)
            + self.column_order.len() as f64 * self.min_cell_size.max(0.0)
            + self.scrollbar_width()
    }
}

/// Pixel geometry of a matrix chart for one set of inputs.
///
/// Coordinates: the header occupies `y ∈ [0, label_height)`, the cell body starts
/// at `y = label_height` and the cells start at `x = label_width`. Band offsets
/// are relative to the cell origin.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometrySnapshot {
    /// Chart width (never below `min_total_width`).
    pub total_width: f64,
    /// Height of the cell body (`rows × min_cell_size`).
    pub total_height: f64,
    /// Visible body height: `total_height` capped by the content max height.
    pub viewport_height: f64,
    /// Width reserved for row labels.
    pub label_width: f64,
    /// Height reserved for column headings.
    pub label_height: f64,
    /// Width available to the cells.
    pub effective_content_width: f64,
    /// Narrowest width the chart can be laid out at.
    pub min_total_width: f64,
    /// Whether a scrollbar's width is reserved right of the cells.
    pub scrollbar_reserved: bool,
    /// Vertical bands, keyed by logical row index.
    pub row_band: BandScale,
    /// Horizontal bands, keyed by logical column index.
    pub col_band: BandScale,
}

/// What a point of the chart is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HoverTarget {
    /// A cell.
    Cell {
        /// Logical row index.
        row: usize,
        /// Logical column index.
        col: usize,
    },
    /// A row label.
    RowLabel(usize),
    /// A column heading.
    ColumnLabel(usize),
    /// Anything else.
    Background,
}

impl HoverTarget {
    /// The `(row, column)` pair an event on this target reports.
    pub fn indices(self) -> (Option<usize>, Option<usize>) {
        match self {
            Self::Cell { row, col } => (Some(row), Some(col)),
            Self::RowLabel(row) => (Some(row), None),
            Self::ColumnLabel(col) => (None, Some(col)),
            Self::Background => (None, None),
        }
    }
}

impl GeometrySnapshot {
    /// Arranges a chart.
    pub fn arrange(spec: &MatrixLayoutSpec) -> Self {
        let label_width = spec.labels.row_label_width.max(0.0);
        let label_height = spec.labels.column_label_height.max(0.0);
        let total_height = spec.content_height();
        let scrollbar_reserved = spec.scrollbar_reserved();
        let min_total_width = spec.min_total_width();

        let container = if spec.container_width.is_finite() {
            spec.container_width
        } else {
            0.0
        };
        let total_width = min_total_width.max(container);
        let effective_content_width =
            (total_width - label_width - spec.scrollbar_width()).max(0.0);
        let viewport_height = match spec.content_max_height {
            Some(max) => total_height.min(max.max(0.0)),
            None => total_height,
        };

        let row_band = BandScale::new(spec.row_order.clone(), total_height);
        let col_band = BandScale::new(spec.column_order.clone(), effective_content_width);

        tracing::debug!(
            total_width,
            total_height,
            label_width,
            label_height,
            effective_content_width,
            scrollbar_reserved,
            "arranged matrix geometry"
        );

        Self {
            total_width,
            total_height,
            viewport_height,
            label_width,
            label_height,
            effective_content_width,
            min_total_width,
            scrollbar_reserved,
            row_band,
            col_band,
        }
    }

    /// Header rectangle (column headings).
    pub fn header_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.total_width, self.label_height)
    }

    /// Body rectangle in unscrolled content coordinates.
    pub fn body_rect(&self) -> Rect {
        Rect::new(
            0.0,
            self.label_height,
            self.total_width,
            self.label_height + self.total_height,
        )
    }

    /// Rectangle of cell `(row, col)` in chart coordinates.
    pub fn cell_rect(&self, row: usize, col: usize) -> Option<Rect> {
        let (y, h) = self.row_band.band(row)?;
        let (x, w) = self.col_band.band(col)?;
        let x0 = self.label_width + x;
        let y0 = self.label_height + y;
        Some(Rect::new(x0, y0, x0 + w, y0 + h))
    }

    /// Maps a chart point to what it is over.
    ///
    /// `scroll_top` is how far the body is scrolled; the header does not scroll.
    pub fn hit_test(&self, point: Point, scroll_top: f64) -> HoverTarget {
        let x = point.x - self.label_width;
        if point.y < self.label_height {
            if point.y < 0.0 {
                return HoverTarget::Background;
            }
            return self
                .col_band
                .index_at(x)
                .map_or(HoverTarget::Background, HoverTarget::ColumnLabel);
        }
        if point.y >= self.label_height + self.viewport_height {
            return HoverTarget::Background;
        }
        let y = point.y - self.label_height + scroll_top.max(0.0);
        let Some(row) = self.row_band.index_at(y) else {
            return HoverTarget::Background;
        };
        if (0.0..self.label_width).contains(&point.x) {
            return HoverTarget::RowLabel(row);
        }
        self.col_band
            .index_at(x)
            .map_or(HoverTarget::Background, |col| HoverTarget::Cell { row, col })
    }
}

/// Convenience: measure labels, then arrange.
pub fn compute_layout(
    measurer: &dyn TextMeasurer,
    labels: &LabelMeasureSpec<'_>,
    min_cell_size: f64,
    container_width: f64,
    content_max_height: Option<f64>,
    row_order: Arc<Permutation>,
    column_order: Arc<Permutation>,
) -> GeometrySnapshot {
    let labels = LabelExtents::measure(measurer, labels);
    GeometrySnapshot::arrange(&MatrixLayoutSpec {
        labels,
        min_cell_size,
        container_width,
        content_max_height,
        row_order,
        column_order,
    })
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;
    use alloc::vec::Vec;

    use matrix_text::{HeuristicTextMeasurer, MeasurementUnavailable, TextMetrics};

    use super::*;
    use crate::heading::DefaultHeadingFormat;

    fn spec(rows: usize, cols: usize, container_width: f64) -> MatrixLayoutSpec {
        MatrixLayoutSpec {
            labels: LabelExtents {
                row_label_width: 60.0,
                column_label_height: 40.0,
            },
            min_cell_size: 20.0,
            container_width,
            content_max_height: None,
            row_order: Arc::new(Permutation::identity(rows)),
            column_order: Arc::new(Permutation::identity(cols)),
        }
    }

    struct Unavailable;

    impl TextMeasurer for Unavailable {
        fn measure(
            &self,
            _text: &str,
            _style: &TextStyle,
        ) -> Result<TextMetrics, MeasurementUnavailable> {
            Err(MeasurementUnavailable::new("offline"))
        }
    }

    #[test]
    fn grows_to_fill_the_container() {
        let g = GeometrySnapshot::arrange(&spec(3, 4, 500.0));
        assert_eq!(g.total_width, 500.0);
        assert_eq!(g.total_height, 60.0);
        assert_eq!(g.effective_content_width, 440.0);
        assert_eq!(g.col_band.band_width(), 110.0);
        assert_eq!(g.row_band.band_width(), 20.0);
        assert!(!g.scrollbar_reserved);
    }

    #[test]
    fn never_shrinks_below_minimum_width() {
        let g = GeometrySnapshot::arrange(&spec(3, 10, 50.0));
        assert_eq!(g.min_total_width, 60.0 + 10.0 * 20.0);
        assert_eq!(g.total_width, g.min_total_width);
        assert_eq!(g.effective_content_width, 200.0);
        assert_eq!(g.col_band.band_width(), 20.0);
    }

    #[test]
    fn effective_width_is_never_negative() {
        for width in [-100.0, 0.0, 10.0, 260.0, 1e6, f64::NAN] {
            let mut s = spec(2, 0, width);
            s.content_max_height = Some(1.0);
            let g = GeometrySnapshot::arrange(&s);
            assert!(g.effective_content_width >= 0.0, "width {width}");
        }
    }

    #[test]
    fn empty_axes_yield_zero_sized_bands() {
        let g = GeometrySnapshot::arrange(&spec(0, 0, 300.0));
        assert_eq!(g.total_height, 0.0);
        assert_eq!(g.row_band.band_width(), 0.0);
        assert_eq!(g.col_band.band_width(), 0.0);
        assert_eq!(g.cell_rect(0, 0), None);
    }

    #[test]
    fn viewport_is_capped_by_content_max_height() {
        let mut s = spec(10, 2, 400.0);
        s.content_max_height = Some(100.0);
        let g = GeometrySnapshot::arrange(&s);
        assert!(g.scrollbar_reserved);
        assert_eq!(g.viewport_height, 100.0);
        assert_eq!(g.total_height, 200.0);

        s.content_max_height = Some(500.0);
        let g = GeometrySnapshot::arrange(&s);
        assert!(!g.scrollbar_reserved);
        assert_eq!(g.viewport_height, 200.0);
    }

    #[test]
    fn cell_rects_include_label_offsets() {
        let mut s = spec(2, 2, 100.0);
        s.row_order = Arc::new(Permutation::new(vec![1, 0]).unwrap());
        let g = GeometrySnapshot::arrange(&s);
        // 100 wide, 60 for labels: 20px columns.
        assert_eq!(g.cell_rect(1, 0), Some(Rect::new(60.0, 40.0, 80.0, 60.0)));
        assert_eq!(g.cell_rect(0, 1), Some(Rect::new(80.0, 60.0, 100.0, 80.0)));
    }

    #[test]
    fn hit_test_maps_points_to_targets() {
        let mut s = spec(10, 2, 100.0);
        s.content_max_height = Some(100.0);
        let g = GeometrySnapshot::arrange(&s);
        // The scrollbar widens the chart to 60 + 2 * 20 + 17; columns stay 20 wide.
        assert_eq!(g.total_width, 117.0);
        assert_eq!(g.hit_test(Point::new(65.0, 45.0), 0.0), HoverTarget::Cell {
            row: 0,
            col: 0
        });
        assert_eq!(g.hit_test(Point::new(65.0, 45.0), 40.0), HoverTarget::Cell {
            row: 2,
            col: 0
        });
        assert_eq!(g.hit_test(Point::new(10.0, 65.0), 0.0), HoverTarget::RowLabel(1));
        assert_eq!(g.hit_test(Point::new(85.0, 10.0), 0.0), HoverTarget::ColumnLabel(1));
        assert_eq!(g.hit_test(Point::new(10.0, 10.0), 0.0), HoverTarget::Background);
        assert_eq!(g.hit_test(Point::new(65.0, 145.0), 0.0), HoverTarget::Background);
        assert_eq!(g.hit_test(Point::new(105.0, 45.0), 0.0), HoverTarget::Background);
    }

    #[test]
    fn measured_labels_include_text_offset() {
        let rows: Vec<AxisHeading> = vec!["Row 1".into(), AxisHeading::with_count("Row", 12)];
        let columns: Vec<AxisHeading> = vec!["A".into()];
        let font = TextStyle::new(10.0);
        let labels = LabelMeasureSpec {
            rows: &rows,
            columns: &columns,
            row_format: &DefaultHeadingFormat,
            column_format: &DefaultHeadingFormat,
            row_font: &font,
            column_font: &font,
            text_offset: 5.0,
            fallback: FALLBACK_LABEL_WIDTH,
        };
        let extents = LabelExtents::measure(&HeuristicTextMeasurer, &labels);
        // "Row (12)" is 8 glyphs at 6px.
        assert!((extents.row_label_width - 53.0).abs() < 1e-9);
        assert!((extents.column_label_height - 11.0).abs() < 1e-9);

        let extents = LabelExtents::measure(&Unavailable, &labels);
        assert_eq!(extents.row_label_width, FALLBACK_LABEL_WIDTH + 5.0);
        assert_eq!(extents.column_label_height, FALLBACK_LABEL_WIDTH + 5.0);
    }

    #[test]
    fn layout_is_idempotent() {
        let rows: Vec<AxisHeading> = vec!["a".into(), "b".into()];
        let font = TextStyle::default();
        let labels = LabelMeasureSpec {
            rows: &rows,
            columns: &rows,
            row_format: &DefaultHeadingFormat,
            column_format: &DefaultHeadingFormat,
            row_font: &font,
            column_font: &font,
            text_offset: 5.0,
            fallback: FALLBACK_LABEL_WIDTH,
        };
        let order = Arc::new(Permutation::identity(2));
        let run = || {
            compute_layout(
                &HeuristicTextMeasurer,
                &labels,
                20.0,
                321.0,
                Some(30.0),
                order.clone(),
                order.clone(),
            )
        };
        assert_eq!(run(), run());
    }
}
