// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing primitives emitted by a matrix chart.
//!
//! Marks are plain values: a renderer only needs rectangle, text and line
//! drawing to paint a [`MatrixFrame`](crate::MatrixFrame).

extern crate alloc;

use alloc::string::String;

use kurbo::{Point, Rect};
use matrix_text::TextStyle;
use peniko::Brush;

use crate::z_order;

/// Stable identity of a mark across frames.
///
/// Cell and label keys use logical indices, so a mark keeps its key when the
/// ordering changes and only its geometry moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MarkKey {
    /// Cell at logical `(row, col)`.
    Cell {
        /// Logical row index.
        row: usize,
        /// Logical column index.
        col: usize,
    },
    /// Horizontal gridline at a row band boundary (`0..=rows`).
    RowRule(usize),
    /// Vertical gridline at a column band boundary (`0..=cols`).
    ColumnRule(usize),
    /// Label of logical row `i`.
    RowLabel(usize),
    /// Heading of logical column `i`.
    ColumnLabel(usize),
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor point.
    #[default]
    Start,
    /// Text is centered on the anchor point.
    Middle,
    /// Text ends at the anchor point.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// Anchor is the vertical middle of the line.
    #[default]
    Middle,
    /// Anchor is the alphabetic baseline.
    Alphabetic,
    /// Anchor is the hanging baseline.
    Hanging,
    /// Anchor is the ideographic baseline.
    Ideographic,
}

/// A filled rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct RectMark {
    /// Stable key.
    pub key: MarkKey,
    /// Rectangle in chart coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Paint order.
    pub z_index: i32,
}

impl RectMark {
    /// Creates a rectangle with the default fill at full opacity.
    pub fn new(key: MarkKey, rect: Rect) -> Self {
        Self {
            key,
            rect,
            fill: Brush::default(),
            opacity: 1.0,
            z_index: z_order::CELLS,
        }
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Sets the paint order.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }
}

/// A single line of unshaped text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextMark {
    /// Stable key.
    pub key: MarkKey,
    /// Anchor position in chart coordinates.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font.
    pub font: TextStyle,
    /// Rotation in degrees around `pos`.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Paint order.
    pub z_index: i32,
}

impl TextMark {
    /// Creates a text mark with default styling.
    pub fn new(key: MarkKey, pos: Point, text: impl Into<String>) -> Self {
        Self {
            key,
            pos,
            text: text.into(),
            font: TextStyle::default(),
            angle: 0.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Middle,
            fill: Brush::default(),
            opacity: 1.0,
            z_index: z_order::ROW_LABELS,
        }
    }

    /// Sets the font.
    pub fn with_font(mut self, font: TextStyle) -> Self {
        self.font = font;
        self
    }

    /// Sets the rotation angle (degrees).
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Sets the anchor.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the baseline.
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Sets the paint order.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }
}

/// A stroked line segment.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleMark {
    /// Stable key.
    pub key: MarkKey,
    /// Start point.
    pub p0: Point,
    /// End point.
    pub p1: Point,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width.
    pub stroke_width: f64,
    /// Paint order.
    pub z_index: i32,
}

impl RuleMark {
    /// Creates a 1px rule between two points.
    pub fn new(key: MarkKey, p0: Point, p1: Point) -> Self {
        Self {
            key,
            p0,
            p1,
            stroke: Brush::default(),
            stroke_width: 1.0,
            z_index: z_order::GRID_LINES,
        }
    }

    /// A horizontal rule at `y` from `x0` to `x1`.
    pub fn horizontal(key: MarkKey, y: f64, x0: f64, x1: f64) -> Self {
        Self::new(key, Point::new(x0, y), Point::new(x1, y))
    }

    /// A vertical rule at `x` from `y0` to `y1`.
    pub fn vertical(key: MarkKey, x: f64, y0: f64, y1: f64) -> Self {
        Self::new(key, Point::new(x, y0), Point::new(x, y1))
    }

    /// Sets stroke paint and width.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        self.stroke = stroke.into();
        self.stroke_width = stroke_width;
        self
    }
}

/// Any mark.
#[derive(Clone, Debug, PartialEq)]
pub enum Mark {
    /// A rectangle.
    Rect(RectMark),
    /// Text.
    Text(TextMark),
    /// A line segment.
    Rule(RuleMark),
}

impl Mark {
    /// Stable key.
    pub fn key(&self) -> MarkKey {
        match self {
            Self::Rect(m) => m.key,
            Self::Text(m) => m.key,
            Self::Rule(m) => m.key,
        }
    }

    /// Paint order.
    pub fn z_index(&self) -> i32 {
        match self {
            Self::Rect(m) => m.z_index,
            Self::Text(m) => m.z_index,
            Self::Rule(m) => m.z_index,
        }
    }
}

impl From<RectMark> for Mark {
    fn from(mark: RectMark) -> Self {
        Self::Rect(mark)
    }
}

impl From<TextMark> for Mark {
    fn from(mark: TextMark) -> Self {
        Self::Text(mark)
    }
}

impl From<RuleMark> for Mark {
    fn from(mark: RuleMark) -> Self {
        Self::Rule(mark)
    }
}
