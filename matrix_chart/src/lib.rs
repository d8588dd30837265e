// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout, ordering and hover-highlight engine for interactive matrix charts.
//!
//! A matrix chart draws a grid of colored cells with row labels on the left and
//! rotated column headings on top. This crate owns the parts with actual
//! decisions in them:
//! - **Ordering**: callers precompute permutations per sort key; the chart
//!   selects one per axis and never sorts by itself.
//! - **Geometry**: label measurement plus band scales that place every logical
//!   row and column in its display slot, recomputed on every resize.
//! - **Interaction**: hover state and the row/column emphasis derived from it.
//! - **Frames**: immutable snapshots of rect/text/rule marks for a renderer.
//!
//! Drawing, event dispatch and text shaping stay with the host; text
//! measurement comes in through [`matrix_text::TextMeasurer`].
//!
//! ```
//! use matrix_chart::{AxisHeading, MatrixChart, MatrixData, MatrixSpec};
//! use matrix_text::HeuristicTextMeasurer;
//! use peniko::color::palette::css;
//!
//! let spec = MatrixSpec::default().with_color_function(|_| css::STEEL_BLUE);
//! let mut chart = MatrixChart::new(
//!     spec,
//!     vec![AxisHeading::new("Row 1"), AxisHeading::new("Row 2")],
//!     vec![AxisHeading::new("A"), AxisHeading::new("B")],
//!     MatrixData::from_dense(vec![vec![1, 2], vec![3, 4]]),
//!     HeuristicTextMeasurer,
//! )
//! .unwrap();
//!
//! let geometry = chart.resize(500.0);
//! assert_eq!(geometry.total_height, 40.0);
//! assert_eq!(chart.frame().cells.len(), 4);
//! ```

#![no_std]

extern crate alloc;

mod chart;
mod color;
mod config;
mod data;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod frame;
mod heading;
mod interaction;
mod layout;
mod marks;
mod order;
mod resize;
mod scale;
pub mod z_order;

pub use chart::MatrixChart;
pub use color::{ColorMapping, ColorScale, UNMAPPED_COLOR};
pub use config::{
    DEFAULT_MIN_RECT_SIZE, DEFAULT_TEXT_OFFSET, DEFAULT_TRANSITION_DURATION, MatrixSpec,
};
pub use data::{CellEntry, CellValue, MatrixData, RowRecord};
pub use error::{ConfigError, OrderError};
pub use frame::MatrixFrame;
pub use heading::{AxisHeading, DefaultHeadingFormat, HeadingFormat, format_all};
pub use interaction::{
    Emphasis, HighlightPolicy, HoverPhase, Interaction, InteractionState, MatrixEvents,
};
pub use layout::{
    FALLBACK_LABEL_WIDTH, GeometrySnapshot, HoverTarget, LabelExtents, LabelMeasureSpec,
    MatrixLayoutSpec, SCROLLBAR_SIZE, compute_layout,
};
pub use marks::{Mark, MarkKey, RectMark, RuleMark, TextAnchor, TextBaseline, TextMark};
pub use order::{Axis, OrderTable, Permutation, resolve as resolve_order};
pub use resize::{ResizeController, SubscriptionId, ViewportListeners, ViewportSignal};
pub use scale::BandScale;
