// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover state and highlight derivation.
//!
//! The state is two optional indices: the hovered row and the hovered column.
//! Hovering a cell sets both, a row label sets only the row, a column heading
//! only the column, and leaving the chart clears both.
//!
//! Highlighting is derived per axis. Each row and each column decides once
//! whether it is emphasized; a cell is emphasized if its row or its column is.
//! For an `m × n` matrix that is `m + n` predicate evaluations per render, not
//! `m × n`.

extern crate alloc;

use alloc::vec::Vec;

use crate::layout::HoverTarget;

/// Receives pointer events, with logical indices (`None` for the unaffected axis).
///
/// All methods default to no-ops; `()` ignores everything.
pub trait MatrixEvents {
    /// The pointer moved over a cell, row label or column heading.
    fn on_hover(&mut self, row: Option<usize>, col: Option<usize>) {
        let _ = (row, col);
    }

    /// The pointer left the chart.
    fn on_leave(&mut self) {}

    /// A cell, label or the background was clicked.
    fn on_click(&mut self, row: Option<usize>, col: Option<usize>) {
        let _ = (row, col);
    }
}

impl MatrixEvents for () {}

/// Current hover state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InteractionState {
    /// Hovered logical row.
    pub hovered_row: Option<usize>,
    /// Hovered logical column.
    pub hovered_col: Option<usize>,
}

/// Named view of an [`InteractionState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HoverPhase {
    /// Nothing hovered.
    Idle,
    /// A row label is hovered.
    RowHover(usize),
    /// A column heading is hovered.
    ColHover(usize),
    /// A cell is hovered.
    CellHover(usize, usize),
}

impl InteractionState {
    /// Nothing hovered.
    pub const IDLE: Self = Self {
        hovered_row: None,
        hovered_col: None,
    };

    /// Returns `true` if nothing is hovered.
    pub fn is_idle(&self) -> bool {
        self.hovered_row.is_none() && self.hovered_col.is_none()
    }

    /// The state as a [`HoverPhase`].
    pub fn phase(&self) -> HoverPhase {
        match (self.hovered_row, self.hovered_col) {
            (None, None) => HoverPhase::Idle,
            (Some(r), None) => HoverPhase::RowHover(r),
            (None, Some(c)) => HoverPhase::ColHover(c),
            (Some(r), Some(c)) => HoverPhase::CellHover(r, c),
        }
    }
}

/// How emphasis maps to opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightPolicy {
    /// Emphasize everything while nothing is hovered.
    pub default_highlight_when_idle: bool,
    /// Opacity of emphasized elements.
    pub normal_opacity: f32,
    /// Opacity of everything else.
    pub not_highlighted_opacity: f32,
}

impl Default for HighlightPolicy {
    fn default() -> Self {
        Self {
            default_highlight_when_idle: true,
            normal_opacity: 1.0,
            not_highlighted_opacity: 0.5,
        }
    }
}

impl HighlightPolicy {
    /// Opacity for an element with the given emphasis.
    pub fn opacity(&self, emphasized: bool) -> f32 {
        if emphasized {
            self.normal_opacity
        } else {
            self.not_highlighted_opacity
        }
    }
}

/// Per-row and per-column emphasis for one render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Emphasis {
    rows: Vec<bool>,
    cols: Vec<bool>,
    hovered_cell: Option<(usize, usize)>,
    evaluations: usize,
}

impl Emphasis {
    /// Derives emphasis for `rows × cols` from `state`.
    pub fn compute(
        state: &InteractionState,
        rows: usize,
        cols: usize,
        default_highlight_when_idle: bool,
    ) -> Self {
        let idle = state.is_idle();
        let mut evaluations = 0;
        let mut axis = |len: usize, hovered: Option<usize>| -> Vec<bool> {
            (0..len)
                .map(|i| {
                    evaluations += 1;
                    Some(i) == hovered || (idle && default_highlight_when_idle)
                })
                .collect()
        };
        let rows = axis(rows, state.hovered_row);
        let cols = axis(cols, state.hovered_col);
        let hovered_cell = state.hovered_row.zip(state.hovered_col);
        Self {
            rows,
            cols,
            hovered_cell,
            evaluations,
        }
    }

    /// Whether logical row `r` is emphasized.
    pub fn row(&self, r: usize) -> bool {
        self.rows.get(r).copied().unwrap_or(false)
    }

    /// Whether logical column `c` is emphasized.
    pub fn col(&self, c: usize) -> bool {
        self.cols.get(c).copied().unwrap_or(false)
    }

    /// Whether cell `(r, c)` is emphasized: its row or column is, or it is the hovered cell.
    pub fn cell(&self, r: usize, c: usize) -> bool {
        self.row(r) || self.col(c) || self.hovered_cell == Some((r, c))
    }

    /// How many times the emphasis predicate ran.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }
}

/// The hover state machine.
///
/// Every transition notifies the [`MatrixEvents`] hooks exactly once.
#[derive(Clone, Debug, Default)]
pub struct Interaction {
    state: InteractionState,
}

impl Interaction {
    /// Starts idle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// The pointer moved over `target`.
    ///
    /// Reports `on_hover` only when the hovered row or column changes, so
    /// hosts can forward every pointer move.
    pub fn pointer_over(&mut self, target: HoverTarget, events: &mut dyn MatrixEvents) {
        let (row, col) = target.indices();
        let next = InteractionState {
            hovered_row: row,
            hovered_col: col,
        };
        if next == self.state {
            return;
        }
        self.state = next;
        tracing::trace!(?row, ?col, "pointer over");
        events.on_hover(row, col);
    }

    /// The pointer left the chart.
    pub fn pointer_leave(&mut self, events: &mut dyn MatrixEvents) {
        self.state = InteractionState::IDLE;
        tracing::trace!("pointer left");
        events.on_leave();
    }

    /// `target` was clicked. Clicking does not change the hover state.
    pub fn click(&self, target: HoverTarget, events: &mut dyn MatrixEvents) {
        let (row, col) = target.indices();
        tracing::trace!(?row, ?col, "click");
        events.on_click(row, col);
    }

    /// Back to idle without notifying anyone (e.g. after the data changed).
    pub fn reset(&mut self) {
        self.state = InteractionState::IDLE;
    }

    /// Derives emphasis for a `rows × cols` matrix.
    pub fn emphasis(&self, rows: usize, cols: usize, policy: &HighlightPolicy) -> Emphasis {
        Emphasis::compute(&self.state, rows, cols, policy.default_highlight_when_idle)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        log: Vec<(&'static str, Option<usize>, Option<usize>)>,
    }

    impl MatrixEvents for Recorder {
        fn on_hover(&mut self, row: Option<usize>, col: Option<usize>) {
            self.log.push(("hover", row, col));
        }

        fn on_leave(&mut self) {
            self.log.push(("leave", None, None));
        }

        fn on_click(&mut self, row: Option<usize>, col: Option<usize>) {
            self.log.push(("click", row, col));
        }
    }

    #[test]
    fn hover_then_leave_returns_to_idle() {
        let mut interaction = Interaction::new();
        let mut events = Recorder::default();

        interaction.pointer_over(HoverTarget::Cell { row: 2, col: 1 }, &mut events);
        assert_eq!(interaction.state().phase(), HoverPhase::CellHover(2, 1));

        interaction.pointer_leave(&mut events);
        assert_eq!(interaction.state(), InteractionState::IDLE);
        assert_eq!(interaction.state().phase(), HoverPhase::Idle);

        assert_eq!(events.log, vec![
            ("hover", Some(2), Some(1)),
            ("leave", None, None)
        ]);
    }

    #[test]
    fn repeated_hover_on_the_same_target_reports_once() {
        let mut interaction = Interaction::new();
        let mut events = Recorder::default();
        interaction.pointer_over(HoverTarget::RowLabel(2), &mut events);
        interaction.pointer_over(HoverTarget::RowLabel(2), &mut events);
        interaction.pointer_over(HoverTarget::Cell { row: 2, col: 0 }, &mut events);
        interaction.pointer_over(HoverTarget::Background, &mut events);
        interaction.pointer_over(HoverTarget::Background, &mut events);
        assert_eq!(events.log, vec![
            ("hover", Some(2), None),
            ("hover", Some(2), Some(0)),
            ("hover", None, None)
        ]);
    }

    #[test]
    fn label_hover_sets_one_axis() {
        let mut interaction = Interaction::new();
        interaction.pointer_over(HoverTarget::RowLabel(3), &mut ());
        assert_eq!(interaction.state().phase(), HoverPhase::RowHover(3));
        interaction.pointer_over(HoverTarget::ColumnLabel(0), &mut ());
        assert_eq!(interaction.state().phase(), HoverPhase::ColHover(0));
    }

    #[test]
    fn click_reports_once_without_changing_state() {
        let mut interaction = Interaction::new();
        let mut events = Recorder::default();
        interaction.pointer_over(HoverTarget::RowLabel(1), &mut events);
        interaction.click(HoverTarget::ColumnLabel(4), &mut events);
        assert_eq!(interaction.state().phase(), HoverPhase::RowHover(1));
        assert_eq!(events.log, vec![
            ("hover", Some(1), None),
            ("click", None, Some(4))
        ]);
    }

    #[test]
    fn idle_emphasis_follows_the_default_policy() {
        let e = Emphasis::compute(&InteractionState::IDLE, 2, 3, true);
        assert!(e.cell(0, 0) && e.cell(1, 2));
        let e = Emphasis::compute(&InteractionState::IDLE, 2, 3, false);
        assert!(!e.row(0) && !e.col(2) && !e.cell(1, 1));
    }

    #[test]
    fn cell_hover_emphasizes_its_row_and_column() {
        let state = InteractionState {
            hovered_row: Some(1),
            hovered_col: Some(2),
        };
        let e = Emphasis::compute(&state, 3, 3, true);
        assert!(e.cell(1, 0), "same row");
        assert!(e.cell(0, 2), "same column");
        assert!(e.cell(1, 2), "hovered cell");
        assert!(!e.cell(0, 0), "unrelated cell");
        assert!(!e.cell(2, 1), "unrelated cell");
    }

    #[test]
    fn column_hover_leaves_rows_dim() {
        let state = InteractionState {
            hovered_row: None,
            hovered_col: Some(0),
        };
        let e = Emphasis::compute(&state, 2, 2, true);
        assert!(!e.row(0) && !e.row(1));
        assert!(e.cell(1, 0));
        assert!(!e.cell(1, 1));
    }

    #[test]
    fn emphasis_is_linear_in_rows_plus_columns() {
        let mut interaction = Interaction::new();
        interaction.pointer_over(HoverTarget::Cell { row: 10, col: 20 }, &mut ());
        let e = interaction.emphasis(50, 50, &HighlightPolicy::default());
        for r in 0..50 {
            for c in 0..50 {
                let _ = e.cell(r, c);
            }
        }
        assert_eq!(e.evaluations(), 100);
    }

    #[test]
    fn policy_selects_between_two_opacities() {
        let policy = HighlightPolicy {
            default_highlight_when_idle: true,
            normal_opacity: 0.9,
            not_highlighted_opacity: 0.25,
        };
        assert_eq!(policy.opacity(true), 0.9);
        assert_eq!(policy.opacity(false), 0.25);
    }
}
