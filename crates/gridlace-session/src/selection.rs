//! Selection state: which cells the player is acting on.

use gridlace_core::{CellSet, Digit, Position};

/// The current selection, its anchor, and the explicit digit highlight.
///
/// The explicit digit highlight is mutually exclusive with a non-empty
/// selection: selecting a cell clears it, and deselecting does not restore
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    cells: CellSet,
    anchor: Option<Position>,
    multi_select: bool,
    highlight_digit: Option<Digit>,
}

impl Selection {
    /// Creates an empty selection in single-select mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the selected cells.
    #[must_use]
    pub fn cells(&self) -> CellSet {
        self.cells
    }

    /// Returns the most recently touched selected cell.
    #[must_use]
    pub fn anchor(&self) -> Option<Position> {
        self.anchor
    }

    /// Returns `true` if multi-select mode is on.
    #[must_use]
    pub fn is_multi_select(&self) -> bool {
        self.multi_select
    }

    /// Returns the explicit digit highlight, if any.
    #[must_use]
    pub fn highlight_digit(&self) -> Option<Digit> {
        self.highlight_digit
    }

    /// Returns `true` if no cell is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns `true` if `pos` is selected.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(pos)
    }

    /// Handles a tap on `pos`.
    ///
    /// Tapping a selected cell deselects it; in single-select mode tapping
    /// elsewhere replaces the selection. Any explicit digit highlight is
    /// cleared.
    pub fn select_cell(&mut self, pos: Position) {
        self.highlight_digit = None;
        if self.cells.contains(pos) {
            self.cells.remove(pos);
            if self.anchor == Some(pos) {
                self.anchor = None;
            }
            return;
        }
        if !self.multi_select {
            self.cells = CellSet::EMPTY;
        }
        self.cells.insert(pos);
        self.anchor = Some(pos);
    }

    /// Prepares for a drag gesture starting at `pos`.
    ///
    /// In single-select mode a gesture starting outside the selection, or
    /// atop a selection of several cells, discards the selection first.
    pub fn gesture_start(&mut self, pos: Position) {
        if !self.multi_select && (!self.cells.contains(pos) || self.cells.len() > 1) {
            self.clear_cells();
        }
    }

    /// Toggles membership of `pos` without touching other cells.
    ///
    /// Used while a gesture is in flight; additive even when multi-select
    /// mode is off.
    pub fn drag_toggle(&mut self, pos: Position) {
        self.highlight_digit = None;
        if self.cells.remove(pos) {
            if self.anchor == Some(pos) {
                self.anchor = None;
            }
        } else {
            self.cells.insert(pos);
            self.anchor = Some(pos);
        }
    }

    /// Paint-selects `pos` as part of a drag.
    ///
    /// At the start of a drag in single-select mode the selection is
    /// replaced; continuing a drag only adds.
    pub fn drag_select(&mut self, pos: Position, is_start: bool) {
        self.highlight_digit = None;
        if is_start && !self.multi_select {
            self.cells = CellSet::EMPTY;
        }
        self.cells.insert(pos);
        self.anchor = Some(pos);
    }

    /// Flips multi-select mode. The current selection is kept.
    pub fn toggle_multi_select_mode(&mut self) {
        self.multi_select = !self.multi_select;
    }

    /// Sets or clears the explicit digit highlight.
    ///
    /// Setting a digit only takes effect while no cell is selected.
    pub fn set_highlight_digit(&mut self, digit: Option<Digit>) {
        if digit.is_none() || self.cells.is_empty() {
            self.highlight_digit = digit;
        }
    }

    /// Deselects everything, returning to the neutral state.
    pub fn clear(&mut self) {
        self.clear_cells();
        self.highlight_digit = None;
    }

    fn clear_cells(&mut self) {
        self.cells = CellSet::EMPTY;
        self.anchor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tap_toggles_and_replaces() {
        let mut selection = Selection::new();
        selection.select_cell(Position::new(0));
        assert!(selection.contains(Position::new(0)));
        assert_eq!(selection.anchor(), Some(Position::new(0)));

        // single mode: a new tap replaces
        selection.select_cell(Position::new(5));
        assert!(!selection.contains(Position::new(0)));
        assert!(selection.contains(Position::new(5)));

        // tapping the selected cell deselects it and clears the anchor
        selection.select_cell(Position::new(5));
        assert!(selection.is_empty());
        assert_eq!(selection.anchor(), None);
    }

    #[test]
    fn test_multi_select_accumulates() {
        let mut selection = Selection::new();
        selection.toggle_multi_select_mode();
        selection.select_cell(Position::new(0));
        selection.select_cell(Position::new(1));
        assert_eq!(selection.cells().len(), 2);
        assert_eq!(selection.anchor(), Some(Position::new(1)));

        selection.select_cell(Position::new(0));
        assert_eq!(selection.cells().len(), 1);
        // deselecting a non-anchor cell keeps the anchor
        assert_eq!(selection.anchor(), Some(Position::new(1)));
    }

    #[test]
    fn test_gesture_start_discards_stale_selection() {
        let mut selection = Selection::new();
        selection.select_cell(Position::new(0));
        selection.gesture_start(Position::new(5));
        assert!(selection.is_empty());

        // starting atop the single selected cell keeps it
        selection.select_cell(Position::new(5));
        selection.gesture_start(Position::new(5));
        assert!(selection.contains(Position::new(5)));
    }

    #[test]
    fn test_drag_toggle_is_additive() {
        let mut selection = Selection::new();
        selection.drag_toggle(Position::new(0));
        selection.drag_toggle(Position::new(1));
        assert_eq!(selection.cells().len(), 2);

        selection.drag_toggle(Position::new(0));
        assert_eq!(selection.cells().len(), 1);
    }

    #[test]
    fn test_drag_select_start_replaces_in_single_mode() {
        let mut selection = Selection::new();
        selection.select_cell(Position::new(0));
        selection.drag_select(Position::new(10), true);
        assert!(!selection.contains(Position::new(0)));
        selection.drag_select(Position::new(11), false);
        assert_eq!(selection.cells().len(), 2);
    }

    #[test]
    fn test_highlight_digit_exclusive_with_selection() {
        let mut selection = Selection::new();
        selection.set_highlight_digit(Some(Digit::D5));
        assert_eq!(selection.highlight_digit(), Some(Digit::D5));

        // selecting a cell clears it
        selection.select_cell(Position::new(0));
        assert_eq!(selection.highlight_digit(), None);

        // it cannot be set while cells are selected
        selection.set_highlight_digit(Some(Digit::D5));
        assert_eq!(selection.highlight_digit(), None);

        // deselecting does not restore it
        selection.select_cell(Position::new(0));
        assert_eq!(selection.highlight_digit(), None);
    }
}
