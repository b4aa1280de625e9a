//! Highlight classification for every cell of the board.

use derive_more::Display;
use gridlace_core::{Digit, Position, RuleSet, Snapshot, validator};
use gridlace_solver::Eliminations;

use crate::{HighlightMode, Selection};

/// How one cell should be highlighted. Exactly one kind applies per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum HighlightKind {
    /// The cell is part of the selection.
    Selected,
    /// The cell holds the same value as the selection or explicit digit.
    SameValue,
    /// The cell relates to the selection under the active highlight mode.
    Relating,
    /// The cell directly conflicts with the selection. Reserved for
    /// direct-conflict marking; none of the current modes produce it.
    Forbidden,
    /// No highlight.
    None,
}

/// Everything highlight classification reads. All references point at
/// post-commit state, so classification is a pure function.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HighlightContext<'a> {
    pub(crate) snapshot: &'a Snapshot,
    pub(crate) rules: &'a RuleSet,
    pub(crate) eliminations: &'a Eliminations,
    pub(crate) selection: &'a Selection,
    pub(crate) mode: HighlightMode,
}

pub(crate) fn classify(ctx: &HighlightContext<'_>, pos: Position) -> HighlightKind {
    if ctx.selection.contains(pos) {
        return HighlightKind::Selected;
    }

    // a multi-cell selection suppresses everything else
    if ctx.selection.cells().len() > 1 {
        return HighlightKind::None;
    }

    if let Some(anchor) = ctx.selection.cells().as_single() {
        return match ctx.snapshot.value(anchor) {
            Some(value) => classify_for_digit(ctx, pos, value, Some(anchor)),
            // an empty anchor still lights up its neighborhood
            None => classify_neighborhood(ctx, pos, anchor),
        };
    }

    if let Some(digit) = ctx.selection.highlight_digit() {
        if ctx.snapshot.value(pos) == Some(digit) {
            return HighlightKind::SameValue;
        }
        if ctx.mode == HighlightMode::Potential {
            return classify_for_digit(ctx, pos, digit, None);
        }
    }

    HighlightKind::None
}

fn classify_neighborhood(
    ctx: &HighlightContext<'_>,
    pos: Position,
    anchor: Position,
) -> HighlightKind {
    if ctx.mode != HighlightMode::Minimal && pos.box_index() == anchor.box_index() {
        HighlightKind::Relating
    } else {
        HighlightKind::None
    }
}

fn classify_for_digit(
    ctx: &HighlightContext<'_>,
    pos: Position,
    digit: Digit,
    anchor: Option<Position>,
) -> HighlightKind {
    match ctx.mode {
        HighlightMode::Minimal => HighlightKind::None,
        HighlightMode::Restriction => {
            if ctx.snapshot.value(pos) == Some(digit) {
                HighlightKind::SameValue
            } else if anchor.is_some_and(|anchor| pos.box_index() == anchor.box_index()) {
                // sharing a row or column outside the box is not by itself
                // a reason to relate
                HighlightKind::Relating
            } else {
                HighlightKind::None
            }
        }
        HighlightMode::Potential => match ctx.snapshot.value(pos) {
            Some(value) if value == digit => HighlightKind::SameValue,
            Some(_) => HighlightKind::None,
            None => {
                if validator::placement_conflicts(ctx.snapshot, pos, digit, ctx.rules)
                    || ctx.eliminations.is_eliminated(pos, digit)
                {
                    HighlightKind::None
                } else {
                    HighlightKind::Relating
                }
            }
        },
    }
}
