//! Locked-candidates (pointing/claiming) elimination.

use gridlace_core::{CellSet, Digit, House, Position, Snapshot};

/// Returns the empty cells where `digit` is provably impossible by locked
/// candidates.
///
/// Candidate cells for the digit are the empty cells not already excluded
/// by a placed instance of the digit in their row, column, or box. For every
/// box and each of its six intersecting lines:
///
/// - **Pointing**: the box's candidates all sit on the line, so the line's
///   candidates outside the box are eliminated.
/// - **Claiming**: the line's candidates all sit in the box, so the box's
///   candidates outside the line are eliminated.
///
/// A box whose candidates collapse to a single cell is the degenerate case
/// of both: that cell's row and column are each restricted through the same
/// mask test.
///
/// The pass repeats with the eliminated cells removed from the candidate
/// set until it adds nothing new. The eliminated set only grows and is
/// bounded by 81 cells, so the loop terminates. The result accumulates
/// every cell eliminated in any pass.
#[must_use]
pub fn eliminations(snapshot: &Snapshot, digit: Digit) -> CellSet {
    let base = candidate_cells(snapshot, digit);
    let mut eliminated = CellSet::EMPTY;
    loop {
        let candidates = base - eliminated;
        let found = single_pass(candidates);
        if (found - eliminated).is_empty() {
            return eliminated;
        }
        eliminated |= found;
    }
}

/// Empty cells that could still hold `digit` under the classic rule.
fn candidate_cells(snapshot: &Snapshot, digit: Digit) -> CellSet {
    let mut excluded = CellSet::EMPTY;
    for pos in snapshot.cells_with(digit).iter() {
        excluded |= House::row_of(pos).positions()
            | House::column_of(pos).positions()
            | House::box_of(pos).positions();
    }
    snapshot.empty_cells() - excluded
}

fn single_pass(candidates: CellSet) -> CellSet {
    let mut found = CellSet::EMPTY;
    for box_ in House::BOXES {
        for line in intersecting_lines(box_) {
            let intersection = box_.positions() & line.positions();
            if (candidates & intersection).is_empty() {
                continue;
            }
            let rest_in_box = box_.positions() - intersection;
            let rest_in_line = line.positions() - intersection;

            if (candidates & rest_in_box).is_empty() {
                // Pointing
                found |= candidates & rest_in_line;
            }
            if (candidates & rest_in_line).is_empty() {
                // Claiming
                found |= candidates & rest_in_box;
            }
        }
    }
    found
}

fn intersecting_lines(box_: House) -> [House; 6] {
    let House::Box { index } = box_ else {
        unreachable!("only boxes have intersecting lines");
    };
    let origin = Position::from_row_col((index / 3) * 3, (index % 3) * 3);
    [
        House::Row { y: origin.row() },
        House::Row { y: origin.row() + 1 },
        House::Row { y: origin.row() + 2 },
        House::Column { x: origin.col() },
        House::Column { x: origin.col() + 1 },
        House::Column { x: origin.col() + 2 },
    ]
}
