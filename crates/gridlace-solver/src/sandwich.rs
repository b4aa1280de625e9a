//! Sandwich crust feasibility elimination.

use gridlace_core::{CellSet, Digit, House, Position, Snapshot, rules::SandwichClues};
use tinyvec::ArrayVec;

/// Returns the empty cells where placing `digit` would make a clued
/// sandwich line infeasible.
///
/// Only the crust digits 1 and 9 carry sandwich information; any other
/// digit returns the empty set. A line derives eliminations only when the
/// *other* crust is already placed on it: the hypothetical placement then
/// fixes the span between the two crusts, and the placement is eliminated
/// when the span's already-filled cells exceed the clue, or when the span
/// has no empty cell left and its sum misses the clue.
#[must_use]
pub fn eliminations(snapshot: &Snapshot, clues: &SandwichClues, digit: Digit) -> CellSet {
    let Some(other_crust) = digit.other_crust() else {
        return CellSet::EMPTY;
    };

    let mut eliminated = CellSet::EMPTY;
    let lines = House::ROWS
        .into_iter()
        .zip(clues.rows)
        .chain(House::COLUMNS.into_iter().zip(clues.cols));
    for (house, clue) in lines {
        let Some(clue) = clue else { continue };
        eliminated |= line_eliminations(snapshot, house, clue, other_crust);
    }
    eliminated
}

fn line_eliminations(
    snapshot: &Snapshot,
    house: House,
    clue: u32,
    other_crust: Digit,
) -> CellSet {
    let cells: ArrayVec<[u8; 9]> = house.cells().map(Position::index).collect();
    let Some(anchor) = cells
        .iter()
        .position(|&index| snapshot.value(Position::new(index)) == Some(other_crust))
    else {
        // without the other crust the span is unknown, nothing to derive
        return CellSet::EMPTY;
    };

    let mut eliminated = CellSet::EMPTY;
    for (i, &index) in cells.iter().enumerate() {
        let pos = Position::new(index);
        if snapshot.value(pos).is_some() {
            continue;
        }
        let (start, end) = if i < anchor { (i, anchor) } else { (anchor, i) };
        let mut sum = 0u32;
        let mut has_empty = false;
        for &span_index in &cells[start + 1..end] {
            match snapshot.value(Position::new(span_index)) {
                Some(value) => sum += u32::from(value.value()),
                None => has_empty = true,
            }
        }
        if sum > clue || (!has_empty && sum != clue) {
            eliminated.insert(pos);
        }
    }
    eliminated
}
