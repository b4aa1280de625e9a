//! Rule validation over board snapshots.
//!
//! Both entry points are pure functions of a [`Snapshot`] and a [`RuleSet`].
//! [`is_legal`] judges the board as it stands (only filled cells can break a
//! rule); [`placement_conflicts`] asks whether writing one digit into one
//! cell would directly violate an active rule, which is what mistake
//! detection and placement highlighting need.

use crate::{Digit, DigitSet, House, Position, RuleSet, Snapshot, rules::SandwichClues};

/// Returns `true` if every active rule is satisfied by the filled cells.
///
/// Constraints that cannot be judged yet (a sandwich line missing a crust,
/// a partially filled cage under its target) do not make the board illegal.
#[must_use]
pub fn is_legal(snapshot: &Snapshot, rules: &RuleSet) -> bool {
    classic_legal(snapshot)
        && (!rules.non_consecutive || non_consecutive_legal(snapshot))
        && rules
            .sandwich
            .as_ref()
            .is_none_or(|clues| sandwich_legal(snapshot, clues))
        && killer_legal(snapshot, rules)
        && arrow_legal(snapshot, rules)
}

/// Returns `true` if placing `digit` at `pos` would directly violate a rule.
///
/// The cell at `pos` is treated as empty, so the check is meaningful both
/// for empty cells and for re-judging a cell's current value.
#[must_use]
pub fn placement_conflicts(
    snapshot: &Snapshot,
    pos: Position,
    digit: Digit,
    rules: &RuleSet,
) -> bool {
    let snapshot = snapshot.with_value(pos, None);

    if pos.peers().any(|peer| snapshot.value(peer) == Some(digit)) {
        return true;
    }

    if rules.non_consecutive
        && pos.orthogonal_neighbors().any(|neighbor| {
            snapshot
                .value(neighbor)
                .is_some_and(|v| v.is_consecutive_with(digit))
        })
    {
        return true;
    }

    for cage in rules.cages_containing(pos) {
        let mut sum = u32::from(digit.value());
        let mut empty = 0u32;
        let mut seen = DigitSet::single(digit);
        for cell in cage.cells.iter().filter(|cell| *cell != pos) {
            match snapshot.value(cell) {
                Some(value) => {
                    if !seen.insert(value) {
                        return true;
                    }
                    sum += u32::from(value.value());
                }
                None => empty += 1,
            }
        }
        if sum > cage.sum || (empty == 0 && sum != cage.sum) {
            return true;
        }
    }

    if let Some(clues) = rules.sandwich.as_ref() {
        let placed = snapshot.with_value(pos, Some(digit));
        let lines = [
            (House::row_of(pos), clues.rows[usize::from(pos.row())]),
            (House::column_of(pos), clues.cols[usize::from(pos.col())]),
        ];
        for (house, clue) in lines {
            let Some(clue) = clue else { continue };
            if sandwich_sum(&placed, house).is_some_and(|sum| sum != clue) {
                return true;
            }
        }
    }

    for arrow in rules.arrows_touching(pos) {
        let bulb = if arrow.bulb == pos {
            Some(digit)
        } else {
            snapshot.value(arrow.bulb)
        };
        let mut sum = 0u32;
        let mut empty = 0u32;
        for &cell in &arrow.line {
            let value = if cell == pos { Some(digit) } else { snapshot.value(cell) };
            match value {
                Some(value) => sum += u32::from(value.value()),
                None => empty += 1,
            }
        }
        if let Some(bulb) = bulb {
            let target = u32::from(bulb.value());
            if sum > target || (empty == 0 && sum != target) {
                return true;
            }
        }
    }

    false
}

fn classic_legal(snapshot: &Snapshot) -> bool {
    House::ALL.into_iter().all(|house| {
        let mut seen = DigitSet::EMPTY;
        house
            .cells()
            .filter_map(|pos| snapshot.value(pos))
            .all(|digit| seen.insert(digit))
    })
}

fn non_consecutive_legal(snapshot: &Snapshot) -> bool {
    snapshot.filled().all(|(pos, digit)| {
        pos.orthogonal_neighbors().all(|neighbor| {
            snapshot
                .value(neighbor)
                .is_none_or(|v| !v.is_consecutive_with(digit))
        })
    })
}

fn sandwich_legal(snapshot: &Snapshot, clues: &SandwichClues) -> bool {
    let mut lines = House::ROWS
        .into_iter()
        .zip(clues.rows)
        .chain(House::COLUMNS.into_iter().zip(clues.cols));
    lines.all(|(house, clue)| {
        let Some(clue) = clue else { return true };
        match sandwich_sum(snapshot, house) {
            Some(sum) => sum == clue,
            // a crust is not placed yet, nothing to judge
            None => true,
        }
    })
}

/// Sum of the filled cells strictly between the crusts of a line, or `None`
/// if either crust is unplaced. Empty span cells contribute nothing, so a
/// sparsely filled span is judged by what it already holds.
fn sandwich_sum(snapshot: &Snapshot, house: House) -> Option<u32> {
    let cells: Vec<_> = house.cells().collect();
    let low = cells
        .iter()
        .position(|pos| snapshot.value(*pos) == Some(Digit::LOW_CRUST))?;
    let high = cells
        .iter()
        .position(|pos| snapshot.value(*pos) == Some(Digit::HIGH_CRUST))?;
    let (start, end) = if low < high { (low, high) } else { (high, low) };
    let sum = cells[start + 1..end]
        .iter()
        .filter_map(|pos| snapshot.value(*pos))
        .map(|digit| u32::from(digit.value()))
        .sum();
    Some(sum)
}

fn killer_legal(snapshot: &Snapshot, rules: &RuleSet) -> bool {
    rules.cages.iter().all(|cage| {
        let mut sum = 0u32;
        let mut empty = 0u32;
        let mut seen = DigitSet::EMPTY;
        for cell in cage.cells.iter() {
            match snapshot.value(cell) {
                Some(value) => {
                    // duplicates in a cage are illegal regardless of the sum
                    if !seen.insert(value) {
                        return false;
                    }
                    sum += u32::from(value.value());
                }
                None => empty += 1,
            }
        }
        empty > 0 || sum == cage.sum
    })
}

fn arrow_legal(snapshot: &Snapshot, rules: &RuleSet) -> bool {
    rules.arrows.iter().all(|arrow| {
        let Some(bulb) = snapshot.value(arrow.bulb) else {
            return true;
        };
        let mut sum = 0u32;
        for &cell in &arrow.line {
            let Some(value) = snapshot.value(cell) else {
                return true;
            };
            sum += u32::from(value.value());
        }
        sum == u32::from(bulb.value())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Arrow, Cage};

    fn board(cells: &[(u8, u8)]) -> Snapshot {
        let mut snapshot = Snapshot::EMPTY;
        for &(index, value) in cells {
            snapshot = snapshot.with_value(Position::new(index), Some(Digit::from_value(value)));
        }
        snapshot
    }

    #[test]
    fn test_classic_duplicate_in_row() {
        let rules = RuleSet::classic();
        assert!(!is_legal(&board(&[(0, 5), (8, 5)]), &rules));
        assert!(is_legal(&board(&[(0, 5), (8, 6)]), &rules));
    }

    #[test]
    fn test_classic_duplicate_in_box() {
        let rules = RuleSet::classic();
        assert!(!is_legal(&board(&[(0, 3), (20, 3)]), &rules));
    }

    #[test]
    fn test_non_consecutive() {
        let rules = RuleSet {
            non_consecutive: true,
            ..RuleSet::default()
        };
        // cells 0 and 1 are orthogonal neighbors
        assert!(!is_legal(&board(&[(0, 4), (1, 5)]), &rules));
        assert!(is_legal(&board(&[(0, 4), (1, 6)]), &rules));
        // cells 8 and 9 are not neighbors (no wraparound)
        assert!(is_legal(&board(&[(8, 4), (9, 5)]), &rules));
    }

    fn sandwich_rules(row_clue: u32) -> RuleSet {
        let mut clues = SandwichClues::default();
        clues.rows[0] = Some(row_clue);
        RuleSet {
            sandwich: Some(clues),
            ..RuleSet::default()
        }
    }

    #[test]
    fn test_sandwich_checked_only_with_both_crusts() {
        let rules = sandwich_rules(5);

        // only one crust placed, nothing to judge yet
        assert!(is_legal(&board(&[(0, 1), (2, 7)]), &rules));
        // both crusts, span filled, wrong sum
        assert!(!is_legal(&board(&[(0, 1), (1, 7), (2, 9)]), &rules));
        // both crusts, span filled, right sum
        assert!(is_legal(&board(&[(0, 1), (1, 5), (2, 9)]), &rules));
    }

    #[test]
    fn test_sandwich_span_with_empty_cells_is_judged() {
        let rules = sandwich_rules(5);

        // both crusts placed, empty span cells count as zero
        assert!(!is_legal(&board(&[(0, 1), (2, 9)]), &rules));
        assert!(!is_legal(&board(&[(0, 1), (3, 9)]), &rules));
        // a partially filled span already over the clue
        assert!(!is_legal(&board(&[(0, 1), (1, 7), (4, 9)]), &rules));
        // a partially filled span meeting the clue exactly
        assert!(is_legal(&board(&[(0, 1), (1, 5), (3, 9)]), &rules));
    }

    #[test]
    fn test_placement_sandwich() {
        let rules = sandwich_rules(5);

        // both crusts on the board, the span must hit the clue
        let crusts = board(&[(0, 1), (2, 9)]);
        assert!(placement_conflicts(&crusts, Position::new(1), Digit::D7, &rules));
        assert!(!placement_conflicts(&crusts, Position::new(1), Digit::D5, &rules));

        // placing a crust that closes an unsatisfied span conflicts
        let open = board(&[(0, 1), (1, 3)]);
        assert!(placement_conflicts(&open, Position::new(2), Digit::D9, &rules));
        let satisfied = board(&[(0, 1), (1, 5)]);
        assert!(!placement_conflicts(&satisfied, Position::new(2), Digit::D9, &rules));

        // a line without a clue is unconstrained
        let elsewhere = board(&[(9, 1), (11, 9)]);
        assert!(!placement_conflicts(&elsewhere, Position::new(10), Digit::D7, &rules));
    }

    #[test]
    fn test_killer_duplicate_beats_sum() {
        let rules = RuleSet {
            cages: vec![Cage {
                sum: 10,
                cells: [Position::new(0), Position::new(1)].into_iter().collect(),
            }],
            ..RuleSet::default()
        };
        // 5 + 5 hits the sum but duplicates in the cage
        assert!(!is_legal(&board(&[(0, 5), (1, 5)]), &rules));
        assert!(is_legal(&board(&[(0, 4), (1, 6)]), &rules));
        assert!(!is_legal(&board(&[(0, 4), (1, 7)]), &rules));
        // partial cage under target is fine
        assert!(is_legal(&board(&[(0, 4)]), &rules));
    }

    #[test]
    fn test_arrow_sum() {
        let rules = RuleSet {
            arrows: vec![Arrow {
                bulb: Position::new(0),
                line: vec![Position::new(1), Position::new(2)],
            }],
            ..RuleSet::default()
        };
        assert!(is_legal(&board(&[(0, 7), (1, 3), (2, 4)]), &rules));
        assert!(!is_legal(&board(&[(0, 7), (1, 3), (2, 5)]), &rules));
        // unfilled line cell defers judgement
        assert!(is_legal(&board(&[(0, 7), (1, 3)]), &rules));
    }

    #[test]
    fn test_placement_classic_peer() {
        let snapshot = board(&[(1, 5)]);
        let rules = RuleSet::classic();
        assert!(placement_conflicts(&snapshot, Position::new(0), Digit::D5, &rules));
        assert!(!placement_conflicts(&snapshot, Position::new(0), Digit::D6, &rules));
        // a non-peer cell does not conflict
        assert!(!placement_conflicts(&snapshot, Position::new(80), Digit::D5, &rules));
    }

    #[test]
    fn test_placement_ignores_own_value() {
        // re-judging the cell's own value must not see itself as a peer
        let snapshot = board(&[(0, 5)]);
        let rules = RuleSet::classic();
        assert!(!placement_conflicts(&snapshot, Position::new(0), Digit::D5, &rules));
    }

    #[test]
    fn test_placement_non_consecutive() {
        let snapshot = board(&[(1, 5)]);
        let rules = RuleSet {
            non_consecutive: true,
            ..RuleSet::default()
        };
        assert!(placement_conflicts(&snapshot, Position::new(0), Digit::D4, &rules));
        assert!(placement_conflicts(&snapshot, Position::new(0), Digit::D6, &rules));
        assert!(!placement_conflicts(&snapshot, Position::new(0), Digit::D7, &rules));
    }

    #[test]
    fn test_placement_cage_overflow_and_exact_sum() {
        let rules = RuleSet {
            cages: vec![Cage {
                sum: 10,
                cells: [Position::new(0), Position::new(1), Position::new(2)]
                    .into_iter()
                    .collect(),
            }],
            ..RuleSet::default()
        };
        let snapshot = board(&[(1, 6)]);
        // 6 + 9 overflows the cage with a cell still empty
        assert!(placement_conflicts(&snapshot, Position::new(0), Digit::D9, &rules));
        assert!(!placement_conflicts(&snapshot, Position::new(0), Digit::D3, &rules));
        // completing the cage requires the exact sum
        let nearly_full = board(&[(0, 1), (1, 6)]);
        assert!(placement_conflicts(&nearly_full, Position::new(2), Digit::D2, &rules));
        assert!(!placement_conflicts(&nearly_full, Position::new(2), Digit::D3, &rules));
    }

    #[test]
    fn test_placement_arrow() {
        let rules = RuleSet {
            arrows: vec![Arrow {
                bulb: Position::new(0),
                line: vec![Position::new(1), Position::new(2)],
            }],
            ..RuleSet::default()
        };
        let snapshot = board(&[(0, 7), (1, 3)]);
        assert!(placement_conflicts(&snapshot, Position::new(2), Digit::D5, &rules));
        assert!(!placement_conflicts(&snapshot, Position::new(2), Digit::D4, &rules));
        // placing the bulb under the partial line sum conflicts
        let line_only = board(&[(1, 3), (2, 4)]);
        assert!(placement_conflicts(&line_only, Position::new(0), Digit::D5, &rules));
        assert!(!placement_conflicts(&line_only, Position::new(0), Digit::D7, &rules));
    }
}
