//! Candidate eliminators for the Gridlace puzzle engine.
//!
//! Two eliminators are implemented, both pure functions over a board
//! [`Snapshot`]: locked candidates (pointing/claiming, iterated to a
//! fixpoint) and sandwich crust feasibility. They never mutate anything,
//! so they are safe to run speculatively for all nine digits after every
//! edit; [`eliminations_for_all_digits`] does exactly that, with the
//! per-digit sweeps spread over rayon worker threads against one shared
//! snapshot.

use gridlace_core::{CellSet, Digit, Position, RuleSet, Snapshot};
use rayon::prelude::*;

pub mod locked_candidates;
pub mod sandwich;

/// Per-digit elimination results from one solver run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Eliminations {
    by_digit: [CellSet; 9],
}

impl Eliminations {
    /// Returns the cells where `digit` is provably impossible.
    #[must_use]
    pub fn for_digit(&self, digit: Digit) -> CellSet {
        self.by_digit[usize::from(digit.value() - 1)]
    }

    /// Returns `true` if `digit` is eliminated at `pos`.
    #[must_use]
    pub fn is_eliminated(&self, pos: Position, digit: Digit) -> bool {
        self.for_digit(digit).contains(pos)
    }
}

/// Runs both eliminators for every digit over one snapshot.
///
/// The sandwich eliminator contributes only when the rule set carries
/// sandwich clues. The nine digit sweeps are independent, so they run in
/// parallel.
#[must_use]
pub fn eliminations_for_all_digits(snapshot: &Snapshot, rules: &RuleSet) -> Eliminations {
    let mut by_digit = [CellSet::EMPTY; 9];
    let results: Vec<(Digit, CellSet)> = Digit::ALL
        .into_par_iter()
        .map(|digit| (digit, eliminations_for_digit(snapshot, rules, digit)))
        .collect();
    for (digit, cells) in results {
        by_digit[usize::from(digit.value() - 1)] = cells;
    }
    Eliminations { by_digit }
}

/// Runs both eliminators for one digit.
#[must_use]
pub fn eliminations_for_digit(snapshot: &Snapshot, rules: &RuleSet, digit: Digit) -> CellSet {
    let mut eliminated = locked_candidates::eliminations(snapshot, digit);
    if let Some(clues) = &rules.sandwich {
        eliminated |= sandwich::eliminations(snapshot, clues, digit);
    }
    eliminated
}

#[cfg(test)]
mod tests {
    use gridlace_core::{Position, rules::SandwichClues};

    use super::*;

    #[test]
    fn test_all_digits_combines_both_eliminators() {
        let mut clues = SandwichClues::default();
        clues.rows[0] = Some(5);
        let rules = RuleSet {
            sandwich: Some(clues),
            ..RuleSet::default()
        };

        // 1 at cell 0 with an overfull span blocks 9 at cell 3 (sandwich)
        let mut snapshot = Snapshot::EMPTY;
        for (index, value) in [(0u8, 1u8), (1, 5), (2, 2)] {
            snapshot = snapshot.with_value(
                Position::new(index),
                Some(Digit::from_value(value)),
            );
        }

        let all = eliminations_for_all_digits(&snapshot, &rules);
        assert!(all.is_eliminated(Position::new(3), Digit::D9));
        assert_eq!(
            all.for_digit(Digit::D9),
            eliminations_for_digit(&snapshot, &rules, Digit::D9)
        );
    }

    #[test]
    fn test_classic_rules_skip_sandwich() {
        let snapshot = Snapshot::EMPTY;
        let rules = RuleSet::classic();
        let all = eliminations_for_all_digits(&snapshot, &rules);
        for digit in Digit::ALL {
            assert!(all.for_digit(digit).is_empty());
        }
    }
}
