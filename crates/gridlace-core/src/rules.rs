//! Variant rule sets: which constraints are active for a level.

use crate::{CellSet, Position};

/// A killer cage: a set of cells that must hold distinct digits summing to
/// a target.
///
/// The cell set is arbitrary; cages are not required to be contiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cage {
    /// The target sum of the cage.
    pub sum: u32,
    /// The member cells.
    pub cells: CellSet,
}

impl Cage {
    /// Returns the cell where the cage's sum label is drawn: the member
    /// with the lexicographically smallest `(row, col)` coordinate.
    #[must_use]
    pub fn label_position(&self) -> Option<Position> {
        // index order is (row, col) lexicographic order
        self.cells.iter().next()
    }
}

/// An arrow: the digits along the line must sum to the digit in the bulb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrow {
    /// The bulb cell holding the target sum.
    pub bulb: Position,
    /// The line cells that sum to the bulb.
    pub line: Vec<Position>,
}

/// Sandwich clues for rows and columns.
///
/// Each entry is the required sum of the digits strictly between 1 and 9 on
/// that line, or `None` when the line is unclued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SandwichClues {
    /// Per-row clues, top to bottom.
    pub rows: [Option<u32>; 9],
    /// Per-column clues, left to right.
    pub cols: [Option<u32>; 9],
}

/// The set of rules active for one level.
///
/// Classic Sudoku (digit uniqueness per row, column, and box) is always in
/// force and has no flag here; the fields enable the variant constraints
/// layered on top of it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleSet {
    /// Orthogonally adjacent cells may not hold consecutive digits.
    pub non_consecutive: bool,
    /// Sandwich sum clues, when the sandwich rule is active.
    pub sandwich: Option<SandwichClues>,
    /// Killer cages, empty when the killer rule is inactive.
    pub cages: Vec<Cage>,
    /// Arrows, empty when the arrow rule is inactive.
    pub arrows: Vec<Arrow>,
}

impl RuleSet {
    /// The plain classic rule set with no variant constraints.
    #[must_use]
    pub fn classic() -> Self {
        Self::default()
    }

    /// Iterates the cages containing `pos`.
    pub fn cages_containing(&self, pos: Position) -> impl Iterator<Item = &Cage> {
        self.cages.iter().filter(move |cage| cage.cells.contains(pos))
    }

    /// Iterates the arrows touching `pos` (bulb or line).
    pub fn arrows_touching(&self, pos: Position) -> impl Iterator<Item = &Arrow> {
        self.arrows
            .iter()
            .filter(move |arrow| arrow.bulb == pos || arrow.line.contains(&pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cage_label_position() {
        let cage = Cage {
            sum: 10,
            cells: [Position::new(19), Position::new(10), Position::new(11)]
                .into_iter()
                .collect(),
        };
        assert_eq!(cage.label_position(), Some(Position::new(10)));
    }

    #[test]
    fn test_classic_has_no_variants() {
        let rules = RuleSet::classic();
        assert!(!rules.non_consecutive);
        assert!(rules.sandwich.is_none());
        assert!(rules.cages.is_empty());
        assert!(rules.arrows.is_empty());
    }

    #[test]
    fn test_cages_containing() {
        let rules = RuleSet {
            cages: vec![
                Cage {
                    sum: 5,
                    cells: [Position::new(0), Position::new(1)].into_iter().collect(),
                },
                Cage {
                    sum: 9,
                    cells: [Position::new(1), Position::new(2)].into_iter().collect(),
                },
            ],
            ..RuleSet::default()
        };
        assert_eq!(rules.cages_containing(Position::new(1)).count(), 2);
        assert_eq!(rules.cages_containing(Position::new(3)).count(), 0);
    }
}
