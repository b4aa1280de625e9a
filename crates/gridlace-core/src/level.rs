//! Level descriptors and their validation into typed levels.

use derive_more::{Display, Error};
use serde::Deserialize;

use crate::{
    CellSet, Position, RuleSet, Snapshot,
    rules::{Arrow, Cage, SandwichClues},
};

/// Maximum possible sandwich sum (the digits 2 through 8).
const MAX_SANDWICH_SUM: i32 = 35;

/// Error validating a level descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum LevelError {
    /// A board or solution string is not 81 characters long.
    #[display("board string has {len} characters, expected 81")]
    BoardLength {
        /// The offending length.
        len: usize,
    },
    /// A board or solution string holds a non-digit character.
    #[display("board string has non-digit character {found:?} at index {index}")]
    BoardChar {
        /// Flat index of the bad character.
        index: usize,
        /// The character found there.
        found: char,
    },
    /// A cage or arrow references a coordinate outside the grid.
    #[display("cell coordinate ({row}, {col}) is outside the 9x9 grid")]
    Coordinate {
        /// The row given.
        row: u8,
        /// The column given.
        col: u8,
    },
    /// A sandwich clue is outside the representable range.
    #[display("sandwich clue {value} is outside 0..={MAX_SANDWICH_SUM} (use -1 for no clue)")]
    Clue {
        /// The clue value given.
        value: i32,
    },
    /// A rule name in the descriptor is not recognized.
    #[display("unknown rule name {name:?}")]
    UnknownRule {
        /// The name found.
        name: String,
    },
}

/// A raw level as parsed from catalog data, before validation.
///
/// The descriptor mirrors the external catalog format: strings and plain
/// coordinate pairs. [`LevelDescriptor::into_level`] converts it into the
/// typed [`Level`] the engine runs on, rejecting malformed data.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelDescriptor {
    /// Stable level identifier.
    pub id: String,
    /// Names of the active variant rules. Classic is always implicit;
    /// recognized names are `"nonConsecutive"`, `"sandwich"`, `"killer"`,
    /// and `"arrow"`.
    #[serde(default)]
    pub rules: Vec<String>,
    /// The 81-character clue string (`0` for empty).
    pub board: String,
    /// The canonical solution, if the catalog carries one.
    #[serde(default)]
    pub solution: Option<String>,
    /// Sandwich row clues, top to bottom, `-1` for an unclued line.
    #[serde(default)]
    pub row_clues: Option<[i32; 9]>,
    /// Sandwich column clues, left to right, `-1` for an unclued line.
    #[serde(default)]
    pub col_clues: Option<[i32; 9]>,
    /// Killer cages.
    #[serde(default)]
    pub cages: Vec<CageDescriptor>,
    /// Arrows.
    #[serde(default)]
    pub arrows: Vec<ArrowDescriptor>,
}

/// A killer cage in descriptor form.
#[derive(Debug, Clone, Deserialize)]
pub struct CageDescriptor {
    /// Target sum.
    pub sum: u32,
    /// Member cells as `[row, col]` pairs.
    pub cells: Vec<[u8; 2]>,
}

/// An arrow in descriptor form.
#[derive(Debug, Clone, Deserialize)]
pub struct ArrowDescriptor {
    /// The bulb cell as `[row, col]`.
    pub bulb: [u8; 2],
    /// The line cells as `[row, col]` pairs.
    pub line: Vec<[u8; 2]>,
}

/// A validated level: typed clue board, optional solution, active rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    /// Stable level identifier.
    pub id: String,
    /// The given clues.
    pub clues: Snapshot,
    /// The canonical solution, when known.
    pub solution: Option<Snapshot>,
    /// The active rules.
    pub rules: RuleSet,
}

impl Level {
    /// Builds a classic level straight from an 81-character board string.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError`] if the string is not a well-formed board.
    pub fn classic_from_board(board: &str) -> Result<Self, LevelError> {
        Ok(Self {
            id: String::new(),
            clues: board.parse()?,
            solution: None,
            rules: RuleSet::classic(),
        })
    }
}

impl LevelDescriptor {
    /// Validates the descriptor into a typed [`Level`].
    ///
    /// # Errors
    ///
    /// Returns [`LevelError`] for a malformed board or solution string, an
    /// out-of-grid cage or arrow coordinate, an out-of-range sandwich clue,
    /// or an unrecognized rule name.
    pub fn into_level(self) -> Result<Level, LevelError> {
        let clues: Snapshot = self.board.parse()?;
        let solution = self.solution.as_deref().map(str::parse).transpose()?;

        let mut rules = RuleSet::classic();
        for name in &self.rules {
            match name.as_str() {
                "classic" => {}
                "nonConsecutive" => rules.non_consecutive = true,
                "sandwich" => {
                    rules.sandwich = Some(SandwichClues {
                        rows: convert_clues(self.row_clues.unwrap_or([-1; 9]))?,
                        cols: convert_clues(self.col_clues.unwrap_or([-1; 9]))?,
                    });
                }
                "killer" => {
                    rules.cages = self
                        .cages
                        .iter()
                        .map(|cage| {
                            Ok(Cage {
                                sum: cage.sum,
                                cells: convert_cells(&cage.cells)?,
                            })
                        })
                        .collect::<Result<_, LevelError>>()?;
                }
                "arrow" => {
                    rules.arrows = self
                        .arrows
                        .iter()
                        .map(|arrow| {
                            Ok(Arrow {
                                bulb: convert_cell(arrow.bulb)?,
                                line: arrow
                                    .line
                                    .iter()
                                    .map(|&cell| convert_cell(cell))
                                    .collect::<Result<_, LevelError>>()?,
                            })
                        })
                        .collect::<Result<_, LevelError>>()?;
                }
                _ => {
                    return Err(LevelError::UnknownRule { name: name.clone() });
                }
            }
        }

        Ok(Level {
            id: self.id,
            clues,
            solution,
            rules,
        })
    }
}

fn convert_cell([row, col]: [u8; 2]) -> Result<Position, LevelError> {
    if row < 9 && col < 9 {
        Ok(Position::from_row_col(row, col))
    } else {
        Err(LevelError::Coordinate { row, col })
    }
}

fn convert_cells(cells: &[[u8; 2]]) -> Result<CellSet, LevelError> {
    cells.iter().map(|&cell| convert_cell(cell)).collect()
}

fn convert_clues(raw: [i32; 9]) -> Result<[Option<u32>; 9], LevelError> {
    let mut clues = [None; 9];
    for (slot, value) in clues.iter_mut().zip(raw) {
        *slot = match value {
            -1 => None,
            0..=MAX_SANDWICH_SUM => Some(value.unsigned_abs()),
            _ => return Err(LevelError::Clue { value }),
        };
    }
    Ok(clues)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSIC_BOARD: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

    #[test]
    fn test_classic_from_board() {
        let level = Level::classic_from_board(CLASSIC_BOARD).unwrap();
        assert_eq!(level.rules, RuleSet::classic());
        assert_eq!(level.clues.to_string(), CLASSIC_BOARD);
    }

    #[test]
    fn test_descriptor_from_json() {
        let json = format!(
            r#"{{
                "id": "daily-42",
                "rules": ["sandwich", "killer"],
                "board": "{CLASSIC_BOARD}",
                "row_clues": [5, -1, -1, -1, -1, -1, -1, -1, 35],
                "cages": [{{ "sum": 10, "cells": [[0, 0], [0, 1]] }}]
            }}"#
        );
        let descriptor: LevelDescriptor = serde_json::from_str(&json).unwrap();
        let level = descriptor.into_level().unwrap();

        let sandwich = level.rules.sandwich.unwrap();
        assert_eq!(sandwich.rows[0], Some(5));
        assert_eq!(sandwich.rows[1], None);
        assert_eq!(sandwich.rows[8], Some(35));
        assert_eq!(level.rules.cages.len(), 1);
        assert_eq!(
            level.rules.cages[0].label_position(),
            Some(Position::new(0))
        );
    }

    #[test]
    fn test_bad_board_length() {
        assert!(matches!(
            Level::classic_from_board("123"),
            Err(LevelError::BoardLength { len: 3 })
        ));
    }

    #[test]
    fn test_bad_coordinate() {
        let descriptor = LevelDescriptor {
            id: "x".into(),
            rules: vec!["killer".into()],
            board: CLASSIC_BOARD.into(),
            solution: None,
            row_clues: None,
            col_clues: None,
            cages: vec![CageDescriptor {
                sum: 10,
                cells: vec![[0, 9]],
            }],
            arrows: vec![],
        };
        assert!(matches!(
            descriptor.into_level(),
            Err(LevelError::Coordinate { row: 0, col: 9 })
        ));
    }

    #[test]
    fn test_bad_clue() {
        let descriptor = LevelDescriptor {
            id: "x".into(),
            rules: vec!["sandwich".into()],
            board: CLASSIC_BOARD.into(),
            solution: None,
            row_clues: Some([36, -1, -1, -1, -1, -1, -1, -1, -1]),
            col_clues: None,
            cages: vec![],
            arrows: vec![],
        };
        assert!(matches!(
            descriptor.into_level(),
            Err(LevelError::Clue { value: 36 })
        ));
    }

    #[test]
    fn test_unknown_rule() {
        let descriptor = LevelDescriptor {
            id: "x".into(),
            rules: vec!["diagonal".into()],
            board: CLASSIC_BOARD.into(),
            solution: None,
            row_clues: None,
            col_clues: None,
            cages: vec![],
            arrows: vec![],
        };
        assert!(matches!(
            descriptor.into_level(),
            Err(LevelError::UnknownRule { .. })
        ));
    }
}
