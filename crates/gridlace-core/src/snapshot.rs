//! Immutable value snapshots of the board.

use std::{fmt, str::FromStr};

use crate::{CellSet, Digit, LevelError, Position};

/// An owned copy of the 81 cell values at one instant.
///
/// Snapshots are what the validator and the solver read. Taking one after
/// each committed edit lets recomputation (including parallel per-digit
/// solver sweeps) run on an immutable copy while the live board stays free
/// to mutate.
///
/// The canonical text form is the 81-character digit string with `0` for an
/// empty cell, in flat index order.
///
/// # Examples
///
/// ```
/// use gridlace_core::{Digit, Position, Snapshot};
///
/// let snapshot: Snapshot = format!("5{}", "0".repeat(80)).parse().unwrap();
/// assert_eq!(snapshot.value(Position::new(0)), Some(Digit::D5));
/// assert_eq!(snapshot.value(Position::new(1)), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    values: [Option<Digit>; 81],
}

impl Snapshot {
    /// A snapshot with every cell empty.
    pub const EMPTY: Self = Self {
        values: [None; 81],
    };

    /// Creates a snapshot from an explicit value array.
    #[must_use]
    pub const fn new(values: [Option<Digit>; 81]) -> Self {
        Self { values }
    }

    /// Returns the value at `pos`.
    #[must_use]
    pub fn value(&self, pos: Position) -> Option<Digit> {
        self.values[usize::from(pos.index())]
    }

    /// Sets the value at `pos`, returning the modified copy.
    #[must_use]
    pub fn with_value(mut self, pos: Position, value: Option<Digit>) -> Self {
        self.values[usize::from(pos.index())] = value;
        self
    }

    /// Returns `true` if every cell holds a digit.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// Returns the set of empty cells.
    #[must_use]
    pub fn empty_cells(&self) -> CellSet {
        Position::all().filter(|pos| self.value(*pos).is_none()).collect()
    }

    /// Returns the set of cells holding `digit`.
    #[must_use]
    pub fn cells_with(&self, digit: Digit) -> CellSet {
        Position::all()
            .filter(|pos| self.value(*pos) == Some(digit))
            .collect()
    }

    /// Iterates `(position, value)` for every filled cell.
    pub fn filled(&self) -> impl Iterator<Item = (Position, Digit)> + '_ {
        Position::all().filter_map(|pos| self.value(pos).map(|digit| (pos, digit)))
    }
}

impl FromStr for Snapshot {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.chars().count() != 81 {
            return Err(LevelError::BoardLength { len: s.chars().count() });
        }
        let mut values = [None; 81];
        for (i, c) in s.chars().enumerate() {
            values[i] = match c.to_digit(10) {
                Some(0) => None,
                #[expect(clippy::cast_possible_truncation)]
                Some(d) => Digit::try_from_value(d as u8),
                None => return Err(LevelError::BoardChar { index: i, found: c }),
            };
        }
        Ok(Self { values })
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in &self.values {
            match value {
                Some(digit) => write!(f, "{digit}")?,
                None => write!(f, "0")?,
            }
        }
        Ok(())
    }
}
