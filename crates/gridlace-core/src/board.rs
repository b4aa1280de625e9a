//! The mutable board: 81 cells with values, notes, colors, and marks.

use serde::{Deserialize, Serialize};

use crate::{Digit, DigitSet, Position, Snapshot};

/// One cell of the board.
///
/// A filled cell keeps empty notes; the transaction engine clears notes in
/// the same batch that writes a value. Clue cells never change after the
/// board is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    /// The digit the cell holds, if any.
    pub value: Option<Digit>,
    /// Whether the cell is a given clue.
    pub is_clue: bool,
    /// Pencil-marked candidate notes.
    pub notes: DigitSet,
    /// An optional color tag applied by the player.
    pub color: Option<u8>,
    /// Whether the cell carries a cross (impossible) mark.
    pub has_cross: bool,
}

impl Cell {
    /// Returns `true` if the cell holds no digit.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.value.is_none()
    }
}

/// The 81-cell board for one puzzle session.
///
/// The board is built once from the level's clue snapshot and then mutated
/// only through the single-field setters. Each setter writes exactly one
/// field of one cell and silently refuses clue cells, returning whether the
/// write applied. Anything richer (clearing notes along with a value,
/// pruning peers) is composed from these by the transaction engine so every
/// change is individually undoable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; 81],
}

impl Board {
    /// Builds a board from the level's clue snapshot.
    #[must_use]
    pub fn from_clues(clues: &Snapshot) -> Self {
        let mut cells = [Cell::default(); 81];
        for (pos, digit) in clues.filled() {
            cells[usize::from(pos.index())] = Cell {
                value: Some(digit),
                is_clue: true,
                ..Cell::default()
            };
        }
        Self { cells }
    }

    /// Returns the cell at `pos`.
    #[must_use]
    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[usize::from(pos.index())]
    }

    /// Returns the value at `pos`.
    #[must_use]
    pub fn value(&self, pos: Position) -> Option<Digit> {
        self.cell(pos).value
    }

    /// Returns `true` if `pos` is a clue cell.
    #[must_use]
    pub fn is_clue(&self, pos: Position) -> bool {
        self.cell(pos).is_clue
    }

    /// Sets the value at `pos`. Returns `false` for clue cells.
    pub fn set_value(&mut self, pos: Position, value: Option<Digit>) -> bool {
        self.set_field(pos, |cell| cell.value = value)
    }

    /// Sets the notes at `pos`. Returns `false` for clue cells.
    pub fn set_notes(&mut self, pos: Position, notes: DigitSet) -> bool {
        self.set_field(pos, |cell| cell.notes = notes)
    }

    /// Sets the color at `pos`. Returns `false` for clue cells.
    pub fn set_color(&mut self, pos: Position, color: Option<u8>) -> bool {
        self.set_field(pos, |cell| cell.color = color)
    }

    /// Sets the cross mark at `pos`. Returns `false` for clue cells.
    pub fn set_cross(&mut self, pos: Position, has_cross: bool) -> bool {
        self.set_field(pos, |cell| cell.has_cross = has_cross)
    }

    fn set_field(&mut self, pos: Position, write: impl FnOnce(&mut Cell)) -> bool {
        let cell = &mut self.cells[usize::from(pos.index())];
        if cell.is_clue {
            return false;
        }
        write(cell);
        true
    }

    /// Renders the current values as an owned snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let mut values = [None; 81];
        for (i, cell) in self.cells.iter().enumerate() {
            values[i] = cell.value;
        }
        Snapshot::new(values)
    }

    /// Restores every non-clue cell to its pristine empty state.
    pub fn reset_non_clues(&mut self) {
        for cell in &mut self.cells {
            if !cell.is_clue {
                *cell = Cell::default();
            }
        }
    }
}
