//! Houses (rows, columns, and 3x3 boxes) and their cell masks.

use crate::{CellSet, Position};

/// A house on the board (row, column, or 3x3 box).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum House {
    /// A row identified by its index (0-8, top to bottom).
    Row {
        /// Row index (0-8).
        y: u8,
    },
    /// A column identified by its index (0-8, left to right).
    Column {
        /// Column index (0-8).
        x: u8,
    },
    /// A 3x3 box identified by its index (0-8, left to right, top to bottom).
    Box {
        /// Box index (0-8).
        index: u8,
    },
}

const fn line_masks() -> ([u128; 9], [u128; 9], [u128; 9]) {
    let mut rows = [0u128; 9];
    let mut cols = [0u128; 9];
    let mut boxes = [0u128; 9];
    let mut i = 0;
    while i < 81 {
        let row = i / 9;
        let col = i % 9;
        let box_index = (row / 3) * 3 + col / 3;
        rows[row] |= 1 << i;
        cols[col] |= 1 << i;
        boxes[box_index] |= 1 << i;
        i += 1;
    }
    (rows, cols, boxes)
}

const MASKS: ([u128; 9], [u128; 9], [u128; 9]) = line_masks();

impl House {
    /// Array containing all rows (0-8).
    pub const ROWS: [Self; 9] = {
        let mut all = [Self::Row { y: 0 }; 9];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 9 {
            all[i] = Self::Row { y: i as u8 };
            i += 1;
        }
        all
    };

    /// Array containing all columns (0-8).
    pub const COLUMNS: [Self; 9] = {
        let mut all = [Self::Column { x: 0 }; 9];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 9 {
            all[i] = Self::Column { x: i as u8 };
            i += 1;
        }
        all
    };

    /// Array containing all boxes (0-8).
    pub const BOXES: [Self; 9] = {
        let mut all = [Self::Box { index: 0 }; 9];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 9 {
            all[i] = Self::Box { index: i as u8 };
            i += 1;
        }
        all
    };

    /// Array containing all 27 houses in row, column, box order.
    pub const ALL: [Self; 27] = {
        let mut all = [Self::Row { y: 0 }; 27];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 9 {
            all[i] = Self::Row { y: i as u8 };
            all[i + 9] = Self::Column { x: i as u8 };
            all[i + 18] = Self::Box { index: i as u8 };
            i += 1;
        }
        all
    };

    /// Returns the house containing `pos` of the matching kind.
    #[must_use]
    #[inline]
    pub const fn row_of(pos: Position) -> Self {
        Self::Row { y: pos.row() }
    }

    /// Returns the column containing `pos`.
    #[must_use]
    #[inline]
    pub const fn column_of(pos: Position) -> Self {
        Self::Column { x: pos.col() }
    }

    /// Returns the box containing `pos`.
    #[must_use]
    #[inline]
    pub const fn box_of(pos: Position) -> Self {
        Self::Box {
            index: pos.box_index(),
        }
    }

    /// Returns the set of cells contained in this house.
    #[must_use]
    pub const fn positions(self) -> CellSet {
        let mask = match self {
            Self::Row { y } => MASKS.0[y as usize],
            Self::Column { x } => MASKS.1[x as usize],
            Self::Box { index } => MASKS.2[index as usize],
        };
        CellSet::from_raw(mask)
    }

    /// Returns `true` if the house contains `pos`.
    #[must_use]
    pub const fn contains(self, pos: Position) -> bool {
        match self {
            Self::Row { y } => pos.row() == y,
            Self::Column { x } => pos.col() == x,
            Self::Box { index } => pos.box_index() == index,
        }
    }

    /// Iterates the nine cells of the house in index order.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        (0..9).map(move |i| match self {
            Self::Row { y } => Position::from_row_col(y, i),
            Self::Column { x } => Position::from_row_col(i, x),
            Self::Box { index } => {
                Position::from_row_col((index / 3) * 3 + i / 3, (index % 3) * 3 + i % 3)
            }
        })
    }
}
