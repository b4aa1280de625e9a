//! Cell positions on the 9x9 grid.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell position on the board, stored as a flat index 0-80.
///
/// The flat index is `row * 9 + col`, rows and columns counted from the top
/// left. This is also the index order of the 81-character board strings used
/// by level descriptors and snapshots.
///
/// # Examples
///
/// ```
/// use gridlace_core::Position;
///
/// let pos = Position::from_row_col(2, 4);
/// assert_eq!(pos.index(), 22);
/// assert_eq!(pos.row(), 2);
/// assert_eq!(pos.col(), 4);
/// assert_eq!(pos.box_index(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(u8);

impl Position {
    /// Creates a position from a flat index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in the range 0-80.
    #[must_use]
    pub fn new(index: u8) -> Self {
        assert!(index < 81, "invalid cell index: {index}");
        Self(index)
    }

    /// Creates a position from a flat index, returning `None` out of range.
    #[must_use]
    pub const fn try_new(index: u8) -> Option<Self> {
        if index < 81 { Some(Self(index)) } else { None }
    }

    /// Creates a position from row and column coordinates (each 0-8).
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is out of range.
    #[must_use]
    pub fn from_row_col(row: u8, col: u8) -> Self {
        assert!(row < 9 && col < 9, "invalid cell coordinates: ({row}, {col})");
        Self(row * 9 + col)
    }

    /// Returns the flat index 0-80.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the row 0-8.
    #[must_use]
    pub const fn row(self) -> u8 {
        self.0 / 9
    }

    /// Returns the column 0-8.
    #[must_use]
    pub const fn col(self) -> u8 {
        self.0 % 9
    }

    /// Returns the 3x3 box index 0-8, row-major from the top left.
    #[must_use]
    pub const fn box_index(self) -> u8 {
        (self.row() / 3) * 3 + self.col() / 3
    }

    /// Iterates every cell position in index order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..81).map(Self)
    }

    /// Returns `true` if the two positions share a row, column, or box.
    ///
    /// A position is not a peer of itself.
    #[must_use]
    pub const fn is_peer_of(self, other: Self) -> bool {
        self.0 != other.0
            && (self.row() == other.row()
                || self.col() == other.col()
                || self.box_index() == other.box_index())
    }

    /// Iterates the 20 distinct peers of this cell.
    pub fn peers(self) -> impl Iterator<Item = Self> {
        Self::all().filter(move |other| self.is_peer_of(*other))
    }

    /// Iterates the edge-adjacent cells, up to four of them.
    ///
    /// There is no wraparound: the last cell of a row and the first cell of
    /// the next are not neighbors.
    pub fn orthogonal_neighbors(self) -> impl Iterator<Item = Self> {
        let (row, col) = (self.row(), self.col());
        let up = row.checked_sub(1).map(|r| Self::from_row_col(r, col));
        let down = (row < 8).then(|| Self::from_row_col(row + 1, col));
        let left = col.checked_sub(1).map(|c| Self::from_row_col(row, c));
        let right = (col < 8).then(|| Self::from_row_col(row, col + 1));
        [up, down, left, right].into_iter().flatten()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row() + 1, self.col() + 1)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn test_coordinates() {
        let pos = Position::new(40);
        assert_eq!(pos.row(), 4);
        assert_eq!(pos.col(), 4);
        assert_eq!(pos.box_index(), 4);

        assert_eq!(Position::from_row_col(8, 0).index(), 72);
        assert_eq!(Position::new(80).box_index(), 8);
    }

    #[test]
    #[should_panic(expected = "invalid cell index: 81")]
    fn test_out_of_range_panics() {
        let _ = Position::new(81);
    }

    #[test]
    fn test_peer_count() {
        for pos in Position::all() {
            assert_eq!(pos.peers().count(), 20);
            assert!(!pos.is_peer_of(pos));
        }
    }

    #[test]
    fn test_peers_of_corner() {
        let peers: BTreeSet<u8> = Position::new(0).peers().map(Position::index).collect();
        // row 0, column 0, and the rest of box 0
        let expected: BTreeSet<u8> = [
            1, 2, 3, 4, 5, 6, 7, 8, 9, 18, 27, 36, 45, 54, 63, 72, 10, 11, 19, 20,
        ]
        .into_iter()
        .collect();
        assert_eq!(peers, expected);
    }

    #[test]
    fn test_orthogonal_neighbors_no_wraparound() {
        let end_of_row: Vec<u8> = Position::new(8)
            .orthogonal_neighbors()
            .map(Position::index)
            .collect();
        assert!(!end_of_row.contains(&9));
        assert_eq!(end_of_row, vec![17, 7]);

        assert_eq!(Position::new(40).orthogonal_neighbors().count(), 4);
        assert_eq!(Position::new(0).orthogonal_neighbors().count(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(0).to_string(), "r1c1");
        assert_eq!(Position::new(80).to_string(), "r9c9");
    }
}
