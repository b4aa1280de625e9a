//! Sets of cell positions, packed into a 128-bit mask.

use std::{
    fmt,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not, Sub, SubAssign},
};

use crate::Position;

/// A set of cell positions, represented as an 81-bit mask in a `u128`.
///
/// Bit `i` corresponds to the cell with flat index `i`. Selections, house
/// masks, and eliminator results are all `CellSet`s, so rule and solver
/// logic reduces to mask algebra.
///
/// # Examples
///
/// ```
/// use gridlace_core::{CellSet, Position};
///
/// let mut set = CellSet::EMPTY;
/// set.insert(Position::new(0));
/// set.insert(Position::new(40));
///
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(Position::new(40)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellSet(u128);

const ALL_BITS: u128 = (1 << 81) - 1;

impl CellSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// The set containing all 81 cells.
    pub const ALL: Self = Self(ALL_BITS);

    /// Creates a set containing a single cell.
    #[must_use]
    pub const fn single(pos: Position) -> Self {
        Self(1 << pos.index())
    }

    pub(crate) const fn from_raw(bits: u128) -> Self {
        Self(bits & ALL_BITS)
    }

    /// Inserts a cell. Returns `true` if the set changed.
    pub const fn insert(&mut self, pos: Position) -> bool {
        let before = self.0;
        self.0 |= Self::single(pos).0;
        self.0 != before
    }

    /// Removes a cell. Returns `true` if the set changed.
    pub const fn remove(&mut self, pos: Position) -> bool {
        let before = self.0;
        self.0 &= !Self::single(pos).0;
        self.0 != before
    }

    /// Returns `true` if the cell is in the set.
    #[must_use]
    pub const fn contains(self, pos: Position) -> bool {
        self.0 & Self::single(pos).0 != 0
    }

    /// Returns the number of cells in the set.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the single member of a one-cell set, `None` otherwise.
    #[must_use]
    pub fn as_single(self) -> Option<Position> {
        if self.len() != 1 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let index = self.0.trailing_zeros() as u8;
        Position::try_new(index)
    }

    /// Iterates the cells in ascending index order.
    pub fn iter(self) -> impl Iterator<Item = Position> {
        Position::all().filter(move |pos| self.contains(*pos))
    }
}

impl FromIterator<Position> for CellSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for pos in iter {
            set.insert(pos);
        }
        set
    }
}

impl BitOr for CellSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CellSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CellSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for CellSet {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Sub for CellSet {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 & !rhs.0)
    }
}

impl SubAssign for CellSet {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 &= !rhs.0;
    }
}

impl Not for CellSet {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0 & ALL_BITS)
    }
}

impl fmt::Display for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, pos) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{pos}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_remove() {
        let mut set = CellSet::EMPTY;
        assert!(set.insert(Position::new(80)));
        assert!(!set.insert(Position::new(80)));
        assert_eq!(set.len(), 1);
        assert!(set.remove(Position::new(80)));
        assert!(set.is_empty());
    }

    #[test]
    fn test_all_has_81_cells() {
        assert_eq!(CellSet::ALL.len(), 81);
        assert_eq!((!CellSet::EMPTY).len(), 81);
        assert_eq!(!CellSet::ALL, CellSet::EMPTY);
    }

    #[test]
    fn test_as_single() {
        assert_eq!(CellSet::EMPTY.as_single(), None);
        assert_eq!(
            CellSet::single(Position::new(33)).as_single(),
            Some(Position::new(33))
        );
        let two: CellSet = [Position::new(0), Position::new(1)].into_iter().collect();
        assert_eq!(two.as_single(), None);
    }

    #[test]
    fn test_set_algebra() {
        let a: CellSet = [0, 1, 2].into_iter().map(Position::new).collect();
        let b: CellSet = [1, 2, 3].into_iter().map(Position::new).collect();

        assert_eq!((a | b).len(), 4);
        assert_eq!((a & b).len(), 2);
        assert_eq!((a - b).as_single(), Some(Position::new(0)));

        let mut c = a;
        c |= b;
        c -= a & b;
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_iteration_order() {
        let set: CellSet = [50, 3, 77].into_iter().map(Position::new).collect();
        let indices: Vec<u8> = set.iter().map(Position::index).collect();
        assert_eq!(indices, vec![3, 50, 77]);
    }
}
