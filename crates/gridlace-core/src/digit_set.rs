//! A set of digits 1-9, packed into a 16-bit mask.

use std::{
    fmt,
    ops::{BitAnd, BitOr, Sub},
};

use serde::{Deserialize, Serialize};

use crate::Digit;

/// A set of digits from 1 to 9, represented as a bitset.
///
/// Bit `n` (0-8) represents digit `n + 1`. This is the storage used for a
/// cell's candidate notes and travels through move history and session
/// snapshots, so the raw bit pattern is part of the persisted format and is
/// exposed via [`DigitSet::bits`] / [`DigitSet::from_bits`].
///
/// # Examples
///
/// ```
/// use gridlace_core::{Digit, DigitSet};
///
/// let mut notes = DigitSet::EMPTY;
/// notes.insert(Digit::D1);
/// notes.insert(Digit::D5);
///
/// assert_eq!(notes.len(), 2);
/// assert!(notes.contains(Digit::D5));
/// assert!(!notes.contains(Digit::D9));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DigitSet(u16);

const ALL_BITS: u16 = 0x1ff;

impl DigitSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// The set containing every digit 1-9.
    pub const FULL: Self = Self(ALL_BITS);

    /// Creates a set containing a single digit.
    #[must_use]
    pub const fn single(digit: Digit) -> Self {
        Self(1 << (digit.value() - 1))
    }

    /// Reconstructs a set from its raw bit pattern.
    ///
    /// Returns `None` if any bit outside the digit range 1-9 is set.
    #[must_use]
    pub const fn from_bits(bits: u16) -> Option<Self> {
        if bits & !ALL_BITS == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }

    /// Returns the raw bit pattern (bit `n` set means digit `n + 1` present).
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Inserts a digit. Returns `true` if the set changed.
    pub const fn insert(&mut self, digit: Digit) -> bool {
        let before = self.0;
        self.0 |= Self::single(digit).0;
        self.0 != before
    }

    /// Removes a digit. Returns `true` if the set changed.
    pub const fn remove(&mut self, digit: Digit) -> bool {
        let before = self.0;
        self.0 &= !Self::single(digit).0;
        self.0 != before
    }

    /// Returns `true` if the digit is in the set.
    #[must_use]
    pub const fn contains(self, digit: Digit) -> bool {
        self.0 & Self::single(digit).0 != 0
    }

    /// Returns the number of digits in the set.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the digits in ascending order.
    pub fn iter(self) -> impl Iterator<Item = Digit> {
        Digit::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

impl FromIterator<Digit> for DigitSet {
    fn from_iter<I: IntoIterator<Item = Digit>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for digit in iter {
            set.insert(digit);
        }
        set
    }
}

impl BitOr for DigitSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for DigitSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Sub for DigitSet {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 & !rhs.0)
    }
}

impl fmt::Display for DigitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, digit) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{digit}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_insert_remove_contains() {
        let mut set = DigitSet::EMPTY;
        assert!(set.insert(Digit::D3));
        assert!(!set.insert(Digit::D3));
        assert!(set.contains(Digit::D3));
        assert_eq!(set.len(), 1);

        assert!(set.remove(Digit::D3));
        assert!(!set.remove(Digit::D3));
        assert!(set.is_empty());
    }

    #[test]
    fn test_constants() {
        assert_eq!(DigitSet::EMPTY.len(), 0);
        assert_eq!(DigitSet::FULL.len(), 9);
        for digit in Digit::ALL {
            assert!(DigitSet::FULL.contains(digit));
        }
    }

    #[test]
    fn test_from_bits_rejects_high_bits() {
        assert_eq!(DigitSet::from_bits(0x1ff), Some(DigitSet::FULL));
        assert_eq!(DigitSet::from_bits(0x200), None);
    }

    #[test]
    fn test_iteration_order() {
        let set: DigitSet = [Digit::D9, Digit::D1, Digit::D5].into_iter().collect();
        let collected: Vec<_> = set.iter().collect();
        assert_eq!(collected, vec![Digit::D1, Digit::D5, Digit::D9]);
    }

    #[test]
    fn test_set_algebra() {
        let a: DigitSet = [Digit::D1, Digit::D2, Digit::D3].into_iter().collect();
        let b: DigitSet = [Digit::D2, Digit::D3, Digit::D4].into_iter().collect();

        assert_eq!((a | b).len(), 4);
        assert_eq!((a & b).len(), 2);
        assert_eq!((a - b).len(), 1);
        assert!((a - b).contains(Digit::D1));
    }

    proptest! {
        #[test]
        fn prop_bits_round_trip(bits in 0u16..=0x1ff) {
            let set = DigitSet::from_bits(bits).unwrap();
            prop_assert_eq!(set.bits(), bits);
            let rebuilt: DigitSet = set.iter().collect();
            prop_assert_eq!(rebuilt, set);
        }
    }
}
