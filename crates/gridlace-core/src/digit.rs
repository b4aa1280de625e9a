//! Puzzle digit representation.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// A puzzle digit in the range 1-9.
///
/// This enum provides a type-safe representation of the digits a cell may
/// hold, preventing invalid values at compile time. A cell with no digit is
/// represented as `Option<Digit>` elsewhere; there is deliberately no
/// "empty" variant here.
///
/// # Examples
///
/// ```
/// use gridlace_core::Digit;
///
/// let digit = Digit::D5;
/// assert_eq!(digit.value(), 5);
///
/// // Iterate over all digits
/// for digit in Digit::ALL {
///     assert!((1..=9).contains(&digit.value()));
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Digit {
    /// The digit 1.
    D1 = 1,
    /// The digit 2.
    D2 = 2,
    /// The digit 3.
    D3 = 3,
    /// The digit 4.
    D4 = 4,
    /// The digit 5.
    D5 = 5,
    /// The digit 6.
    D6 = 6,
    /// The digit 7.
    D7 = 7,
    /// The digit 8.
    D8 = 8,
    /// The digit 9.
    D9 = 9,
}

impl Digit {
    /// Array containing all digits from 1 to 9, in order.
    pub const ALL: [Self; 9] = [
        Self::D1,
        Self::D2,
        Self::D3,
        Self::D4,
        Self::D5,
        Self::D6,
        Self::D7,
        Self::D8,
        Self::D9,
    ];

    /// The low "crust" digit of a sandwich line.
    pub const LOW_CRUST: Self = Self::D1;

    /// The high "crust" digit of a sandwich line.
    pub const HIGH_CRUST: Self = Self::D9;

    /// Creates a digit from a value in the range 1-9.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not in the range 1-9. Use
    /// [`Digit::try_from_value`] for fallible conversion.
    #[must_use]
    pub fn from_value(value: u8) -> Self {
        Self::try_from_value(value).unwrap_or_else(|| panic!("invalid digit value: {value}"))
    }

    /// Creates a digit from a value, returning `None` outside the range 1-9.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridlace_core::Digit;
    ///
    /// assert_eq!(Digit::try_from_value(7), Some(Digit::D7));
    /// assert_eq!(Digit::try_from_value(0), None);
    /// assert_eq!(Digit::try_from_value(10), None);
    /// ```
    #[must_use]
    pub const fn try_from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::D1),
            2 => Some(Self::D2),
            3 => Some(Self::D3),
            4 => Some(Self::D4),
            5 => Some(Self::D5),
            6 => Some(Self::D6),
            7 => Some(Self::D7),
            8 => Some(Self::D8),
            9 => Some(Self::D9),
            _ => None,
        }
    }

    /// Returns the numeric value of this digit (1-9).
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Returns `true` if this digit is a sandwich crust (1 or 9).
    #[must_use]
    pub const fn is_crust(self) -> bool {
        matches!(self, Self::D1 | Self::D9)
    }

    /// Returns the other crust digit, or `None` for non-crust digits.
    #[must_use]
    pub const fn other_crust(self) -> Option<Self> {
        match self {
            Self::D1 => Some(Self::D9),
            Self::D9 => Some(Self::D1),
            _ => None,
        }
    }

    /// Returns `true` if the two digits differ by exactly one.
    ///
    /// This is the adjacency tested by the non-consecutive rule.
    #[must_use]
    pub const fn is_consecutive_with(self, other: Self) -> bool {
        self.value().abs_diff(other.value()) == 1
    }
}

impl Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.value(), f)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> u8 {
        digit.value()
    }
}
