//! # Component Tags
//!
//! A tag is a 64-bit mask where every set bit names one component kind.
//! A single value may carry several bits, which then means "all of these".

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Bitmask naming one or more component kinds (up to 64 kinds).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ComponentTag(u64);

impl ComponentTag {
    /// The empty tag. Matches every entity in a query.
    pub const NONE: Self = Self(0);

    /// Creates a tag from raw bits.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Creates a single-bit tag for component kind `index` (0-63).
    ///
    /// # Panics
    ///
    /// Panics if `index` is 64 or higher.
    #[inline]
    #[must_use]
    pub const fn bit(index: u32) -> Self {
        assert!(index < 64, "component tag bit index must be below 64");
        Self(1 << index)
    }

    /// Returns the raw bits.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Returns `true` when no bit is set.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` when exactly one bit is set.
    #[inline]
    #[must_use]
    pub const fn is_single(self) -> bool {
        self.0.is_power_of_two()
    }

    /// Returns `true` when every bit of `other` is also set in `self`.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Decomposes the tag into its single-bit flags, lowest bit first.
    ///
    /// `(A | B).flags() == [A, B]` when `A` is the lower bit;
    /// the empty tag yields an empty list.
    #[must_use]
    pub fn flags(self) -> Vec<Self> {
        (0..64)
            .map(|i| 1_u64 << i)
            .filter(|flag| self.0 & flag != 0)
            .map(Self)
            .collect()
    }
}

impl BitOr for ComponentTag {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ComponentTag {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ComponentTag {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl From<u64> for ComponentTag {
    fn from(bits: u64) -> Self {
        Self(bits)
    }
}

impl fmt::Display for ComponentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#b}", self.0)
    }
}
