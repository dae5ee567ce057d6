#![forbid(unsafe_code)]

//! Ahnentafel slot arithmetic.
//!
//! Every person in an ancestry chart sits at a numbered slot of an implicit
//! complete binary tree. The proband is slot 1 and the two parents of slot
//! `p` are `2p` and `2p + 1`, so the whole structure can be derived from the
//! slot integer alone:
//!
//! ```text
//! level 2:   4   5   6   7
//!             \ /     \ /
//! level 1:     2       3
//!               \     /
//! level 0:         1
//! ```
//!
//! All functions here are pure. A [`Slot`] can only be built from a positive
//! integer at or below [`Slot::MAX`], which keeps `2p + 1` inside `u64`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A position in the implicit ancestry tree (Ahnentafel number).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Slot(u64);

impl Slot {
    /// The proband.
    pub const ROOT: Slot = Slot(1);

    /// Deepest level a slot may sit on.
    pub const MAX_LEVEL: u32 = 62;

    /// Largest representable slot (last slot of [`Slot::MAX_LEVEL`]).
    pub const MAX: u64 = (1 << (Self::MAX_LEVEL + 1)) - 1;

    /// Create a slot from a raw number, rejecting 0 and values above [`Slot::MAX`].
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Option<Self> {
        if raw == 0 || raw > Self::MAX {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// First slot of a generation (`2^level`).
    ///
    /// Returns `None` past [`Slot::MAX_LEVEL`].
    #[inline]
    #[must_use]
    pub const fn first_in_level(level: u32) -> Option<Self> {
        if level > Self::MAX_LEVEL {
            None
        } else {
            Some(Self(1 << level))
        }
    }

    /// Number of slots in a generation (`2^level`).
    ///
    /// Saturates at `u64::MAX` for levels of 64 and deeper.
    #[inline]
    #[must_use]
    pub const fn level_len(level: u32) -> u64 {
        match 1u64.checked_shl(level) {
            Some(len) => len,
            None => u64::MAX,
        }
    }

    /// The raw slot number.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Whether this is the proband.
    #[inline]
    #[must_use]
    pub const fn is_root(self) -> bool {
        self.0 == 1
    }

    /// Generation of the slot: `floor(log2(p))`, root is 0.
    #[inline]
    #[must_use]
    pub const fn level(self) -> u32 {
        u64::BITS - 1 - self.0.leading_zeros()
    }

    /// 0-based rank inside the generation, left to right.
    #[inline]
    #[must_use]
    pub const fn index_in_level(self) -> u64 {
        self.0 - (1 << self.level())
    }

    /// The two parent slots `(2p, 2p + 1)`.
    ///
    /// For a slot on [`Slot::MAX_LEVEL`] the result lies one level past the
    /// representable range; use [`Slot::checked_parents`] when that matters.
    #[inline]
    #[must_use]
    pub const fn parents(self) -> (Slot, Slot) {
        (Slot(self.0 << 1), Slot((self.0 << 1) | 1))
    }

    /// Parent slots, or `None` when they would exceed [`Slot::MAX_LEVEL`].
    #[inline]
    #[must_use]
    pub const fn checked_parents(self) -> Option<(Slot, Slot)> {
        if self.level() >= Self::MAX_LEVEL {
            None
        } else {
            Some(self.parents())
        }
    }

    /// The descendant whose expansion created this slot (`floor(p / 2)`).
    ///
    /// The root has no child slot.
    #[inline]
    #[must_use]
    pub const fn child(self) -> Option<Slot> {
        if self.is_root() {
            None
        } else {
            Some(Slot(self.0 >> 1))
        }
    }

    /// The other parent of the same child (`p xor 1`). The root has none.
    #[inline]
    #[must_use]
    pub const fn sibling(self) -> Option<Slot> {
        if self.is_root() {
            None
        } else {
            Some(Slot(self.0 ^ 1))
        }
    }

    /// True for even slots (first parent of the child).
    #[inline]
    #[must_use]
    pub const fn is_first_parent(self) -> bool {
        !self.is_root() && self.0 & 1 == 0
    }

    /// Walk from this slot down to the root, this slot first.
    pub fn lineage(self) -> impl Iterator<Item = Slot> {
        std::iter::successors(Some(self), |slot| slot.child())
    }

    /// Whether `self` is an ancestor (strict) of `descendant`.
    #[must_use]
    pub const fn is_ancestor_of(self, descendant: Slot) -> bool {
        let (a, d) = (self.level(), descendant.level());
        a > d && (self.0 >> (a - d)) == descendant.0
    }
}

impl Default for Slot {
    fn default() -> Self {
        Self::ROOT
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Slot> for u64 {
    fn from(slot: Slot) -> Self {
        slot.0
    }
}

// ============================================================================
// SlotError
// ============================================================================

/// Why a raw integer is not a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// Zero or negative.
    NonPositive(i64),
    /// Larger than [`Slot::MAX`].
    OutOfRange(u64),
    /// Not an integer at all.
    Unparsable(String),
}

impl fmt::Display for SlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive(raw) => write!(f, "slot must be positive, got {raw}"),
            Self::OutOfRange(raw) => {
                write!(f, "slot {raw} is beyond the deepest level ({})", Slot::MAX_LEVEL)
            }
            Self::Unparsable(text) => write!(f, "not a slot number: {text:?}"),
        }
    }
}

impl std::error::Error for SlotError {}

impl TryFrom<u64> for Slot {
    type Error = SlotError;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        match raw {
            0 => Err(SlotError::NonPositive(0)),
            _ => Slot::new(raw).ok_or(SlotError::OutOfRange(raw)),
        }
    }
}

impl TryFrom<i64> for Slot {
    type Error = SlotError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        if raw <= 0 {
            return Err(SlotError::NonPositive(raw));
        }
        Slot::try_from(raw as u64)
    }
}

impl FromStr for Slot {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(raw) = trimmed.parse::<i64>() {
            return Slot::try_from(raw);
        }
        match trimmed.parse::<u64>() {
            Ok(raw) => Slot::try_from(raw),
            Err(_) => Err(SlotError::Unparsable(s.to_owned())),
        }
    }
}
