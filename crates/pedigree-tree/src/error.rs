use std::fmt;

use pedigree_core::{Slot, SlotError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TreeError>;

/// Why a slot argument was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidSlot {
    /// Not a slot number at all (zero, negative, or too deep).
    Malformed(SlotError),
    /// A valid slot that is not part of the chart.
    Unoccupied(Slot),
}

impl fmt::Display for InvalidSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "{err}"),
            Self::Unoccupied(slot) => write!(f, "slot {slot} is not in the chart"),
        }
    }
}

/// Failures of chart operations. None of them changes the chart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error(
        "slot {slot} cannot gain parents: they would sit on generation {parent_level}, \
         the chart holds {max_generations} generations"
    )]
    DepthExceeded {
        slot: Slot,
        parent_level: u32,
        max_generations: u32,
    },

    #[error("slot {slot} already has parents")]
    AlreadyExpanded { slot: Slot },

    #[error("invalid slot: {0}")]
    InvalidSlot(InvalidSlot),

    #[error("label for slot {slot} is empty")]
    EmptyLabel { slot: Slot },
}

impl TreeError {
    #[must_use]
    pub fn unoccupied(slot: Slot) -> Self {
        Self::InvalidSlot(InvalidSlot::Unoccupied(slot))
    }

    /// Precondition violations that a well-behaved surface never triggers.
    #[must_use]
    pub fn is_caller_bug(&self) -> bool {
        matches!(self, Self::AlreadyExpanded { .. } | Self::InvalidSlot(_))
    }

    /// Message suitable for showing to the person editing the chart.
    #[must_use]
    pub fn notice(&self) -> String {
        match self {
            Self::DepthExceeded {
                max_generations, ..
            } => format!("You have reached the limit of {max_generations} generations."),
            Self::EmptyLabel { .. } => "A name is required.".to_owned(),
            other => other.to_string(),
        }
    }
}

impl From<SlotError> for TreeError {
    fn from(err: SlotError) -> Self {
        Self::InvalidSlot(InvalidSlot::Malformed(err))
    }
}
