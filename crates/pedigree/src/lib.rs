#![forbid(unsafe_code)]

//! Pedigree chart engine public facade.
//!
//! This crate provides the stable surface area for users. It re-exports the
//! common types from the internal crates and offers a prelude for day-to-day
//! use.
//!
//! ```
//! use pedigree::prelude::*;
//!
//! let mut chart = PedigreeTree::new();
//! chart.expand(Slot::ROOT)?;
//! assert_eq!(chart.node_count(), 3);
//! # Ok::<(), TreeError>(())
//! ```

// --- Core re-exports -------------------------------------------------------

pub use pedigree_core::{Bounds, Point, Slot, SlotError};

// --- Layout re-exports -----------------------------------------------------

pub use pedigree_layout::{
    ChartLayout, DEFAULT_UNIT_WIDTH, DEFAULT_VERTICAL_SPACING, EdgeSegment, PedigreeLayout,
};

// --- Chart re-exports ------------------------------------------------------

pub use pedigree_tree::{
    ActionOutcome, ChartAction, ChartActions, ChartConfig, ChartView, DEFAULT_MAX_GENERATIONS,
    DEFAULT_ROOT_LABEL, Edge, EditRequest, Expansion, InvalidSlot, MAX_GENERATIONS_LIMIT,
    NodeState, NodeView, PedigreeTree, PersonNode, Result, TreeError, parent_label,
};

// --- Record re-exports -----------------------------------------------------

pub use pedigree_tree::{
    Gender, ImportReport, Individual, LifeEvent, Marriage, RecordError, RecordId,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ChartActions, ChartConfig, ChartLayout, ChartView, Individual, PedigreeLayout,
        PedigreeTree, Point, RecordError, Result, Slot, TreeError,
    };

    pub use crate::{core, layout, tree};
}

pub use pedigree_core as core;
pub use pedigree_layout as layout;
pub use pedigree_tree as tree;
