#![forbid(unsafe_code)]

//! Ancestry chart expansion engine.
//!
//! # Role in the pedigree engine
//! `pedigree-tree` is the single mutator of a chart. [`PedigreeTree`] owns the
//! occupied slots and edges, grows them one expansion at a time under a depth
//! ceiling, and keeps a layout computed by `pedigree-layout` in sync after
//! every change.
//!
//! # Primary responsibilities
//! - **PedigreeTree**: seed, expand, relabel, query.
//! - **ChartActions**: capability interface handed to a rendering layer.
//! - **ChartView**: render snapshot with positions, edges and affordances.
//! - **Individual**: mapping between chart slots and stored person records.
//! - **ChartConfig**: depth ceiling, spacing, seed label.

pub mod actions;
pub mod config;
pub mod error;
pub mod record;
pub mod tree;
pub mod view;

pub use actions::{ActionOutcome, ChartAction, ChartActions, EditRequest};
pub use config::{
    ChartConfig, DEFAULT_MAX_GENERATIONS, DEFAULT_ROOT_LABEL, MAX_GENERATIONS_LIMIT,
};
pub use error::{InvalidSlot, Result, TreeError};
pub use record::{Gender, ImportReport, Individual, LifeEvent, Marriage, RecordError, RecordId};
pub use tree::{Edge, Expansion, NodeState, PedigreeTree, PersonNode, parent_label};
pub use view::{ChartView, NodeView};
