#![forbid(unsafe_code)]

//! Capability interface handed to the rendering layer.
//!
//! The surface never touches the chart directly. It asks, per node, whether
//! the "add parents" affordance should be offered ([`ChartActions::can_expand`]),
//! forwards clicks ([`ChartActions::request_expand`],
//! [`ChartActions::request_edit`]) and writes form results back
//! ([`ChartActions::commit_edit`]).
//!
//! [`ChartAction`] is the serializable form of those calls, used to replay
//! recorded interaction scripts.

use pedigree_core::Slot;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TreeError};
use crate::tree::{Expansion, PedigreeTree};

/// What the external edit form needs to open for one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRequest {
    pub slot: Slot,
    pub label: String,
    pub generation: u32,
}

/// Operations a rendering layer may invoke on a chart.
pub trait ChartActions {
    /// Whether the node should offer "add parents".
    fn can_expand(&self, slot: Slot) -> bool;

    /// Add the parents of a node.
    fn request_expand(&mut self, slot: Slot) -> Result<Expansion>;

    /// Describe a node for the edit form.
    fn request_edit(&self, slot: Slot) -> Result<EditRequest>;

    /// Store the label chosen in the edit form.
    fn commit_edit(&mut self, slot: Slot, label: &str) -> Result<()>;
}

impl ChartActions for PedigreeTree {
    fn can_expand(&self, slot: Slot) -> bool {
        PedigreeTree::can_expand(self, slot)
    }

    fn request_expand(&mut self, slot: Slot) -> Result<Expansion> {
        self.expand(slot)
    }

    fn request_edit(&self, slot: Slot) -> Result<EditRequest> {
        let node = self.node(slot).ok_or(TreeError::unoccupied(slot))?;
        Ok(EditRequest {
            slot,
            label: node.label().to_owned(),
            generation: node.generation(),
        })
    }

    fn commit_edit(&mut self, slot: Slot, label: &str) -> Result<()> {
        self.set_label(slot, label)
    }
}

/// One recorded user interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ChartAction {
    /// "Add parents" clicked on a node.
    Expand { slot: i64 },
    /// Edit form submitted for a node.
    Edit { slot: i64, label: String },
}

/// What a replayed action did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    Expanded(Expansion),
    Relabeled { slot: Slot },
}

impl ChartAction {
    /// Raw slot number the action targets.
    #[must_use]
    pub fn raw_slot(&self) -> i64 {
        match self {
            Self::Expand { slot } | Self::Edit { slot, .. } => *slot,
        }
    }

    /// Run the action against any [`ChartActions`] implementor.
    pub fn apply(&self, target: &mut dyn ChartActions) -> Result<ActionOutcome> {
        let slot = Slot::try_from(self.raw_slot())?;
        match self {
            Self::Expand { .. } => target.request_expand(slot).map(ActionOutcome::Expanded),
            Self::Edit { label, .. } => {
                target.commit_edit(slot, label)?;
                Ok(ActionOutcome::Relabeled { slot })
            }
        }
    }
}
