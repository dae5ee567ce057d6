#![forbid(unsafe_code)]

//! The expansion engine.
//!
//! A [`PedigreeTree`] owns the occupied slots of one chart and the edges
//! between them. The structure is never stored as links: a slot's parents,
//! child and generation all follow from its number (see
//! [`pedigree_core::slot`]), so the engine only keeps an ordered map from
//! slot to node metadata plus the edge set.
//!
//! # Invariants
//!
//! 1. Slot 1 is always occupied.
//! 2. For every occupied slot `p > 1`, `p / 2` is occupied and expanded.
//! 3. A slot is [`NodeState::Expanded`] iff both edges `2p → p` and
//!    `2p + 1 → p` exist, iff both parent slots are occupied.
//! 4. No slot deeper than `max_generations - 1` is ever occupied.
//! 5. The cached layout always covers exactly the occupied slots.
//!
//! Every operation either fully succeeds or leaves the chart untouched.

use std::collections::{BTreeMap, BTreeSet};

use pedigree_core::{Point, Slot};
use pedigree_layout::{ChartLayout, PedigreeLayout};
use serde::{Deserialize, Serialize};

use crate::config::ChartConfig;
use crate::error::{Result, TreeError};

/// Expansion state of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    /// Parents not added yet.
    #[default]
    Unexpanded,
    /// Parents added. Terminal.
    Expanded,
}

/// One person on the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonNode {
    slot: Slot,
    label: String,
    state: NodeState,
}

impl PersonNode {
    fn new(slot: Slot, label: String) -> Self {
        Self {
            slot,
            label,
            state: NodeState::Unexpanded,
        }
    }

    /// Position in the chart.
    #[must_use]
    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Generation, 0 for the proband.
    #[must_use]
    pub fn generation(&self) -> u32 {
        self.slot.level()
    }

    /// Expansion state.
    #[must_use]
    pub fn state(&self) -> NodeState {
        self.state
    }

    /// Whether the parents have been added.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.state == NodeState::Expanded
    }
}

/// Directed relation from a parent slot to the child slot it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub parent: Slot,
    pub child: Slot,
}

/// Result of a successful [`PedigreeTree::expand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expansion {
    /// The slot that gained parents.
    pub child: Slot,
    /// The two new slots, first parent first.
    pub parents: (Slot, Slot),
}

/// Default label of a freshly allocated parent slot.
#[must_use]
pub fn parent_label(slot: Slot) -> String {
    format!("Parent {slot}")
}

/// An ancestry chart growing upward from a single seed individual.
#[derive(Debug, Clone)]
pub struct PedigreeTree {
    config: ChartConfig,
    solver: PedigreeLayout,
    nodes: BTreeMap<Slot, PersonNode>,
    edges: BTreeSet<Edge>,
    layout: ChartLayout,
}

impl Default for PedigreeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl PedigreeTree {
    /// Seed a chart with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ChartConfig::default())
    }

    /// Seed a chart holding only the proband.
    #[must_use]
    pub fn with_config(config: ChartConfig) -> Self {
        let config = config.validated();
        let solver = config.layout();
        let mut nodes = BTreeMap::new();
        nodes.insert(
            Slot::ROOT,
            PersonNode::new(Slot::ROOT, config.root_label.clone()),
        );
        let layout = solver.compute(nodes.keys().copied());
        Self {
            config,
            solver,
            nodes,
            edges: BTreeSet::new(),
            layout,
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Depth ceiling.
    #[must_use]
    pub fn max_generations(&self) -> u32 {
        self.config.max_generations
    }

    /// Whether a slot is occupied.
    #[must_use]
    pub fn contains(&self, slot: Slot) -> bool {
        self.nodes.contains_key(&slot)
    }

    /// Turn a raw integer into an occupied slot.
    pub fn resolve(&self, raw: i64) -> Result<Slot> {
        let slot = Slot::try_from(raw)?;
        if self.contains(slot) {
            Ok(slot)
        } else {
            Err(TreeError::unoccupied(slot))
        }
    }

    /// Node at a slot.
    #[must_use]
    pub fn node(&self, slot: Slot) -> Option<&PersonNode> {
        self.nodes.get(&slot)
    }

    /// The proband.
    #[must_use]
    pub fn root(&self) -> &PersonNode {
        // Slot 1 is inserted on construction and never removed.
        &self.nodes[&Slot::ROOT]
    }

    /// All nodes, ordered by slot.
    pub fn nodes(&self) -> impl Iterator<Item = &PersonNode> + '_ {
        self.nodes.values()
    }

    /// All occupied slots, ascending.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.nodes.keys().copied()
    }

    /// All edges, ordered by parent slot.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().copied()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Deepest occupied generation.
    #[must_use]
    pub fn max_level(&self) -> u32 {
        self.layout.max_level()
    }

    /// Coordinates of the current chart.
    #[must_use]
    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    /// Coordinates of one slot.
    #[must_use]
    pub fn position(&self, slot: Slot) -> Option<Point> {
        self.layout.position(slot)
    }

    /// Whether the edge `parent → child` exists.
    #[must_use]
    pub fn has_edge(&self, parent: Slot, child: Slot) -> bool {
        self.edges.contains(&Edge { parent, child })
    }

    /// Whether [`PedigreeTree::expand`] would succeed. Never mutates.
    #[must_use]
    pub fn can_expand(&self, slot: Slot) -> bool {
        self.check_expand(slot).is_ok()
    }

    /// Validate an expansion without performing it.
    ///
    /// Returns the two parent slots that would be allocated.
    pub fn check_expand(&self, slot: Slot) -> Result<(Slot, Slot)> {
        let node = self.nodes.get(&slot).ok_or(TreeError::unoccupied(slot))?;
        if node.is_expanded() {
            return Err(TreeError::AlreadyExpanded { slot });
        }
        let parent_level = slot.level() + 1;
        match slot.checked_parents() {
            Some(parents) if parent_level < self.config.max_generations => Ok(parents),
            _ => Err(TreeError::DepthExceeded {
                slot,
                parent_level,
                max_generations: self.config.max_generations,
            }),
        }
    }

    /// Add the two parents of `slot` and recompute the layout.
    pub fn expand(&mut self, slot: Slot) -> Result<Expansion> {
        let span = pedigree_core::debug_span!("chart.expand", slot = slot.get());
        let _guard = span.enter();

        let expansion = self.insert_parents(slot)?;
        self.relayout();

        pedigree_core::debug!(
            message = "chart.expanded",
            slot = slot.get(),
            first = expansion.parents.0.get(),
            second = expansion.parents.1.get(),
            node_count = self.nodes.len(),
            max_level = self.layout.max_level()
        );
        Ok(expansion)
    }

    /// Structural half of [`PedigreeTree::expand`]: nodes and edges only.
    ///
    /// Leaves the layout stale. Batch builders call [`PedigreeTree::relayout`]
    /// once when done.
    pub(crate) fn insert_parents(&mut self, slot: Slot) -> Result<Expansion> {
        let (first, second) = match self.check_expand(slot) {
            Ok(parents) => parents,
            Err(err) => {
                pedigree_core::warn!(slot = slot.get(), error = %err, "expansion rejected");
                return Err(err);
            }
        };

        for parent in [first, second] {
            self.nodes.insert(parent, PersonNode::new(parent, parent_label(parent)));
            self.edges.insert(Edge {
                parent,
                child: slot,
            });
        }
        if let Some(node) = self.nodes.get_mut(&slot) {
            node.state = NodeState::Expanded;
        }

        Ok(Expansion {
            child: slot,
            parents: (first, second),
        })
    }

    /// Replace the label of a node. Surrounding whitespace is dropped.
    pub fn set_label(&mut self, slot: Slot, label: impl Into<String>) -> Result<()> {
        let label = label.into();
        let trimmed = label.trim();
        if !self.contains(slot) {
            return Err(TreeError::unoccupied(slot));
        }
        if trimmed.is_empty() {
            return Err(TreeError::EmptyLabel { slot });
        }
        let trimmed = trimmed.to_owned();
        if let Some(node) = self.nodes.get_mut(&slot) {
            pedigree_core::trace!(slot = slot.get(), label = %trimmed, "label updated");
            node.label = trimmed;
        }
        Ok(())
    }

    pub(crate) fn relayout(&mut self) {
        self.layout = self.solver.compute(self.nodes.keys().copied());
    }
}
