#![forbid(unsafe_code)]

//! Render snapshot of a chart.
//!
//! A [`ChartView`] is everything a rendering layer needs for one frame:
//! placed nodes with their "add parents" affordance already resolved, edge
//! segments with both endpoints, and the bounding box for fitting the
//! viewport. It is a plain value; re-request it after every mutation.

use pedigree_core::{Bounds, Point, Slot};
use pedigree_layout::EdgeSegment;
use serde::{Deserialize, Serialize};

use crate::tree::PedigreeTree;

/// One node as the surface draws it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeView {
    pub slot: Slot,
    pub label: String,
    pub generation: u32,
    pub position: Point,
    pub can_expand: bool,
}

/// Snapshot of a whole chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartView {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeSegment>,
    pub bounds: Option<Bounds>,
    pub max_level: u32,
    pub max_generations: u32,
}

impl ChartView {
    /// Node at a slot.
    #[must_use]
    pub fn node(&self, slot: Slot) -> Option<&NodeView> {
        self.nodes.iter().find(|node| node.slot == slot)
    }

    /// Nodes of one generation, left to right.
    pub fn generation(&self, level: u32) -> impl Iterator<Item = &NodeView> + '_ {
        self.nodes.iter().filter(move |node| node.generation == level)
    }
}

impl PedigreeTree {
    /// Snapshot the chart for rendering.
    #[must_use]
    pub fn view(&self) -> ChartView {
        let layout = self.layout();
        let nodes = self
            .nodes()
            .map(|node| NodeView {
                slot: node.slot(),
                label: node.label().to_owned(),
                generation: node.generation(),
                position: layout.position(node.slot()).unwrap_or_default(),
                can_expand: self.can_expand(node.slot()),
            })
            .collect();
        let edges = self
            .edges()
            .filter_map(|edge| layout.edge_segment(edge.parent, edge.child))
            .collect();
        ChartView {
            nodes,
            edges,
            bounds: layout.bounds(),
            max_level: layout.max_level(),
            max_generations: self.max_generations(),
        }
    }
}
