#![forbid(unsafe_code)]

//! Layout solver for pedigree charts.
//!
//! # Model
//!
//! The chart is drawn as a complete binary tree. The deepest occupied
//! generation fixes the horizontal scale: it gets `2^max_level` columns of
//! `unit_width` each. Every shallower generation splits the same total width
//! evenly among its `2^level` slots, so a slot's column is exactly the union
//! of its two parents' columns and its center is their midpoint.
//!
//! ```text
//!  y = 0    [ 4 ][ 5 ][ 6 ][ 7 ]     max_level = 2
//!  y = v    [   2    ][   3    ]
//!  y = 2v   [        1         ]
//!           ^-- x = -total/2      ^-- x = +total/2
//! ```
//!
//! The proband sits at the bottom and ancestors are stacked above, one
//! `vertical_spacing` per generation.
//!
//! # Determinism
//!
//! [`PedigreeLayout::compute`] depends only on the *set* of slots. Input
//! order and duplicates are irrelevant, and output iteration is ordered by
//! slot number.

use std::collections::BTreeMap;

use pedigree_core::{Bounds, Point, Slot};
use serde::{Deserialize, Serialize};

/// Default horizontal spacing of one node on the deepest generation.
pub const DEFAULT_UNIT_WIDTH: f64 = 220.0;

/// Default vertical distance between two generations.
pub const DEFAULT_VERTICAL_SPACING: f64 = 140.0;

/// Spacing parameters for the chart solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PedigreeLayout {
    unit_width: f64,
    vertical_spacing: f64,
}

impl Default for PedigreeLayout {
    fn default() -> Self {
        Self {
            unit_width: DEFAULT_UNIT_WIDTH,
            vertical_spacing: DEFAULT_VERTICAL_SPACING,
        }
    }
}

impl PedigreeLayout {
    /// Layout with default spacing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the width of one node column on the deepest generation.
    ///
    /// Non-finite or non-positive values are ignored.
    #[must_use]
    pub fn unit_width(mut self, unit_width: f64) -> Self {
        if unit_width.is_finite() && unit_width > 0.0 {
            self.unit_width = unit_width;
        }
        self
    }

    /// Set the distance between generations.
    ///
    /// Non-finite or non-positive values are ignored.
    #[must_use]
    pub fn vertical_spacing(mut self, vertical_spacing: f64) -> Self {
        if vertical_spacing.is_finite() && vertical_spacing > 0.0 {
            self.vertical_spacing = vertical_spacing;
        }
        self
    }

    /// Current column width.
    #[must_use]
    pub fn unit_width_value(&self) -> f64 {
        self.unit_width
    }

    /// Current generation spacing.
    #[must_use]
    pub fn vertical_spacing_value(&self) -> f64 {
        self.vertical_spacing
    }

    /// Place every slot of the chart.
    ///
    /// An empty input produces an empty layout.
    pub fn compute(&self, slots: impl IntoIterator<Item = Slot>) -> ChartLayout {
        let slots: Vec<Slot> = slots.into_iter().collect();
        let max_level = slots.iter().map(|slot| slot.level()).max().unwrap_or(0);
        let total_width = Slot::level_len(max_level) as f64 * self.unit_width;

        let positions: BTreeMap<Slot, Point> = slots
            .iter()
            .map(|&slot| (slot, self.place(slot, max_level, total_width)))
            .collect();

        pedigree_core::debug!(
            message = "chart.layout",
            max_level,
            node_count = positions.len(),
            total_width
        );

        ChartLayout {
            positions,
            max_level,
            total_width,
            vertical_spacing: self.vertical_spacing,
        }
    }

    fn place(&self, slot: Slot, max_level: u32, total_width: f64) -> Point {
        let level = slot.level();
        let slot_width = total_width / Slot::level_len(level) as f64;
        let x = (slot.index_in_level() as f64 + 0.5) * slot_width - total_width / 2.0;
        let y = f64::from(max_level - level) * self.vertical_spacing;
        Point::new(x, y)
    }
}

/// A straight connector between a parent node and its child node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeSegment {
    /// Ancestor end of the edge.
    pub parent: Slot,
    /// Descendant end of the edge.
    pub child: Slot,
    /// Position of `parent`.
    pub from: Point,
    /// Position of `child`.
    pub to: Point,
}

/// Output of [`PedigreeLayout::compute`]: one point per slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartLayout {
    positions: BTreeMap<Slot, Point>,
    max_level: u32,
    total_width: f64,
    vertical_spacing: f64,
}

impl ChartLayout {
    /// Position of a slot, if it was part of the input.
    #[must_use]
    pub fn position(&self, slot: Slot) -> Option<Point> {
        self.positions.get(&slot).copied()
    }

    /// All placements, ordered by slot number.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, Point)> + '_ {
        self.positions.iter().map(|(&slot, &point)| (slot, point))
    }

    /// Number of placed slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True when nothing was placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Deepest generation present.
    #[must_use]
    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    /// Width shared by every generation.
    #[must_use]
    pub fn total_width(&self) -> f64 {
        self.total_width
    }

    /// Column width of a generation. Shrinks toward zero for levels past
    /// the representable range instead of overflowing.
    #[must_use]
    pub fn slot_width(&self, level: u32) -> f64 {
        self.total_width / Slot::level_len(level) as f64
    }

    /// Vertical coordinate of a generation.
    #[must_use]
    pub fn level_y(&self, level: u32) -> f64 {
        f64::from(self.max_level.saturating_sub(level)) * self.vertical_spacing
    }

    /// Bounding box of the node centers.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.positions.values().copied())
    }

    /// Connector between `parent` and `child`, when both are placed.
    #[must_use]
    pub fn edge_segment(&self, parent: Slot, child: Slot) -> Option<EdgeSegment> {
        Some(EdgeSegment {
            parent,
            child,
            from: self.position(parent)?,
            to: self.position(child)?,
        })
    }
}
