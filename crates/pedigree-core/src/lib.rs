#![forbid(unsafe_code)]

//! Core: Ahnentafel slot arithmetic, chart geometry, and logging shims.
//!
//! # Role in the pedigree engine
//! `pedigree-core` is the leaf crate. It owns the [`Slot`] type that numbers
//! every position in an ancestry chart and the [`Point`]/[`Bounds`] types the
//! layout solver produces. It has no state and no knowledge of labels,
//! edges, or people.
//!
//! # How it fits in the system
//! `pedigree-layout` turns sets of slots into points, `pedigree-tree` grows
//! the set of occupied slots, and both log through the macros re-exported
//! from [`logging`].

pub mod geometry;
pub mod logging;
pub mod slot;

pub use geometry::{Bounds, Point};
pub use slot::{Slot, SlotError};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, info_span, trace, warn};
