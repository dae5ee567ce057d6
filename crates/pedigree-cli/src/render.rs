//! Plain-text and JSON rendering of a chart view.

use std::io::Write;

use pedigree::{ChartView, NodeView};

use crate::error::Result;

/// Human-readable table, one line per node, deepest generation first.
pub fn write_table(view: &ChartView, out: &mut dyn Write) -> Result<()> {
    writeln!(
        out,
        "{} people, {} links, generation {} of {}",
        view.nodes.len(),
        view.edges.len(),
        view.max_level + 1,
        view.max_generations
    )?;
    if let Some(bounds) = view.bounds {
        writeln!(
            out,
            "extent {:.1} x {:.1}",
            bounds.width(),
            bounds.height()
        )?;
    }
    writeln!(
        out,
        "{:>3}  {:>5}  {:>9}  {:>7}  {:<3}  label",
        "gen", "slot", "x", "y", "add"
    )?;

    let mut rows: Vec<&NodeView> = view.nodes.iter().collect();
    rows.sort_by_key(|node| (std::cmp::Reverse(node.generation), node.slot));
    for node in rows {
        writeln!(
            out,
            "{:>3}  {:>5}  {:>9.1}  {:>7.1}  {:<3}  {}",
            node.generation,
            node.slot.get(),
            node.position.x,
            node.position.y,
            if node.can_expand { "yes" } else { "no" },
            node.label
        )?;
    }
    Ok(())
}

/// Pretty JSON followed by a newline.
pub fn write_json<T: serde::Serialize + ?Sized>(value: &T, out: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
