//! Subcommand bodies.

use std::fs;
use std::io::Write;
use std::path::Path;

use pedigree::{
    ChartAction, ChartConfig, ChartView, ImportReport, Individual, PedigreeTree, RecordId,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cli::{ExportArgs, ImportArgs, LayoutArgs, ReplayArgs};
use crate::error::{CliError, Result};
use crate::render::{write_json, write_table};

/// JSON shape printed by `import --json`.
#[derive(Debug, Serialize)]
struct ImportOutput<'a> {
    chart: ChartView,
    report: &'a ImportReport,
}

pub fn run_layout(
    config: ChartConfig,
    args: &LayoutArgs,
    out: &mut dyn Write,
    diag: &mut dyn Write,
) -> Result<()> {
    let tree = build(config, &expand_actions(&args.expand), diag)?;
    print_view(&tree.view(), args.json, out)
}

pub fn run_replay(
    config: ChartConfig,
    args: &ReplayArgs,
    out: &mut dyn Write,
    diag: &mut dyn Write,
) -> Result<()> {
    let actions: Vec<ChartAction> = read_json(&args.script)?;
    tracing::info!(script = %args.script.display(), actions = actions.len(), "replaying");
    let tree = build(config, &actions, diag)?;
    print_view(&tree.view(), args.json, out)
}

pub fn run_import(
    config: ChartConfig,
    args: &ImportArgs,
    out: &mut dyn Write,
    diag: &mut dyn Write,
) -> Result<()> {
    let records: Vec<Individual> = read_json(&args.records)?;
    let root = RecordId::new(args.root.clone());
    let (tree, report) = PedigreeTree::from_records(&records, &root, config)?;

    if report.truncated > 0 {
        writeln!(
            diag,
            "{} ancestor(s) beyond generation {} were left out.",
            report.truncated,
            tree.max_generations()
        )?;
    }

    if args.json {
        write_json(
            &ImportOutput {
                chart: tree.view(),
                report: &report,
            },
            out,
        )
    } else {
        write_table(&tree.view(), out)
    }
}

pub fn run_export(
    config: ChartConfig,
    args: &ExportArgs,
    out: &mut dyn Write,
    diag: &mut dyn Write,
) -> Result<()> {
    if args.tree_id.trim().is_empty() {
        return Err(CliError::invalid("--tree-id must not be empty"));
    }
    let tree = build(config, &expand_actions(&args.expand), diag)?;
    let records = tree.to_records(args.tree_id.trim(), args.owner_id.trim());
    write_json(&records, out)
}

fn expand_actions(slots: &[i64]) -> Vec<ChartAction> {
    slots
        .iter()
        .map(|&slot| ChartAction::Expand { slot })
        .collect()
}

/// Seed a chart and apply `actions` in order.
///
/// Refusals a person could hit through a real surface (depth ceiling, blank
/// name) print their notice to `diag` and the run continues. Anything else
/// aborts.
pub fn build(
    config: ChartConfig,
    actions: &[ChartAction],
    diag: &mut dyn Write,
) -> Result<PedigreeTree> {
    let mut tree = PedigreeTree::with_config(config);
    for action in actions {
        match action.apply(&mut tree) {
            Ok(_) => {}
            Err(err) if err.is_caller_bug() => return Err(err.into()),
            Err(err) => {
                tracing::info!(slot = action.raw_slot(), error = %err, "action refused");
                writeln!(diag, "{}", err.notice())?;
            }
        }
    }
    Ok(tree)
}

fn print_view(view: &ChartView, json: bool, out: &mut dyn Write) -> Result<()> {
    if json {
        write_json(view, out)
    } else {
        write_table(view, out)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::ParseFile {
        path: path.to_path_buf(),
        source,
    })
}
