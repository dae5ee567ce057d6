//! Subcommands driven through the parsed command line, with file inputs in
//! temporary directories.

use std::fs;
use std::path::Path;

use clap::Parser;
use pedigree::{ChartView, Individual, Slot};
use pedigree_cli::{Cli, CliError, cli::execute};
use serde_json::Value;

#[derive(Debug)]
struct Output {
    stdout: String,
    stderr: String,
}

fn run(args: &[&str]) -> Result<Output, CliError> {
    let mut argv = vec!["pedigree"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).expect("arguments parse");
    let mut out = Vec::new();
    let mut diag = Vec::new();
    execute(cli, &mut out, &mut diag)?;
    Ok(Output {
        stdout: String::from_utf8(out).expect("utf8 stdout"),
        stderr: String::from_utf8(diag).expect("utf8 stderr"),
    })
}

fn write(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, body).expect("write fixture");
    path.to_string_lossy().into_owned()
}

#[test]
fn layout_json_matches_two_step_scenario() {
    let output = run(&["layout", "--expand", "1", "--expand", "2", "--json"]).expect("layout");
    let view: ChartView = serde_json::from_str(&output.stdout).expect("chart view");

    let slots: Vec<u64> = view.nodes.iter().map(|n| n.slot.get()).collect();
    assert_eq!(slots, vec![1, 2, 3, 4, 5]);
    assert_eq!(view.edges.len(), 4);
    assert_eq!(view.max_level, 2);
    assert!(output.stderr.is_empty());
}

#[test]
fn layout_past_ceiling_prints_notice_and_succeeds() {
    let output = run(&[
        "layout",
        "--max-generations",
        "2",
        "--expand",
        "1",
        "--expand",
        "2",
    ])
    .expect("layout");
    assert_eq!(
        output.stderr.trim(),
        "You have reached the limit of 2 generations."
    );
    assert!(output.stdout.starts_with("3 people, 2 links"));
}

#[test]
fn layout_of_unoccupied_slot_exits_two() {
    let err = run(&["layout", "--expand", "4"]).expect_err("slot 4 is empty");
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn replay_script_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = write(
        dir.path(),
        "script.json",
        r#"[
            {"action": "expand", "slot": 1},
            {"action": "edit", "slot": 2, "label": "  Pierre Curie "},
            {"action": "expand", "slot": 3}
        ]"#,
    );

    let output = run(&["replay", &script, "--json"]).expect("replay");
    let view: ChartView = serde_json::from_str(&output.stdout).expect("chart view");
    let pierre = view.node(Slot::new(2).expect("slot")).expect("slot 2");
    assert_eq!(pierre.label, "Pierre Curie");
    assert!(view.node(Slot::new(6).expect("slot")).is_some());
}

#[test]
fn replay_rejects_malformed_script() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = write(dir.path(), "script.json", r#"[{"action": "fly"}]"#);
    let err = run(&["replay", &script]).expect_err("unknown action");
    assert!(matches!(err, CliError::ParseFile { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn config_file_sets_root_label_and_spacing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write(
        dir.path(),
        "chart.json",
        r#"{"root_label": "Proband", "unit_width": 100.0}"#,
    );
    let output = run(&["layout", "--config", &config, "--expand", "1", "--json"]).expect("layout");
    let view: Value = serde_json::from_str(&output.stdout).expect("json");
    assert_eq!(view["nodes"][0]["label"], "Proband");
    assert_eq!(view["nodes"][1]["position"]["x"], -50.0);
}

#[test]
fn export_then_import_round_trip() {
    let exported = run(&[
        "export",
        "--tree-id",
        "t1",
        "--owner-id",
        "u1",
        "--expand",
        "1",
        "--expand",
        "3",
    ])
    .expect("export");
    let records: Vec<Individual> = serde_json::from_str(&exported.stdout).expect("records");
    assert_eq!(records.len(), 5);
    assert!(records.iter().all(|r| r.tree_id == "t1" && r.owner_id == "u1"));

    let dir = tempfile::tempdir().expect("tempdir");
    let path = write(dir.path(), "records.json", &exported.stdout);
    let imported = run(&["import", &path, "--root", "t1-1", "--json"]).expect("import");
    let value: Value = serde_json::from_str(&imported.stdout).expect("json");

    let slots: Vec<u64> = value["chart"]["nodes"]
        .as_array()
        .expect("nodes")
        .iter()
        .map(|n| n["slot"].as_u64().expect("slot"))
        .collect();
    assert_eq!(slots, vec![1, 2, 3, 6, 7]);
    assert_eq!(value["report"]["placeholders"], 0);
    assert_eq!(value["report"]["truncated"], 0);
    assert_eq!(value["chart"]["nodes"][3]["label"], "Parent 6");
}

#[test]
fn import_truncates_at_ceiling() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write(
        dir.path(),
        "records.json",
        r#"[
            {"id": "a", "treeId": "t", "firstName": "Ann", "parents": ["b", "c"]},
            {"id": "b", "treeId": "t", "firstName": "Bob", "parents": ["d"]},
            {"id": "c", "treeId": "t", "firstName": "Cat"},
            {"id": "d", "treeId": "t", "firstName": "Dan"}
        ]"#,
    );
    let output = run(&["import", &path, "--root", "a", "--max-generations", "2"]).expect("import");
    assert!(output.stdout.starts_with("3 people"));
    assert_eq!(
        output.stderr.trim(),
        "1 ancestor(s) beyond generation 2 were left out."
    );
}

#[test]
fn import_unknown_root_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write(dir.path(), "records.json", "[]");
    let err = run(&["import", &path, "--root", "ghost"]).expect_err("unknown root");
    assert!(matches!(err, CliError::Record(_)));
    assert_eq!(err.exit_code(), 1);
}
