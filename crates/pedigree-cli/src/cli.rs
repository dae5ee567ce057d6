use std::io::{self, Write};
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::chart::{run_export, run_import, run_layout, run_replay};
use crate::error::Result;

#[derive(Debug, Parser)]
#[command(
    name = "pedigree",
    about = "Build, replay, import and export ancestry charts",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// JSON chart configuration file.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of generations the chart may hold, root included.
    #[arg(long, global = true, value_name = "N")]
    pub max_generations: Option<u32>,

    /// Raise log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Seed a chart, expand slots in order, print it.
    Layout(LayoutArgs),

    /// Apply a recorded JSON action script to a fresh chart.
    Replay(ReplayArgs),

    /// Rebuild a chart from stored person records.
    Import(ImportArgs),

    /// Print a chart as person records.
    Export(ExportArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct LayoutArgs {
    /// Slot to expand; repeat to expand several in order.
    #[arg(long = "expand", value_name = "SLOT", allow_negative_numbers = true)]
    pub expand: Vec<i64>,

    /// Print the chart view as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ReplayArgs {
    /// JSON array of `{"action": "expand" | "edit", ...}` objects.
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Print the chart view as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ImportArgs {
    /// JSON array of person records.
    #[arg(value_name = "RECORDS")]
    pub records: PathBuf,

    /// Id of the record placed on slot 1.
    #[arg(long, value_name = "ID")]
    pub root: String,

    /// Print the chart view and import report as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Tree id stamped on every record and used as id prefix.
    #[arg(long, value_name = "ID")]
    pub tree_id: String,

    /// Owner id stamped on every record.
    #[arg(long, value_name = "ID", default_value = "")]
    pub owner_id: String,

    /// Slot to expand before exporting; repeatable.
    #[arg(long = "expand", value_name = "SLOT", allow_negative_numbers = true)]
    pub expand: Vec<i64>,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    crate::logging::init(cli.global.verbose);
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let stderr = io::stderr();
    execute(cli, &mut stdout.lock(), &mut stderr.lock())
}

/// Dispatch a parsed command. Results go to `out`, notices to `diag`.
pub fn execute(cli: Cli, out: &mut dyn Write, diag: &mut dyn Write) -> Result<()> {
    let config = crate::config::resolve(&cli.global)?;
    match cli.command {
        Commands::Layout(args) => run_layout(config, &args, out, diag),
        Commands::Replay(args) => run_replay(config, &args, out, diag),
        Commands::Import(args) => run_import(config, &args, out, diag),
        Commands::Export(args) => run_export(config, &args, out, diag),
    }
}
