//! Chart configuration as the command line assembles it.
//!
//! Precedence, lowest first: built-in defaults, the `--config` JSON file,
//! `PEDIGREE_*` environment variables, then explicit flags.

use std::fs;
use std::path::Path;

use pedigree::{ChartConfig, MAX_GENERATIONS_LIMIT};

use crate::cli::GlobalArgs;
use crate::error::{CliError, Result};

/// Resolve the configuration against the process environment.
pub fn resolve(args: &GlobalArgs) -> Result<ChartConfig> {
    resolve_with(args, |key| std::env::var(key).ok())
}

/// Resolve the configuration against a custom environment lookup.
pub fn resolve_with<F>(args: &GlobalArgs, get_env: F) -> Result<ChartConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let base = match &args.config {
        Some(path) => read_config_file(path)?,
        None => ChartConfig::default(),
    };
    let mut config = base.overlay_env_with(get_env);
    if let Some(max_generations) = args.max_generations {
        if !(1..=MAX_GENERATIONS_LIMIT).contains(&max_generations) {
            return Err(CliError::invalid(format!(
                "--max-generations must be between 1 and {MAX_GENERATIONS_LIMIT}"
            )));
        }
        config = config.with_max_generations(max_generations);
    }
    Ok(config.validated())
}

fn read_config_file(path: &Path) -> Result<ChartConfig> {
    let text = fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    ChartConfig::from_json_str(&text).map_err(|source| CliError::ParseFile {
        path: path.to_path_buf(),
        source,
    })
}
