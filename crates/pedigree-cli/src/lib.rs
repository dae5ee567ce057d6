#![forbid(unsafe_code)]

pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;

pub use cli::{Cli, run, run_from_env};
pub use error::{CliError, Result};
