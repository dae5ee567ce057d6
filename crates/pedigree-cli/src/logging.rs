//! Subscriber setup for the binary.
//!
//! Logs go to stderr so `--json` output on stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

/// Env var holding an `EnvFilter` directive, e.g. `pedigree_tree=debug`.
pub const ENV_LOG: &str = "PEDIGREE_LOG";

/// Filter directive for a verbosity count and an optional `PEDIGREE_LOG`.
///
/// Explicit `-v` flags win over the environment.
#[must_use]
pub fn directive(verbose: u8, env: Option<&str>) -> String {
    match (verbose, env.map(str::trim)) {
        (0, Some(from_env)) if !from_env.is_empty() => from_env.to_owned(),
        (0, _) => "warn".to_owned(),
        (1, _) => "info".to_owned(),
        _ => "debug".to_owned(),
    }
}

/// Install the global fmt subscriber. A second call is a no-op.
pub fn init(verbose: u8) {
    let env = std::env::var(ENV_LOG).ok();
    let filter = EnvFilter::try_new(directive(verbose, env.as_deref()))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
