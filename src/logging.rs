//! Logging initialization for the CLI.
//!
//! Diagnostics go to stderr so stdout stays clean for the report.
//! Verbose mode echoes each scanned commit (id and body lines) as debug
//! events; `RUST_LOG` overrides the verbosity-derived filter.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber. Safe to call more than once; a
/// second initialization is a no-op.
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "issuelog=debug"
    } else {
        "issuelog=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
