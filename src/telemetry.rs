//! Logging initialization.

use tracing_subscriber::EnvFilter;

/// Install the process-wide tracing subscriber.
///
/// Logs go to stderr so they never interleave with the session on stdout.
/// `RUST_LOG` takes precedence over `verbose`. Safe to call more than once.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
