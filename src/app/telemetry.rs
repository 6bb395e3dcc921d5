use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset; keeps the menu output readable
pub const DEFAULT_FILTER: &str = "warn";

/// Initialize tracing for the process.
///
/// Logs go to stderr so they never interleave with menu output on stdout.
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
