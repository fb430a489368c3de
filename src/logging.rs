use tracing_subscriber::EnvFilter;

/// Installs the global subscriber; `RUST_LOG` takes precedence over the verbosity flag.
///
/// Logs go to stderr so that stdout only carries the report.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // a subscriber may already be installed, e.g. when called repeatedly from tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
