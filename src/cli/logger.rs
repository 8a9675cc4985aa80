//! Log setup for the command-line tool.
//!
//! Logs go to stderr so command output on stdout stays pipeable.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither flags nor `RUST_LOG` say otherwise.
const DEFAULT_FILTER: &str = "notegraph=info";

/// Chooses the log filter for the given flags.
///
/// `-v` enables debug, `-vv` trace and `-q` errors only. Without flags the
/// `RUST_LOG` environment variable is honored.
pub fn log_filter(verbose: u8, quiet: bool) -> EnvFilter {
    match (verbose, quiet) {
        (0, true) => EnvFilter::new("notegraph=error"),
        (0, false) => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        }
        (1, _) => EnvFilter::new("notegraph=debug"),
        _ => EnvFilter::new("notegraph=trace"),
    }
}

/// Installs the global subscriber. Call once, before any logging.
pub fn init_logger(verbose: u8, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(log_filter(verbose, quiet))
        .with(fmt_layer)
        .try_init();
}
