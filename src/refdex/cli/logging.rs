//! Logging setup for the binary.
//!
//! The library emits `tracing` events; only the CLI installs a subscriber.
//! Output goes to stderr so exported documents piped to stdout stay clean.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Maps the `-v` count to a level: warn, info, debug, then trace.
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the verbosity level.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "refdex={}",
            level_for_verbosity(verbosity).as_str().to_lowercase()
        ))
    });

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    // A subscriber may already be set (tests); keep it.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
