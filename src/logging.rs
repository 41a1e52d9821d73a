//! Tracing setup.
//!
//! Logs go to stdout through the fmt layer, filtered by `RUST_LOG`
//! (default `info`). Tests can install [`capture::LogCaptureLayer`] to
//! assert on what a handler logged.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .init();
}

/// Route panics through tracing so they show up next to the rest of the log
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("Unhandled panic: {}", info);
    }));
}
