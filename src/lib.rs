pub mod app;
pub mod config;
pub mod database;
pub mod email_client;
mod error;
pub mod notifier;
pub mod templ_manager;
pub mod web;

// re-export
pub use app::{serve, App, AppState};
pub use email_client::EmailClient;
pub use error::{Error, Result};

use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Tracing setup used in debug builds and tests.
/// Compact output without timestamps, `RUST_LOG` falls back to `debug`.
pub fn init_dbg_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(filter)
        .compact()
        .init();
}

/// Tracing setup used in release builds, `RUST_LOG` falls back to `info`.
pub fn init_production_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_target(true)
        .with_env_filter(filter)
        .init();
}
