//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! The filter comes from the `GANTTSCAPE_LOG` environment variable (e.g.
//! `debug`, `ganttscape::layout=trace`) and defaults to `warn`. Logs go to
//! stderr so stdout carries only the chart.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "GANTTSCAPE_LOG";

/// Initialise the global logging subscriber. Call once at startup.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
