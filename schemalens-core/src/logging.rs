//! Shared logging setup for SchemaLens binaries.
//!
//! Installs a `tracing-subscriber` fmt subscriber. `RUST_LOG`, when set,
//! takes precedence over the verbosity flags.

use tracing_subscriber::EnvFilter;

use crate::error::{Result, SchemaLensError};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Maps command-line verbosity to a maximum level.
///
/// `quiet` wins over any verbosity; otherwise 0 is INFO, 1 is DEBUG and
/// anything higher is TRACE.
pub fn level_for(verbose: u8, quiet: bool) -> tracing::Level {
    match (quiet, verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::INFO,
        (false, 1) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    }
}

/// Initializes logging for the process.
///
/// # Errors
/// Returns a configuration error if `RUST_LOG` cannot be parsed or a global
/// subscriber is already installed.
///
/// # Example
/// ```rust,no_run
/// use schemalens_core::logging::{LogFormat, init_logging};
///
/// init_logging(1, false, LogFormat::Text).expect("Failed to initialize logging");
/// ```
pub fn init_logging(verbose: u8, quiet: bool, format: LogFormat) -> Result<()> {
    let level = level_for(verbose, quiet);
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env()
        .map_err(|e| SchemaLensError::configuration(format!("Invalid RUST_LOG filter: {}", e)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| {
        SchemaLensError::configuration(format!("Failed to initialize logging: {}", e))
    })
}
