//! Structured logging setup for the command-line tool.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable that overrides the computed filter.
pub const LOG_ENV: &str = "SOLVEKIT_LOG";

/// Picks the filter directive from the CLI flags.
fn directive(verbose: bool, log_level: Option<&str>) -> String {
    match (verbose, log_level) {
        (_, Some(level)) if level.contains('=') => level.to_string(),
        (_, Some(level)) => format!("solvekit={level}"),
        (true, None) => "solvekit=debug".to_string(),
        (false, None) => "solvekit=warn".to_string(),
    }
}

/// Installs a stderr subscriber. Events are compact text, or JSON lines
/// with span open/close events when `log_json` is set.
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(directive(verbose, log_level)));

    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_span_events(fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}
