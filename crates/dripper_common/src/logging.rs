//! Logging setup shared by every binary and test in the workspace.
//!
//! `RUST_LOG` is honoured; on top of it a `dripper=<level>` directive is
//! added so the application's own targets are visible at the configured
//! level. When a log directory is configured, output is mirrored to a
//! daily rolling file through a non-blocking writer.

use dripper_config::LoggingConfig;
use std::str::FromStr;
use tracing::{info, warn, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name prefix for rolling log files.
const LOG_FILE_PREFIX: &str = "dripper.log";

/// Initialize the tracing subscriber at INFO.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level, console only.
pub fn init_with_level(level: Level) {
    let result = tracing_subscriber::registry()
        .with(console_layer())
        .with(filter_for(level))
        .try_init();

    // try_init fails when a global subscriber is already set (tests, embedding)
    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Initialize logging from configuration.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the program. `None` means console-only logging. Fails when
/// the log directory cannot be created; no subscriber is installed then.
pub fn init_from_config(config: &LoggingConfig) -> Result<Option<WorkerGuard>, InitError> {
    let parsed = parse_level(&config.level);
    let level = parsed.unwrap_or(Level::INFO);

    let Some(directory) = config.directory.as_deref() else {
        init_with_level(level);
        warn_if_unknown(parsed, &config.level);
        return Ok(None);
    };

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(directory)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let result = tracing_subscriber::registry()
        .with(console_layer())
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .with(filter_for(level))
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {} (files in {})", level, directory);
    }
    warn_if_unknown(parsed, &config.level);
    Ok(Some(guard))
}

/// Parses a level name. `None` for values tracing does not know.
pub fn parse_level(value: &str) -> Option<Level> {
    Level::from_str(value.trim()).ok()
}

// Runs after the subscriber is installed so the warning is not lost.
fn warn_if_unknown(parsed: Option<Level>, raw: &str) {
    if parsed.is_none() {
        warn!("Unknown log level '{}', using INFO", raw);
    }
}

fn console_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
}

fn filter_for(level: Level) -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match format!("dripper={}", level).parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    tracing::error!("{}: {}", context, error);
}

/// Log a result, with different messages for success and error cases, and
/// hand it back unchanged.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => tracing::error!("{}: {}", error_context, e),
    }
    result
}
