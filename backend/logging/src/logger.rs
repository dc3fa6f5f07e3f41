//! Structured Logger
//!
//! Wraps `tracing` with a console layer on stderr (stdout carries OCR text),
//! an optional daily-rolling NDJSON file layer, and environment-based level
//! control.

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file prefix inside the log directory: `snaptext.YYYY-MM-DD.log`.
const LOG_FILE_PREFIX: &str = "snaptext";

/// Initialize the global structured logger.
///
/// `RUST_LOG` wins over `level`. With `log_dir` set, JSON lines are also
/// written to a daily-rotated file there.
pub fn init_logger(level: &str, log_dir: Option<&Path>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let file_layer = match log_dir {
        Some(dir) => {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(LOG_FILE_PREFIX)
                .filename_suffix("log")
                .build(dir)
                .with_context(|| format!("Failed to open log directory: {}", dir.display()))?;
            Some(fmt::layer().json().with_writer(appender).with_ansi(false))
        }
        None => None,
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    Ok(())
}
