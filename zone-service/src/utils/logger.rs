//! Logging Infrastructure
//!
//! Structured logging setup for embedding applications and local tooling.

use std::path::Path;
use tracing_subscriber::EnvFilter;

use crate::core::Config;

/// Initialize the logger at `info`
pub fn init_logger() {
    init_logger_with_file(None, None, None);
}

/// Initialize the logger from a loaded [`Config`]
pub fn init_logger_from_config(config: &Config) {
    init_logger_with_file(
        Some(&config.log_level),
        Some(config.log_json),
        config.log_dir.as_deref(),
    );
}

/// Initialize the logger with optional JSON output and file output
///
/// `RUST_LOG` wins over `log_level` when set. Calling this twice is harmless:
/// the second global subscriber install is ignored.
pub fn init_logger_with_file(log_level: Option<&str>, json: Option<bool>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("zone_service={level},sqlx=warn")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    // Add file output if log_dir is provided
    let mut missing_dir = None;
    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "zone-service");
            let builder = builder.with_writer(file_appender).with_ansi(false);
            let _ = if json.unwrap_or(false) {
                builder.json().try_init()
            } else {
                builder.try_init()
            };
            return;
        }
        missing_dir = Some(dir);
    }

    let _ = if json.unwrap_or(false) {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    // Only reported once the stdout subscriber is in place
    if let Some(dir) = missing_dir {
        tracing::warn!(log_dir = %dir, "Log directory does not exist, logging to stdout");
    }
}
