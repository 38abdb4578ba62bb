//! Logging Infrastructure
//!
//! Structured logging for the cashier:
//! - console output, pretty in development and JSON in production
//! - optional daily rotating log files (`cashier.YYYY-MM-DD`)
//! - retention cleanup for rotated files

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, prelude::*};

/// File name prefix of rotated log files
pub const LOG_FILE_PREFIX: &str = "cashier";

/// Days a rotated log file is kept
pub const LOG_RETENTION_DAYS: i64 = 14;

/// Delete rotated log files older than `retention_days`
///
/// Returns the number of deleted files. Files that do not follow the
/// `cashier.YYYY-MM-DD` pattern are left alone. The appender stamps files
/// with the UTC date, so the cutoff is a UTC date too.
pub fn cleanup_old_logs(log_dir: &Path, retention_days: i64) -> anyhow::Result<usize> {
    let cutoff = chrono::Utc::now().date_naive() - chrono::Duration::days(retention_days);
    let prefix = format!("{LOG_FILE_PREFIX}.");

    if !log_dir.exists() {
        return Ok(0);
    }

    let mut deleted = 0;
    for entry in fs::read_dir(log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if let Some(date_part) = name.strip_prefix(&prefix)
            && let Ok(date) = chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            deleted += 1;
            tracing::info!(file = %name, "Deleted old log file");
        }
    }

    Ok(deleted)
}

/// `RUST_LOG` directives when present and valid, otherwise `level`
fn build_env_filter(level: &str, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level))
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug"); `RUST_LOG` wins when set
/// * `json_format` - JSON console output (production) instead of pretty text
/// * `log_dir` - Optional directory for daily rotating files
///
/// # Examples
/// ```no_run
/// # use cashier::utils::logger::init_logger_with_file;
/// // Development setup (console only)
/// init_logger_with_file("debug", false, None)?;
///
/// // Production setup (console + file)
/// init_logger_with_file("info", true, Some("./logs"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = build_env_filter(level, rust_log.as_deref());

    let file_appender = match log_dir {
        Some(dir) => {
            let dir = Path::new(dir);
            fs::create_dir_all(dir)?;
            if let Err(e) = cleanup_old_logs(dir, LOG_RETENTION_DAYS) {
                eprintln!("Failed to clean up old logs: {e}");
            }
            Some(RollingFileAppender::new(
                Rotation::DAILY,
                dir,
                LOG_FILE_PREFIX,
            ))
        }
        None => None,
    };

    // File output is always plain text without colors
    let file_layer = file_appender.map(|appender| {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(appender))
    });

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if json_format {
        let console_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr);

        subscriber.with(console_layer).try_init()?;
    } else {
        let console_layer = fmt::layer()
            .with_target(true)
            .with_file(false)
            .with_writer(std::io::stderr);

        subscriber.with(console_layer).try_init()?;
    }

    Ok(())
}
