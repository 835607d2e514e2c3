//! Logging system initialization
//!
//! Sets up tracing-based logging with file output to
//! `<config dir>/ProximityMonitor/app.log` and rotation on application
//! startup keeping 9 historical files. Headless runs can log to stderr instead.

use crate::config::ConfigManager;
use crate::error::{ProximityError, Result, StringError};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

/// Maximum number of historical log files to keep (app.log.1 through app.log.9)
const MAX_LOG_FILES: u8 = 9;

/// Where log output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// `app.log` in the application directory, rotated on startup
    File,
    /// Standard error, with ANSI colors
    Stderr,
}

/// Initialize the logging system
///
/// Log level defaults to INFO but can be configured via `RUST_LOG` environment variable.
pub fn init_logging(target: LogTarget) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match target {
        LogTarget::File => {
            let log_dir = ConfigManager::ensure_config_dir()?;

            // Rotate existing log files on startup
            rotate_logs_on_startup(&log_dir.join("app.log"))?;

            // RollingFileAppender has no startup-based rotation, so rotation
            // is handled above and the appender never rotates by itself
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix("app")
                .filename_suffix("log")
                .build(&log_dir)
                .map_err(|e| ProximityError::ConfigError(Box::new(e)))?;

            let subscriber = fmt()
                .with_writer(file_appender)
                .with_env_filter(filter)
                .with_ansi(false) // Disable ANSI colors for file output
                .with_target(true) // Include target module
                .with_thread_ids(true) // Include thread IDs
                .with_file(true) // Include file names
                .with_line_number(true) // Include line numbers
                .finish();

            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| ProximityError::ConfigError(Box::new(e)))?;
        }
        LogTarget::Stderr => {
            let subscriber = fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .with_target(true)
                .finish();

            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| ProximityError::ConfigError(Box::new(e)))?;
        }
    }

    tracing::info!("proximity-monitor v{} started", env!("CARGO_PKG_VERSION"));

    Ok(())
}

/// Rotate log files on application startup
///
/// - app.log.9 is deleted (oldest log)
/// - app.log.8 -> app.log.9, ..., app.log.1 -> app.log.2
/// - app.log -> app.log.1
/// - A fresh app.log will be created by the logger
fn rotate_logs_on_startup(log_path: &Path) -> Result<()> {
    // If the current log doesn't exist, nothing to rotate
    if !log_path.exists() {
        return Ok(());
    }

    let log_dir = log_path
        .parent()
        .ok_or_else(|| ProximityError::ConfigError(StringError::new("Invalid log path")))?;

    let log_name = log_path
        .file_name()
        .ok_or_else(|| ProximityError::ConfigError(StringError::new("Invalid log filename")))?
        .to_string_lossy();

    let oldest_log = log_dir.join(format!("{log_name}.{MAX_LOG_FILES}"));
    if oldest_log.exists() {
        std::fs::remove_file(&oldest_log)?;
    }

    for i in (1..MAX_LOG_FILES).rev() {
        let current_log = log_dir.join(format!("{log_name}.{i}"));
        let next_log = log_dir.join(format!("{log_name}.{}", i + 1));

        if current_log.exists() {
            std::fs::rename(&current_log, &next_log)?;
        }
    }

    std::fs::rename(log_path, log_dir.join(format!("{log_name}.1")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_dir;
    use std::fs;

    #[test]
    fn test_rotate_logs_on_startup_basic() {
        let temp_dir = create_test_dir();
        let log_path = temp_dir.path().join("app.log");
        fs::write(&log_path, "Session 1 log content").unwrap();

        rotate_logs_on_startup(&log_path).unwrap();

        let log_1 = temp_dir.path().join("app.log.1");
        assert!(log_1.exists(), "app.log.1 should exist after rotation");
        assert!(
            !log_path.exists(),
            "app.log should not exist after rotation (will be created fresh by logger)"
        );
        assert_eq!(fs::read_to_string(&log_1).unwrap(), "Session 1 log content");
    }

    #[test]
    fn test_rotate_logs_on_startup_respects_max_files() {
        let temp_dir = create_test_dir();
        let log_path = temp_dir.path().join("app.log");

        for i in 1..=12 {
            fs::write(&log_path, format!("Session {i} log content")).unwrap();
            rotate_logs_on_startup(&log_path).unwrap();
        }

        for i in 1..=MAX_LOG_FILES {
            assert!(temp_dir.path().join(format!("app.log.{i}")).exists());
        }
        assert!(!temp_dir.path().join("app.log.10").exists());

        // Sessions 1-3 were dropped, session 4 is the oldest retained
        let oldest = fs::read_to_string(temp_dir.path().join("app.log.9")).unwrap();
        assert_eq!(oldest, "Session 4 log content");
        let newest = fs::read_to_string(temp_dir.path().join("app.log.1")).unwrap();
        assert_eq!(newest, "Session 12 log content");
    }

    #[test]
    fn test_rotate_logs_on_startup_no_existing_log() {
        let temp_dir = create_test_dir();
        let log_path = temp_dir.path().join("app.log");

        assert!(rotate_logs_on_startup(&log_path).is_ok());
        assert!(!temp_dir.path().join("app.log.1").exists());
    }

    #[test]
    fn test_rotate_logs_on_startup_partial_history() {
        let temp_dir = create_test_dir();
        let log_path = temp_dir.path().join("app.log");
        fs::write(&log_path, "Current session").unwrap();
        fs::write(temp_dir.path().join("app.log.1"), "Previous session").unwrap();
        fs::write(temp_dir.path().join("app.log.5"), "Very old session").unwrap();

        rotate_logs_on_startup(&log_path).unwrap();

        let read = |name: &str| fs::read_to_string(temp_dir.path().join(name)).unwrap();
        assert_eq!(read("app.log.1"), "Current session");
        assert_eq!(read("app.log.2"), "Previous session");
        assert_eq!(read("app.log.6"), "Very old session");
    }
}
