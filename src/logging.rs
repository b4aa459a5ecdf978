//! Logging initialization.
//!
//! TUI mode: logs to `<state>/logs/stepper-{datetime}.log`
//! CLI mode: logs to stderr

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Where log lines go for a given run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Timestamped file under the logs directory (TUI owns the terminal)
    File { dir: PathBuf, file_name: String },
    Stderr,
}

/// Result of logging initialization
pub struct LoggingHandle {
    /// Flushes buffered file output when dropped
    pub _guard: Option<WorkerGuard>,

    /// Path to the log file (only set in TUI mode with file logging enabled)
    pub log_file_path: Option<PathBuf>,
}

pub fn log_target(config: &Config, is_tui_mode: bool) -> LogTarget {
    if is_tui_mode && config.logging.to_file {
        let timestamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ");
        LogTarget::File {
            dir: config.logs_path(),
            file_name: format!("stepper-{}.log", timestamp),
        }
    } else {
        LogTarget::Stderr
    }
}

/// Filter directive: `--debug` beats the configured level. `RUST_LOG` beats both.
pub fn filter_directive(config: &Config, debug_override: bool) -> String {
    let level = if debug_override {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    std::env::var("RUST_LOG").unwrap_or(level)
}

/// Install the global subscriber. Keep the returned handle alive until exit.
pub fn init_logging(
    config: &Config,
    is_tui_mode: bool,
    debug_override: bool,
) -> Result<LoggingHandle> {
    let filter = tracing_subscriber::EnvFilter::new(filter_directive(config, debug_override));

    match log_target(config, is_tui_mode) {
        LogTarget::File { dir, file_name } => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let log_file_path = dir.join(&file_name);

            let file_appender = tracing_appender::rolling::never(&dir, &file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(non_blocking),
                )
                .init();

            Ok(LoggingHandle {
                _guard: Some(guard),
                log_file_path: Some(log_file_path),
            })
        }
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .init();

            Ok(LoggingHandle {
                _guard: None,
                log_file_path: None,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.paths.state = temp_dir.path().to_string_lossy().to_string();
        config
    }

    #[test]
    fn test_tui_mode_logs_to_file_under_state() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        match log_target(&config, true) {
            LogTarget::File { dir, file_name } => {
                assert!(dir.starts_with(temp_dir.path()));
                assert!(dir.ends_with("logs"));
                assert!(file_name.starts_with("stepper-"));
                assert!(file_name.ends_with(".log"));
            }
            LogTarget::Stderr => panic!("expected file target"),
        }
    }

    #[test]
    fn test_cli_mode_logs_to_stderr() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        assert_eq!(log_target(&config, false), LogTarget::Stderr);
    }

    #[test]
    fn test_tui_mode_with_file_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = test_config(&temp_dir);
        config.logging.to_file = false;
        assert_eq!(log_target(&config, true), LogTarget::Stderr);
    }

    #[test]
    fn test_debug_flag_overrides_level() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let mut config = Config::default();
        config.logging.level = "warn".to_string();
        assert_eq!(filter_directive(&config, false), "warn");
        assert_eq!(filter_directive(&config, true), "debug");
    }
}
