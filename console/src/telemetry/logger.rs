//! Logging initialization

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{ConsoleConfig, DEFAULT_LOG_LEVEL};

pub const LOG_FILE_NAME: &str = "admin-console.log";

/// Keeps the non-blocking file writer flushing until dropped
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Initialize the logging system
///
/// Sets up:
/// - Compact stderr output (stdout is reserved for command results)
/// - Daily-rotated file log in `log_dir` when configured, optionally as JSON lines
/// - Panic hook that records the panic location before the default handler runs
///
/// Keep the returned guard alive for the lifetime of the program.
pub fn init(config: &ConsoleConfig, json: bool) -> LogGuard {
    let filter = || {
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_filter(filter());

    let (file_layer, guard) = match config.log_dir.as_deref().and_then(file_writer) {
        Some((writer, guard)) => {
            let layer = fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false); // No ANSI codes in log files
            let layer = if json { layer.json().boxed() } else { layer.boxed() };
            (Some(layer.with_filter(filter())), Some(guard))
        }
        None => (None, None),
    };

    let installed = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(
            log_level = %config.log_level,
            log_dir = ?config.log_dir,
            "Logging initialized"
        );
        setup_panic_hook();
    }

    LogGuard { _file: guard }
}

fn file_writer(dir: &Path) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    if let Err(e) = fs::create_dir_all(dir) {
        eprintln!("Warning: Failed to create log directory {}: {}", dir.display(), e);
        return None;
    }
    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
    Some(tracing_appender::non_blocking(appender))
}

/// Log panics with their location, then defer to the default handler
fn setup_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic message".to_string()
        };

        tracing::error!(location = %location, message = %message, "Console panic");

        default_panic(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_writer_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("logs").join("console");

        let writer = file_writer(&nested);
        assert!(writer.is_some());
        assert!(nested.is_dir());
    }
}
