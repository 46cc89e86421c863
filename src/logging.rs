use std::fs;
use std::io;
use std::path::Path;

use time::macros::format_description;
use time::UtcOffset;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{self, fmt, prelude::*};

/// Initialize logging to stderr and, optionally, to a file.
///
/// Returns the file writer's guard, which must be kept alive for the duration
/// of the program so buffered lines are flushed.
///
/// # Arguments
/// * `no_color` - Disable ANSI colors in stderr output
/// * `log_level` - Override log level (otherwise uses RUST_LOG or defaults to "info")
/// * `log_file` - Append DEBUG-level logs to this file
pub fn init_logger(no_color: bool, log_level: Option<&str>, log_file: Option<&Path>) -> io::Result<Option<WorkerGuard>> {
    let timer = fmt::time::OffsetTime::new(
        UtcOffset::UTC,
        format_description!("[[[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z]"),
    );

    let stderr_filter = match log_level {
        Some(level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    };

    // stdout carries rewritten output, so logs go to stderr
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(timer.clone())
        .with_ansi(!no_color)
        .with_filter(stderr_filter);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_timer(timer)
                .with_ansi(false)
                .with_filter(tracing_subscriber::EnvFilter::new("debug"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let result = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    match result {
        Ok(()) => Ok(guard),
        Err(e) => {
            // Ignore errors due to the subscriber or logger already being set
            if e.to_string().contains("already been set") || e.to_string().contains("SetLoggerError") {
                Ok(guard)
            } else {
                Err(io::Error::new(io::ErrorKind::Other, e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_twice_is_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rewrite.log");
        let first = init_logger(true, Some("debug"), Some(path.as_path()));
        assert!(first.is_ok());
        let second = init_logger(true, None, None);
        assert!(second.is_ok());
        assert!(path.exists());
    }
}
