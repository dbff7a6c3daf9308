//! Logging setup: one tracing_subscriber fmt layer teed to stdout and an append-mode log file.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::format::FmtSpan, fmt::writer::MakeWriterExt, layer::SubscriberExt,
    util::SubscriberInitExt, EnvFilter, Registry,
};

/// Initializes the global tracing subscriber.
///
/// Level comes from `RUST_LOG` (default `info`); load the env file before calling this.
/// The log file's parent directory is created when missing.
pub fn init_tracing(log_file_path: &str) -> anyhow::Result<()> {
    if let Some(dir) = Path::new(log_file_path).parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    let file = Arc::new(file);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let writer = io::stdout.and(file);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_thread_ids(true)
        .with_level(true)
        .with_file(false)
        .with_line_number(false);

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_creates_log_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("chat.log");

        init_tracing(path.to_str().unwrap()).unwrap();
        tracing::info!("hello from test");

        assert!(path.exists());
        assert!(init_tracing(path.to_str().unwrap()).is_err(), "global subscriber is set once");
    }
}
