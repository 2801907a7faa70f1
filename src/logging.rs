use color_eyre::{eyre::eyre, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "CATALOG_LOG";

/// Send tracing output to a file; the terminal belongs to the UI.
///
/// The returned guard flushes pending lines on drop and must outlive the app.
pub fn init(log_file: &Path, default_filter: Option<&str>) -> Result<WorkerGuard> {
  let dir = log_file
    .parent()
    .ok_or_else(|| eyre!("Invalid log file path: {}", log_file.display()))?;
  let file_name = log_file
    .file_name()
    .ok_or_else(|| eyre!("Invalid log file path: {}", log_file.display()))?;

  std::fs::create_dir_all(dir)
    .map_err(|e| eyre!("Failed to create log directory {}: {}", dir.display(), e))?;

  let appender = tracing_appender::rolling::never(dir, file_name);
  let (writer, guard) = tracing_appender::non_blocking(appender);

  let filter = EnvFilter::try_from_env(LOG_ENV)
    .or_else(|_| EnvFilter::try_new(default_filter.unwrap_or("info")))
    .map_err(|e| eyre!("Invalid log filter: {}", e))?;

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(writer)
    .with_ansi(false)
    .try_init()
    .map_err(|e| eyre!("Failed to initialize logging: {}", e))?;

  Ok(guard)
}
