//! File logging via `tracing`.
//!
//! The terminal belongs to the UI, so events only ever go to a log file.
//! The filter comes from `$FSX_LOG` when set, otherwise from `[logging] level`.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::error::{AppError, Result};

/// Environment variable holding a filter directive (e.g. `fsx=debug`).
pub const LOG_FILTER_ENV: &str = "FSX_LOG";
/// Environment variable overriding the log file path.
pub const LOG_FILE_ENV: &str = "FSX_LOG_FILE";

/// Resolve the log file path with precedence: CLI, `$FSX_LOG_FILE`, config
/// file, platform default.
pub fn resolve_log_file_path(
    cli_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(p) = cli_file.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(p);
    }
    if let Ok(env_path) = std::env::var(LOG_FILE_ENV) {
        if !env_path.is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }
    if let Some(p) = config_file.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(p);
    }
    default_log_file_path()
}

fn default_log_file_path() -> Result<PathBuf> {
    let dir = dirs::data_local_dir().ok_or_else(|| {
        AppError::Config("Could not determine platform data directory for log file".to_string())
    })?;
    Ok(dir.join("fsx").join("fsx.log"))
}

/// Build the event filter: `$FSX_LOG` wins over the configured level.
fn build_env_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_FILTER_ENV) {
        return Ok(filter);
    }
    EnvFilter::try_new(level)
        .map_err(|e| AppError::Config(format!("Invalid log level `{}`: {}", level, e)))
}

/// Install the global subscriber writing to `log_file`.
pub fn init_logging(level: &str, log_file: &Path) -> Result<()> {
    let filter = build_env_filter(level)?;

    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::Config(format!("Failed to create log directory: {}", e))
        })?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| {
            AppError::Config(format!("Failed to open log file {:?}: {}", log_file, e))
        })?;

    Registry::default()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| AppError::Config(format!("Logging already initialized: {}", e)))
}
