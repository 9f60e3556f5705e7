//! Tracing setup
//!
//! The terminal UI owns stdout, so while playing logs go to a file. The
//! one-shot commands log to stderr. `RUST_LOG` overrides the level.

use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

const LOG_FILE: &str = "wordchain.log";

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Default log file location in the OS data directory
pub fn default_log_path() -> Result<PathBuf> {
    ProjectDirs::from("", "", "wordchain")
        .map(|dirs| dirs.data_dir().join(LOG_FILE))
        .ok_or(Error::NoProjectDirectory("data"))
}

/// Send logs to a file, creating its directory if needed
pub fn init_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::file("create", parent, e))?;
    }
    let log_file = std::fs::File::create(path).map_err(|e| Error::file("create", path, e))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}

/// Send warnings and errors to stderr
pub fn init_stderr() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter("warn"))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}
