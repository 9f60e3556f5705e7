//! Error types for everything around the rule engine
//!
//! The rule engine itself never fails: illegal moves come back as
//! structured rejections. These errors cover file I/O, parsing and
//! terminal setup.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the wordchain crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("failed to {operation} '{}': {source}", path.display())]
    File {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("malformed dictionary partition '{}': {source}", path.display())]
    Partition {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid config file '{}': {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("could not determine the {0} directory")]
    NoProjectDirectory(&'static str),

    #[error("logging already initialised: {0}")]
    Logging(String),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap an I/O error with the file operation and path it came from
    pub fn file(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::File {
            operation,
            path: path.into(),
            source,
        }
    }
}
