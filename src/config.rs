//! Configuration file handling
//!
//! Rules and pacing are read from an optional TOML file, by default
//! `config.toml` in the OS config directory:
//! - Linux: `$XDG_CONFIG_HOME/wordchain/` or `~/.config/wordchain/`
//! - macOS: `~/Library/Application Support/wordchain/`
//!
//! ```toml
//! opponent_delay_ms = 300
//!
//! [rules]
//! forbid_one_shot = false
//! opponent_policy = "fall-back"
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::{Error, Result};
use crate::game::RuleConfiguration;

/// Default pause before the computer answers, in milliseconds
pub const DEFAULT_OPPONENT_DELAY_MS: u64 = 300;

const CONFIG_FILE: &str = "config.toml";

/// Everything read from the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub rules: RuleConfiguration,
    pub opponent_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rules: RuleConfiguration::default(),
            opponent_delay_ms: DEFAULT_OPPONENT_DELAY_MS,
        }
    }
}

impl AppConfig {
    /// Load the config.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// tried and a missing file yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Ok(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::file("read", path, e))?;
        let config: AppConfig = toml::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config.normalized())
    }

    /// The OS-standard location of the config file
    pub fn default_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "wordchain")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(Error::NoProjectDirectory("config"))
    }

    pub fn normalized(mut self) -> Self {
        self.rules = self.rules.normalized();
        self
    }

    pub fn opponent_delay(&self) -> Duration {
        Duration::from_millis(self.opponent_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ExhaustedPolicy;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.opponent_delay(), Duration::from_millis(300));
        assert!(config.rules.forbid_one_shot);
        assert!(config.rules.opponent_enabled);
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "opponent_delay_ms = 50\n\n[rules]\nforbid_one_shot = false\nopponent_policy = \"fall-back\"\n",
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.opponent_delay_ms, 50);
        assert!(!config.rules.forbid_one_shot);
        assert!(config.rules.include_platformer);
        assert_eq!(config.rules.opponent_policy, ExhaustedPolicy::FallBack);
    }

    #[test]
    fn test_file_is_normalized() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[rules]\nallow_digit_edged_words = false\nignore_trailing_digit = true\n",
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert!(!config.rules.ignore_trailing_digit);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = AppConfig::load(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(Error::File { .. })));
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "opponent_delay_ms = \"soon\"").unwrap();
        assert!(matches!(AppConfig::load(Some(&path)), Err(Error::Config { .. })));
    }
}
