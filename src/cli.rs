//! Command-line interface for wordchain.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::game::ExhaustedPolicy;

/// Word chain - each word starts where the last one ended
#[derive(Parser, Debug)]
#[command(name = "wordchain")]
#[command(about = "Word chain game against the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log file used while playing
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Directory of JSON dictionary partitions to use instead of the built-in lists
    #[arg(long, global = true)]
    pub db_dir: Option<PathBuf>,

    #[command(flatten)]
    pub rules: RuleOverrides,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play,

    /// Build JSON dictionary partitions from a raw word list
    BuildDb {
        /// Raw list, one entry per line
        raw: PathBuf,

        /// File name prefix, e.g. `classic` or `platformer`
        #[arg(short, long)]
        prefix: String,

        /// Output directory
        #[arg(short, long, default_value = "data/db")]
        out: PathBuf,
    },

    /// List dictionary entries that start or end with a keyword
    Search {
        keyword: String,

        /// Match the end of the word instead of the start
        #[arg(long)]
        suffix: bool,
    },

    /// List words that are dead ends before anything has been played
    DeadEnds,
}

/// Opponent behaviour when it has no safe move
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    Concede,
    FallBack,
}

impl From<PolicyArg> for ExhaustedPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Concede => ExhaustedPolicy::Concede,
            PolicyArg::FallBack => ExhaustedPolicy::FallBack,
        }
    }
}

/// Rule flags that override the config file
#[derive(Args, Debug, Default)]
pub struct RuleOverrides {
    /// Leave out the platformer word lists
    #[arg(long, global = true)]
    pub no_platformer: bool,

    /// Leave out words that start or end with a digit
    #[arg(long, global = true)]
    pub no_digits: bool,

    /// Chain on the last letter of words ending in a digit
    #[arg(long, global = true)]
    pub ignore_trailing_digit: bool,

    /// Allow words that leave the other side without a reply (they win)
    #[arg(long, global = true)]
    pub allow_one_shot: bool,

    /// Play both sides at the keyboard
    #[arg(long, global = true)]
    pub no_opponent: bool,

    #[arg(long, global = true, value_enum)]
    pub opponent_policy: Option<PolicyArg>,
}

impl RuleOverrides {
    /// Apply the flags that were given on top of the loaded config
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        let rules = &mut config.rules;
        if self.no_platformer {
            rules.include_platformer = false;
        }
        if self.no_digits {
            rules.allow_digit_edged_words = false;
        }
        if self.ignore_trailing_digit {
            rules.ignore_trailing_digit = true;
        }
        if self.allow_one_shot {
            rules.forbid_one_shot = false;
        }
        if self.no_opponent {
            rules.opponent_enabled = false;
        }
        if let Some(policy) = self.opponent_policy {
            rules.opponent_policy = policy.into();
        }
        config.normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_play() {
        let cli = Cli::try_parse_from(["wordchain"]).unwrap();
        assert!(cli.command.is_none());
        let config = cli.rules.apply(AppConfig::default());
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_rule_flags_override_config() {
        let cli = Cli::try_parse_from([
            "wordchain",
            "play",
            "--allow-one-shot",
            "--no-opponent",
            "--opponent-policy",
            "fall-back",
        ])
        .unwrap();
        let config = cli.rules.apply(AppConfig::default());
        assert!(!config.rules.forbid_one_shot);
        assert!(!config.rules.opponent_enabled);
        assert_eq!(config.rules.opponent_policy, ExhaustedPolicy::FallBack);
    }

    #[test]
    fn test_no_digits_clears_ignore_trailing() {
        let cli = Cli::try_parse_from(["wordchain", "--no-digits", "--ignore-trailing-digit"]).unwrap();
        let config = cli.rules.apply(AppConfig::default());
        assert!(!config.rules.allow_digit_edged_words);
        assert!(!config.rules.ignore_trailing_digit);
    }

    #[test]
    fn test_search_command() {
        let cli = Cli::try_parse_from(["wordchain", "search", "ber", "--suffix"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Search { ref keyword, suffix: true }) if keyword == "ber"
        ));
    }

    #[test]
    fn test_build_db_command() {
        let cli = Cli::try_parse_from(["wordchain", "build-db", "raw.txt", "-p", "classic"]).unwrap();
        match cli.command {
            Some(Command::BuildDb { raw, prefix, out }) => {
                assert_eq!(raw, PathBuf::from("raw.txt"));
                assert_eq!(prefix, "classic");
                assert_eq!(out, PathBuf::from("data/db"));
            }
            other => panic!("Expected BuildDb, got {:?}", other),
        }
    }
}
