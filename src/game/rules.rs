//! Rule toggles resolved once per game, and the next-symbol rule

use serde::{Deserialize, Serialize};

use super::dictionary::WordRecord;

/// What the opponent does when every candidate would be a dead end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExhaustedPolicy {
    /// Give up immediately; the human wins
    #[default]
    Concede,
    /// Play a dead-end word anyway and take the loss that follows
    FallBack,
}

/// Game rules. Immutable once a game has started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfiguration {
    /// Include the platformer word lists next to the classic ones
    pub include_platformer: bool,
    /// Include words that start or end with a digit
    pub allow_digit_edged_words: bool,
    /// Chain on the last letter instead of a trailing digit
    pub ignore_trailing_digit: bool,
    /// Reject moves that leave the other side without a reply
    pub forbid_one_shot: bool,
    /// An automated opponent answers every human move
    pub opponent_enabled: bool,
    pub opponent_policy: ExhaustedPolicy,
}

impl Default for RuleConfiguration {
    fn default() -> Self {
        Self {
            include_platformer: true,
            allow_digit_edged_words: true,
            ignore_trailing_digit: false,
            forbid_one_shot: true,
            opponent_enabled: true,
            opponent_policy: ExhaustedPolicy::Concede,
        }
    }
}

impl RuleConfiguration {
    /// Apply the dependency between toggles: ignoring a trailing digit only
    /// makes sense when digit-edged words are in play.
    pub fn normalized(mut self) -> Self {
        if !self.allow_digit_edged_words {
            self.ignore_trailing_digit = false;
        }
        self
    }
}

/// The symbol the word after `record` has to start with.
///
/// `None` means the chain cannot continue at all: either a digit-ending word
/// without any letter under the ignore-trailing-digit rule, or a record with
/// no last symbol.
pub fn next_symbol(record: &WordRecord, config: &RuleConfiguration) -> Option<char> {
    if config.allow_digit_edged_words && config.ignore_trailing_digit && record.ends_with_digit {
        record.last_alpha_symbol
    } else {
        record.last_symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit_word() -> WordRecord {
        // lastSymbol "5", lastAlphaSymbol "k"
        WordRecord::from_cleaned("Park 5").unwrap()
    }

    #[test]
    fn test_next_symbol_ignores_trailing_digit() {
        let config = RuleConfiguration {
            allow_digit_edged_words: true,
            ignore_trailing_digit: true,
            ..Default::default()
        };
        assert_eq!(next_symbol(&digit_word(), &config), Some('k'));
    }

    #[test]
    fn test_next_symbol_keeps_digit_when_either_flag_off() {
        let ignore_off = RuleConfiguration {
            allow_digit_edged_words: true,
            ignore_trailing_digit: false,
            ..Default::default()
        };
        let digits_off = RuleConfiguration {
            allow_digit_edged_words: false,
            ignore_trailing_digit: true,
            ..Default::default()
        };
        assert_eq!(next_symbol(&digit_word(), &ignore_off), Some('5'));
        assert_eq!(next_symbol(&digit_word(), &digits_off), Some('5'));
    }

    #[test]
    fn test_next_symbol_without_letters_is_none() {
        let config = RuleConfiguration {
            allow_digit_edged_words: true,
            ignore_trailing_digit: true,
            ..Default::default()
        };
        let record = WordRecord::from_cleaned("1 2 3").unwrap();
        assert_eq!(next_symbol(&record, &config), None);
    }

    #[test]
    fn test_plain_word_uses_last_symbol() {
        let config = RuleConfiguration {
            ignore_trailing_digit: true,
            ..Default::default()
        };
        let record = WordRecord::from_cleaned("Apple").unwrap();
        assert_eq!(next_symbol(&record, &config), Some('e'));
    }

    #[test]
    fn test_normalized_clears_ignore_trailing() {
        let config = RuleConfiguration {
            allow_digit_edged_words: false,
            ignore_trailing_digit: true,
            ..Default::default()
        }
        .normalized();
        assert!(!config.ignore_trailing_digit);

        let kept = RuleConfiguration {
            allow_digit_edged_words: true,
            ignore_trailing_digit: true,
            ..Default::default()
        }
        .normalized();
        assert!(kept.ignore_trailing_digit);
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: RuleConfiguration =
            serde_json::from_str(r#"{"forbid_one_shot": false, "opponent_policy": "fall-back"}"#)
                .unwrap();
        assert!(!config.forbid_one_shot);
        assert!(config.opponent_enabled);
        assert_eq!(config.opponent_policy, ExhaustedPolicy::FallBack);
    }
}
