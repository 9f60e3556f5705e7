#![allow(dead_code)]
//! Move legality for a chain game
//!
//! Validates a submitted word against, in order:
//! - The start symbol required by the previous word
//! - Dictionary presence
//! - Reuse of an already played word
//! - The one-shot rule, when it is active

use std::sync::Arc;

use super::chain::ChainState;
use super::dictionary::{Dictionary, WordRecord};
use super::foresight::is_dead_end;
use super::rules::RuleConfiguration;

/// Why a submitted word was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Word does not start with the required symbol
    WrongStartSymbol { expected: char },
    /// Word not found in dictionary
    NotInDictionary,
    /// Word was already played this game
    AlreadyUsed,
    /// Word would leave the other side without a reply
    ForbiddenOneShot,
}

impl RejectReason {
    /// Returns a user-friendly error message
    pub fn message(&self) -> String {
        match self {
            RejectReason::WrongStartSymbol { expected } => format!("Must start with '{}'", expected),
            RejectReason::NotInDictionary => "Not in database".to_string(),
            RejectReason::AlreadyUsed => "Already used".to_string(),
            RejectReason::ForbiddenOneShot => "One-shot word is disallowed".to_string(),
        }
    }
}

/// Result of evaluating a word
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegalityResult {
    /// Word may be played now
    Accepted(Arc<WordRecord>),
    Rejected(RejectReason),
}

impl LegalityResult {
    /// Returns true if the word was accepted
    pub fn is_accepted(&self) -> bool {
        matches!(self, LegalityResult::Accepted(_))
    }
}

/// Decide whether `candidate` may be played right now.
///
/// `candidate` is expected to be trimmed and lowercased already. The start
/// symbol is checked on the raw input before the dictionary lookup so a
/// misspelled word still gets the more specific message.
pub fn evaluate(
    candidate: &str,
    dictionary: &Dictionary,
    chain: &ChainState,
    config: &RuleConfiguration,
) -> LegalityResult {
    if let Some(expected) = chain.required_start_symbol() {
        if candidate.chars().next() != Some(expected) {
            return LegalityResult::Rejected(RejectReason::WrongStartSymbol { expected });
        }
    }

    let Some(record) = dictionary.get(candidate) else {
        return LegalityResult::Rejected(RejectReason::NotInDictionary);
    };

    if chain.is_used(&record.key) {
        return LegalityResult::Rejected(RejectReason::AlreadyUsed);
    }

    if config.forbid_one_shot && is_dead_end(record, dictionary, chain.used_keys(), config) {
        return LegalityResult::Rejected(RejectReason::ForbiddenOneShot);
    }

    LegalityResult::Accepted(Arc::clone(record))
}
