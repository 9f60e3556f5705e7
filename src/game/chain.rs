//! Per-game chain state: used words, history, and whose turn it is

use std::collections::HashSet;

use super::dictionary::WordRecord;
use super::rules::{next_symbol, RuleConfiguration};

/// Which side moves next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOwner {
    Human,
    Opponent,
}

impl TurnOwner {
    pub fn other(self) -> Self {
        match self {
            TurnOwner::Human => TurnOwner::Opponent,
            TurnOwner::Opponent => TurnOwner::Human,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TurnOwner::Human => "Player",
            TurnOwner::Opponent => "Computer",
        }
    }
}

/// Lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    NotStarted,
    InProgress,
    Ended,
}

/// Mutable state of one game. Only the session writes to it.
#[derive(Debug, Clone)]
pub struct ChainState {
    used_keys: HashSet<String>,
    move_history: Vec<String>,
    required_start_symbol: Option<char>,
    turn_owner: TurnOwner,
    phase: Phase,
}

impl Default for ChainState {
    fn default() -> Self {
        Self {
            used_keys: HashSet::new(),
            move_history: Vec::new(),
            required_start_symbol: None,
            turn_owner: TurnOwner::Human,
            phase: Phase::NotStarted,
        }
    }
}

impl ChainState {
    /// Fresh state for a game that is starting now
    pub fn started() -> Self {
        Self {
            phase: Phase::InProgress,
            ..Self::default()
        }
    }

    /// Record an accepted move and hand the turn over.
    ///
    /// Ignored unless the game is in progress.
    pub fn apply(&mut self, record: &WordRecord, config: &RuleConfiguration) {
        if self.phase != Phase::InProgress {
            return;
        }
        self.used_keys.insert(record.key.clone());
        self.move_history.push(record.original.clone());
        self.required_start_symbol = next_symbol(record, config);
        self.turn_owner = self.turn_owner.other();
    }

    /// Freeze the state. Nothing changes it afterwards.
    pub fn end(&mut self) {
        self.phase = Phase::Ended;
    }

    pub fn used_keys(&self) -> &HashSet<String> {
        &self.used_keys
    }

    pub fn is_used(&self, key: &str) -> bool {
        self.used_keys.contains(key)
    }

    pub fn move_history(&self) -> &[String] {
        &self.move_history
    }

    /// `None` before the first move, or after a word with no continuation
    pub fn required_start_symbol(&self) -> Option<char> {
        self.required_start_symbol
    }

    pub fn turn_owner(&self) -> TurnOwner {
        self.turn_owner
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}
