#![allow(dead_code)]
//! Game session controller
//!
//! Owns the dictionary, rules and chain state of one game and runs the
//! turn state machine: `NotStarted -> InProgress -> Ended`. The human side
//! submits words through `submit_human_move`; the automated opponent moves
//! through `submit_opponent_move`, which the caller schedules after an
//! accepted human move.

use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use super::chain::{ChainState, Phase, TurnOwner};
use super::dictionary::{Dictionary, WordRecord};
use super::foresight::has_legal_move;
use super::opponent::select_move;
use super::rules::RuleConfiguration;
use super::validation::{evaluate, LegalityResult};

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The winner played a word nothing follows, with one-shot words allowed
    OneShot,
    /// The loser had no acceptable move left
    NoContinuation,
    /// The loser played a forbidden one-shot word because nothing else was left
    ForfeitedOneShot,
    /// The game was stopped before anyone won
    Finished,
}

/// Final result of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    /// `None` when the game was finished early
    pub winner: Option<TurnOwner>,
    pub reason: EndReason,
}

/// A move submitted at a time the session does not take it
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnError {
    #[error("game is not in progress")]
    NotInProgress,
    #[error("waiting for the computer to move")]
    OpponentToMove,
    #[error("it is not the computer's turn")]
    HumanToMove,
}

/// One game: dictionary, rules and chain state
#[derive(Debug, Default)]
pub struct GameSession {
    config: RuleConfiguration,
    dictionary: Dictionary,
    chain: ChainState,
    outcome: Option<GameOutcome>,
}

impl GameSession {
    /// Create a session that has not started yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset everything and start a new game with the given rules and words
    pub fn start(&mut self, config: RuleConfiguration, dictionary: Dictionary) {
        self.config = config.normalized();
        self.dictionary = dictionary;
        self.chain = ChainState::started();
        self.outcome = None;
        info!(
            words = self.dictionary.len(),
            forbid_one_shot = self.config.forbid_one_shot,
            opponent = self.config.opponent_enabled,
            "game started"
        );
    }

    /// Submit a word for the side at the keyboard.
    ///
    /// A rejection leaves the state untouched. When the opponent is enabled
    /// an accepted move hands the turn to it; call `submit_opponent_move`
    /// next.
    pub fn submit_human_move(&mut self, candidate: &str) -> Result<LegalityResult, TurnError> {
        if self.chain.phase() != Phase::InProgress {
            return Err(TurnError::NotInProgress);
        }
        if self.opponent_pending() {
            return Err(TurnError::OpponentToMove);
        }

        let result = evaluate(candidate, &self.dictionary, &self.chain, &self.config);
        match &result {
            LegalityResult::Accepted(record) => {
                let mover = self.chain.turn_owner();
                self.accept(record, mover);
            }
            LegalityResult::Rejected(reason) => {
                debug!(word = candidate, ?reason, "move rejected");
            }
        }
        Ok(result)
    }

    /// Let the automated opponent answer.
    ///
    /// Returns the word played, or `None` when the opponent had nothing to
    /// play and lost. After `finish()` this does nothing and returns
    /// `NotInProgress`, so a move scheduled earlier is dropped.
    pub fn submit_opponent_move<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Option<Arc<WordRecord>>, TurnError> {
        if self.chain.phase() != Phase::InProgress {
            return Err(TurnError::NotInProgress);
        }
        if !self.opponent_pending() {
            return Err(TurnError::HumanToMove);
        }

        let lost_reason = if self.config.forbid_one_shot {
            EndReason::NoContinuation
        } else {
            EndReason::OneShot
        };

        let Some(required) = self.chain.required_start_symbol() else {
            self.end(Some(TurnOwner::Human), lost_reason);
            return Ok(None);
        };

        let choice = select_move(
            required,
            &self.dictionary,
            self.chain.used_keys(),
            &self.config,
            rng,
        );
        let Some(choice) = choice else {
            self.end(Some(TurnOwner::Human), lost_reason);
            return Ok(None);
        };

        if choice.forced {
            self.chain.apply(&choice.record, &self.config);
            info!(word = %choice.record.original, "computer played a forced one-shot word");
            self.end(Some(TurnOwner::Human), EndReason::ForfeitedOneShot);
        } else {
            self.accept(&choice.record, TurnOwner::Opponent);
        }
        Ok(Some(choice.record))
    }

    /// Stop the game now. Any pending opponent move is discarded.
    pub fn finish(&mut self) {
        if self.chain.phase() == Phase::Ended {
            return;
        }
        self.end(None, EndReason::Finished);
    }

    /// True when the automated opponent is due to move
    pub fn opponent_pending(&self) -> bool {
        self.chain.phase() == Phase::InProgress
            && self.config.opponent_enabled
            && self.chain.turn_owner() == TurnOwner::Opponent
    }

    fn accept(&mut self, record: &WordRecord, mover: TurnOwner) {
        self.chain.apply(record, &self.config);
        info!(
            word = %record.original,
            mover = mover.label(),
            next = ?self.chain.required_start_symbol(),
            "move accepted"
        );

        // The opponent's own lack of moves is settled by select_move so its
        // policy can apply.
        let next_is_automated = self.opponent_pending();
        if self.config.forbid_one_shot && next_is_automated {
            return;
        }

        let stuck = match self.chain.required_start_symbol() {
            Some(symbol) => {
                !has_legal_move(symbol, &self.dictionary, self.chain.used_keys(), &self.config)
            }
            None => true,
        };
        if stuck {
            let reason = if self.config.forbid_one_shot {
                EndReason::NoContinuation
            } else {
                EndReason::OneShot
            };
            self.end(Some(mover), reason);
        }
    }

    fn end(&mut self, winner: Option<TurnOwner>, reason: EndReason) {
        self.chain.end();
        self.outcome = Some(GameOutcome { winner, reason });
        info!(
            winner = winner.map(|w| w.label()),
            ?reason,
            moves = self.chain.move_history().len(),
            "game ended"
        );
    }

    pub fn phase(&self) -> Phase {
        self.chain.phase()
    }

    pub fn turn_owner(&self) -> TurnOwner {
        self.chain.turn_owner()
    }

    pub fn move_history(&self) -> &[String] {
        self.chain.move_history()
    }

    pub fn required_start_symbol(&self) -> Option<char> {
        self.chain.required_start_symbol()
    }

    pub fn used_keys(&self) -> &HashSet<String> {
        self.chain.used_keys()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn config(&self) -> &RuleConfiguration {
        &self.config
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }
}
