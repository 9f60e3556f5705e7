//! In-game application state

use rand::rngs::StdRng;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::game::{
    Dictionary, GameOutcome, GameSession, LegalityResult, Phase, RejectReason, RuleConfiguration,
    TurnOwner,
};

/// Maximum length of a typed word
pub const MAX_INPUT_LEN: usize = 40;

/// Feedback line under the input
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Feedback {
    #[default]
    None,
    /// A word was played
    Played { by: TurnOwner, word: String },
    /// The last submission was refused
    Rejected(RejectReason),
    /// Anything else worth telling the player
    Notice(String),
}

/// State of the playing screen: the session plus input and pacing
pub struct App {
    pub session: GameSession,
    /// Current user input
    pub input: String,
    /// Feedback from the last submission or computer move
    pub feedback: Feedback,
    /// When the computer is due to answer
    opponent_due: Option<Instant>,
    opponent_delay: Duration,
    rng: StdRng,
}

impl App {
    /// Start a game right away
    pub fn new(
        rules: RuleConfiguration,
        dictionary: Dictionary,
        opponent_delay: Duration,
        rng: StdRng,
    ) -> Self {
        let mut session = GameSession::new();
        session.start(rules, dictionary);
        Self {
            session,
            input: String::new(),
            feedback: Feedback::Notice("Game started".to_string()),
            opponent_due: None,
            opponent_delay,
            rng,
        }
    }

    /// Whether typing is accepted right now
    pub fn accepts_input(&self) -> bool {
        self.session.phase() == Phase::InProgress && !self.session.opponent_pending()
    }

    /// Handle character input (locked outside the player's turn)
    pub fn on_char(&mut self, c: char) {
        if !self.accepts_input() || c.is_control() || self.input.chars().count() >= MAX_INPUT_LEN {
            return;
        }
        self.input.push(c);
    }

    /// Handle backspace
    pub fn on_backspace(&mut self) {
        if self.accepts_input() {
            self.input.pop();
        }
    }

    /// Handle word submission (Enter key)
    pub fn on_submit(&mut self, now: Instant) {
        if !self.accepts_input() {
            return;
        }
        let key = self.input.trim().to_lowercase();
        if key.is_empty() {
            return;
        }

        let mover = self.session.turn_owner();
        match self.session.submit_human_move(&key) {
            Ok(LegalityResult::Accepted(record)) => {
                self.feedback = Feedback::Played {
                    by: mover,
                    word: record.original.clone(),
                };
                if self.session.opponent_pending() {
                    self.opponent_due = Some(now + self.opponent_delay);
                }
            }
            Ok(LegalityResult::Rejected(reason)) => {
                self.feedback = Feedback::Rejected(reason);
            }
            Err(e) => {
                self.feedback = Feedback::Notice(e.to_string());
            }
        }
        self.input.clear();
    }

    /// Play the computer's move once its delay has passed
    pub fn tick(&mut self, now: Instant) {
        let Some(due) = self.opponent_due else {
            return;
        };
        if now < due {
            return;
        }
        self.opponent_due = None;

        match self.session.submit_opponent_move(&mut self.rng) {
            Ok(Some(record)) => {
                self.feedback = Feedback::Played {
                    by: TurnOwner::Opponent,
                    word: record.original.clone(),
                };
            }
            Ok(None) => {
                self.feedback = Feedback::Notice("Computer has no move".to_string());
            }
            Err(e) => debug!(error = %e, "dropped scheduled computer move"),
        }
    }

    /// Whether a computer move is scheduled
    pub fn opponent_scheduled(&self) -> bool {
        self.opponent_due.is_some()
    }

    /// End the game now (Finish Game). A scheduled computer move is dropped.
    pub fn finish(&mut self) {
        self.opponent_due = None;
        self.session.finish();
        self.input.clear();
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.session.outcome()
    }

    /// History joined for display
    pub fn history_line(&self) -> String {
        self.session.move_history().join(" → ")
    }
}
