//! Game logic: dictionary, rules, chain state, legality, foresight, opponent

pub mod chain;
pub mod dictionary;
pub mod foresight;
pub mod opponent;
pub mod rules;
pub mod session;
pub mod validation;

pub use chain::{Phase, TurnOwner};
pub use dictionary::{Dictionary, SearchMode};
pub use rules::{ExhaustedPolicy, RuleConfiguration};
pub use session::{EndReason, GameOutcome, GameSession};
pub use validation::{LegalityResult, RejectReason};
