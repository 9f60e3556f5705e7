//! Automated opponent move selection

use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;

use super::dictionary::{Dictionary, WordRecord};
use super::foresight::{is_dead_end, playable_candidates};
use super::rules::{ExhaustedPolicy, RuleConfiguration};

/// A move picked by the opponent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpponentMove {
    pub record: Arc<WordRecord>,
    /// Set when the word was played under `ExhaustedPolicy::FallBack`
    /// although it is a dead end
    pub forced: bool,
}

/// Pick a word starting with `required` uniformly at random.
///
/// With one-shot words forbidden only safe words are considered. If there
/// are none the policy decides between conceding (`None`) and falling back
/// to any unused word. `None` always means the opponent has lost.
pub fn select_move<R: Rng + ?Sized>(
    required: char,
    dictionary: &Dictionary,
    used: &HashSet<String>,
    config: &RuleConfiguration,
    rng: &mut R,
) -> Option<OpponentMove> {
    let candidates: Vec<&Arc<WordRecord>> =
        playable_candidates(required, dictionary, used, &[]).collect();

    if !config.forbid_one_shot {
        return candidates.choose(rng).map(|record| OpponentMove {
            record: Arc::clone(record),
            forced: false,
        });
    }

    let safe: Vec<&Arc<WordRecord>> = candidates
        .iter()
        .copied()
        .filter(|c| !is_dead_end(c, dictionary, used, config))
        .collect();

    if let Some(record) = safe.choose(rng) {
        return Some(OpponentMove {
            record: Arc::clone(record),
            forced: false,
        });
    }

    match config.opponent_policy {
        ExhaustedPolicy::Concede => None,
        ExhaustedPolicy::FallBack => candidates.choose(rng).map(|record| OpponentMove {
            record: Arc::clone(record),
            forced: true,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dict(words: &[&str]) -> Dictionary {
        Dictionary::from_records(words.iter().map(|w| WordRecord::from_cleaned(w).unwrap()))
    }

    fn rules(forbid_one_shot: bool, opponent_policy: ExhaustedPolicy) -> RuleConfiguration {
        RuleConfiguration {
            forbid_one_shot,
            opponent_policy,
            ..Default::default()
        }
    }

    #[test]
    fn test_no_candidates() {
        let d = dict(&["apple"]);
        let used = HashSet::new();
        let mut rng = StdRng::seed_from_u64(1);
        let config = rules(false, ExhaustedPolicy::Concede);
        assert_eq!(select_move('z', &d, &used, &config, &mut rng), None);
    }

    #[test]
    fn test_skips_used_words() {
        let d = dict(&["echo", "eagle"]);
        let used: HashSet<String> = ["echo".to_string()].into();
        let config = rules(false, ExhaustedPolicy::Concede);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let choice = select_move('e', &d, &used, &config, &mut rng).unwrap();
            assert_eq!(choice.record.key, "eagle");
            assert!(!choice.forced);
        }
    }

    #[test]
    fn test_prefers_safe_moves() {
        // "echo" -> o -> "orange"; "eel" -> l -> nothing
        let d = dict(&["echo", "eel", "orange", "ewe"]);
        let used = HashSet::new();
        let config = rules(true, ExhaustedPolicy::Concede);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let choice = select_move('e', &d, &used, &config, &mut rng).unwrap();
            assert_ne!(choice.record.key, "eel");
        }
    }

    #[test]
    fn test_concede_when_every_move_is_a_dead_end() {
        let d = dict(&["eel", "elk"]);
        let used = HashSet::new();
        let mut rng = StdRng::seed_from_u64(5);

        let concede = rules(true, ExhaustedPolicy::Concede);
        assert_eq!(select_move('e', &d, &used, &concede, &mut rng), None);

        let fall_back = rules(true, ExhaustedPolicy::FallBack);
        let choice = select_move('e', &d, &used, &fall_back, &mut rng).unwrap();
        assert!(choice.forced);
        assert!(["eel", "elk"].contains(&choice.record.key.as_str()));
    }

    #[test]
    fn test_seeded_selection_is_deterministic() {
        let d = dict(&["eagle", "echo", "eel", "elk", "ember", "emu"]);
        let used = HashSet::new();
        let config = rules(false, ExhaustedPolicy::Concede);

        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(
                select_move('e', &d, &used, &config, &mut rng1),
                select_move('e', &d, &used, &config, &mut rng2)
            );
        }
    }

    #[test]
    fn test_selection_covers_pool() {
        let d = dict(&["eagle", "echo", "elk"]);
        let used = HashSet::new();
        let config = rules(false, ExhaustedPolicy::Concede);
        let mut rng = StdRng::seed_from_u64(9);

        let seen: HashSet<String> = (0..200)
            .filter_map(|_| select_move('e', &d, &used, &config, &mut rng))
            .map(|m| m.record.key.clone())
            .collect();
        assert_eq!(seen.len(), 3);
    }
}
