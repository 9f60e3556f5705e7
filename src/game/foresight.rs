//! One-shot (dead end) detection
//!
//! A word is a dead end when playing it leaves the next mover without an
//! acceptable reply. With one-shot words allowed any unused matching word
//! is a reply. With one-shot words forbidden the reply must itself have at
//! least one continuation, which makes this a two-ply check. The nested
//! check is always one-ply so the search stops there.

use std::collections::HashSet;
use std::sync::Arc;

use super::dictionary::{Dictionary, WordRecord};
use super::rules::{next_symbol, RuleConfiguration};

/// Unused words starting with `symbol`, skipping the keys in `held`.
///
/// `held` holds words that are hypothetically played during a lookahead.
pub fn playable_candidates<'a>(
    symbol: char,
    dictionary: &'a Dictionary,
    used: &'a HashSet<String>,
    held: &'a [&'a str],
) -> impl Iterator<Item = &'a Arc<WordRecord>> + 'a {
    dictionary
        .starting_with(symbol)
        .iter()
        .filter(move |r| !used.contains(&r.key) && !held.contains(&r.key.as_str()))
}

/// One-ply test: once `held` is played, does anything follow `record`?
fn has_continuation(
    record: &WordRecord,
    dictionary: &Dictionary,
    used: &HashSet<String>,
    held: &[&str],
    config: &RuleConfiguration,
) -> bool {
    match next_symbol(record, config) {
        Some(next) => playable_candidates(next, dictionary, used, held)
            .next()
            .is_some(),
        None => false,
    }
}

/// Whether playing `record` now would leave the next mover with no
/// acceptable continuation under the active rules.
pub fn is_dead_end(
    record: &WordRecord,
    dictionary: &Dictionary,
    used: &HashSet<String>,
    config: &RuleConfiguration,
) -> bool {
    let held = [record.key.as_str()];
    if !config.forbid_one_shot {
        return !has_continuation(record, dictionary, used, &held, config);
    }

    let Some(next) = next_symbol(record, config) else {
        return true;
    };
    // The nested check holds only the reply: the word under evaluation may
    // come back as the continuation.
    let safe_reply = playable_candidates(next, dictionary, used, &held).any(|reply| {
        let nested = [reply.key.as_str()];
        has_continuation(reply, dictionary, used, &nested, config)
    });
    !safe_reply
}

/// Whether the mover facing `symbol` has any move the legality check accepts
pub fn has_legal_move(
    symbol: char,
    dictionary: &Dictionary,
    used: &HashSet<String>,
    config: &RuleConfiguration,
) -> bool {
    playable_candidates(symbol, dictionary, used, &[])
        .any(|c| !config.forbid_one_shot || !is_dead_end(c, dictionary, used, config))
}

/// Every word that is a dead end before any word has been played, sorted
/// by key so case does not affect the order.
pub fn dead_end_words<'a>(dictionary: &'a Dictionary, config: &RuleConfiguration) -> Vec<&'a str> {
    let used = HashSet::new();
    let mut records: Vec<&Arc<WordRecord>> = dictionary
        .iter()
        .filter(|r| is_dead_end(r, dictionary, &used, config))
        .collect();
    records.sort_unstable_by(|a, b| a.key.cmp(&b.key));
    records.into_iter().map(|r| r.original.as_str()).collect()
}
