#![allow(dead_code)]
//! Dictionary module for word lookup and chain indexing
//!
//! Embeds the classic and platformer word lists at build time and turns
//! them into indexed word records on first use. External dictionaries can
//! be loaded from JSON partition files with the same record shape.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

use super::rules::RuleConfiguration;
use crate::error::{Error, Result};

/// Embedded raw lists, one entry per line
static CLASSIC_RAW: &str = include_str!("../../data/raw/classic.txt");
static PLATFORMER_RAW: &str = include_str!("../../data/raw/platformer.txt");

/// Records for every embedded partition, built once
static EMBEDDED: Lazy<HashMap<Partition, Vec<WordRecord>>> = Lazy::new(|| {
    let classic = build_partitions(CLASSIC_RAW);
    let platformer = build_partitions(PLATFORMER_RAW);
    debug!(
        classic_plain = classic.no_digit_edge.len(),
        classic_digit = classic.digit_edge.len(),
        platformer_plain = platformer.no_digit_edge.len(),
        platformer_digit = platformer.digit_edge.len(),
        "built embedded dictionary partitions"
    );
    HashMap::from([
        (Partition::ClassicNoDigit, classic.no_digit_edge),
        (Partition::ClassicDigit, classic.digit_edge),
        (Partition::PlatformerNoDigit, platformer.no_digit_edge),
        (Partition::PlatformerDigit, platformer.digit_edge),
    ])
});

/// A single playable word. Never mutated after it is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRecord {
    /// Display spelling
    pub original: String,
    /// Lowercased spelling used for equality and lookup
    pub key: String,
    pub first_symbol: char,
    /// `None` only for a malformed external record; such a word is a dead end
    pub last_symbol: Option<char>,
    /// Last letter of the key, skipping trailing digits and spaces
    pub last_alpha_symbol: Option<char>,
    pub starts_with_digit: bool,
    pub ends_with_digit: bool,
}

impl WordRecord {
    /// Build a record from an already cleaned spelling.
    /// Returns `None` for an empty string.
    pub fn from_cleaned(original: &str) -> Option<Self> {
        let key = original.to_lowercase();
        let first_symbol = key.chars().next()?;
        let last_symbol = key.chars().next_back()?;

        Some(Self {
            original: original.to_string(),
            last_alpha_symbol: last_alpha(&key),
            starts_with_digit: first_symbol.is_ascii_digit(),
            ends_with_digit: last_symbol.is_ascii_digit(),
            key,
            first_symbol,
            last_symbol: Some(last_symbol),
        })
    }

    /// True if either edge of the word is a digit
    pub fn has_digit_edge(&self) -> bool {
        self.starts_with_digit || self.ends_with_digit
    }
}

fn last_alpha(key: &str) -> Option<char> {
    key.chars().rev().find(|c| c.is_ascii_lowercase())
}

/// Strip a trailing parenthetical note and reject lines that do not start
/// and end with an ASCII letter or digit.
pub fn clean_line(line: &str) -> Option<String> {
    let mut text = line.trim();

    if let Some(body) = text.strip_suffix(')') {
        let inner_start = body.rfind(')').map_or(0, |i| i + 1);
        if let Some(open) = body[inner_start..].find('(') {
            text = body[..inner_start + open].trim();
        }
    }

    let first = text.chars().next()?;
    let last = text.chars().next_back()?;
    if !first.is_ascii_alphanumeric() || !last.is_ascii_alphanumeric() {
        return None;
    }
    Some(text.to_string())
}

/// Records from one raw list, split by whether a digit sits at an edge
#[derive(Debug, Default)]
pub struct BuiltPartitions {
    pub no_digit_edge: Vec<WordRecord>,
    pub digit_edge: Vec<WordRecord>,
}

/// Clean, deduplicate and split a raw word list
pub fn build_partitions(raw: &str) -> BuiltPartitions {
    let mut seen = HashSet::new();
    let mut built = BuiltPartitions::default();

    for line in raw.lines() {
        let Some(cleaned) = clean_line(line) else {
            continue;
        };
        let Some(record) = WordRecord::from_cleaned(&cleaned) else {
            continue;
        };
        if !seen.insert(record.key.clone()) {
            continue;
        }

        if record.has_digit_edge() {
            built.digit_edge.push(record);
        } else {
            built.no_digit_edge.push(record);
        }
    }

    built
}

/// One of the four word lists a game can draw from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    ClassicNoDigit,
    ClassicDigit,
    PlatformerNoDigit,
    PlatformerDigit,
}

impl Partition {
    /// Every partition, in precedence order
    pub fn all() -> &'static [Partition] {
        &[
            Partition::ClassicNoDigit,
            Partition::ClassicDigit,
            Partition::PlatformerNoDigit,
            Partition::PlatformerDigit,
        ]
    }

    /// Partitions in play under the given rules
    pub fn selected(config: &RuleConfiguration) -> Vec<Partition> {
        Self::all()
            .iter()
            .copied()
            .filter(|p| config.include_platformer || !p.is_platformer())
            .filter(|p| config.allow_digit_edged_words || !p.is_digit_edged())
            .collect()
    }

    pub fn is_platformer(&self) -> bool {
        matches!(self, Partition::PlatformerNoDigit | Partition::PlatformerDigit)
    }

    pub fn is_digit_edged(&self) -> bool {
        matches!(self, Partition::ClassicDigit | Partition::PlatformerDigit)
    }

    /// File name of this partition inside a dictionary directory
    pub fn file_name(&self) -> String {
        let prefix = if self.is_platformer() { "platformer" } else { "classic" };
        partition_file_name(prefix, self.is_digit_edged())
    }
}

fn partition_file_name(prefix: &str, digit_edged: bool) -> String {
    let suffix = if digit_edged { "yes_num" } else { "no_num" };
    format!("{}_{}.json", prefix, suffix)
}

/// On-disk shape of a partition entry
#[derive(Debug, Serialize, Deserialize)]
struct PartitionEntry {
    original: String,
    lower: String,
    first: Option<String>,
    last: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_alpha: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PartitionFile {
    list: Vec<PartitionEntry>,
}

impl PartitionEntry {
    fn from_record(record: &WordRecord) -> Self {
        Self {
            original: record.original.clone(),
            lower: record.key.clone(),
            first: Some(record.first_symbol.to_string()),
            last: record.last_symbol.map(String::from),
            last_alpha: record
                .has_digit_edge()
                .then(|| record.last_alpha_symbol.map(String::from))
                .flatten(),
        }
    }

    fn into_record(self) -> Option<WordRecord> {
        let first_symbol = self.first.as_deref().and_then(|s| s.chars().next())?;
        let last_symbol = self.last.as_deref().and_then(|s| s.chars().next());
        let last_alpha_symbol = match self.last_alpha.as_deref() {
            Some(s) => s.chars().next(),
            None => last_alpha(&self.lower),
        };

        Some(WordRecord {
            original: self.original,
            key: self.lower,
            first_symbol,
            last_symbol,
            last_alpha_symbol,
            starts_with_digit: first_symbol.is_ascii_digit(),
            ends_with_digit: last_symbol.is_some_and(|c| c.is_ascii_digit()),
        })
    }
}

/// Read one JSON partition file
pub fn read_partition_file(path: &Path) -> Result<Vec<WordRecord>> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::file("read", path, e))?;
    let file: PartitionFile = serde_json::from_str(&text).map_err(|source| Error::Partition {
        path: path.to_path_buf(),
        source,
    })?;

    let mut records = Vec::with_capacity(file.list.len());
    for entry in file.list {
        let original = entry.original.clone();
        match entry.into_record() {
            Some(record) => records.push(record),
            None => warn!(word = %original, path = %path.display(), "skipping entry without a first symbol"),
        }
    }
    Ok(records)
}

/// Build a raw list and write `<prefix>_no_num.json` and `<prefix>_yes_num.json`.
///
/// Returns the number of records written to (no_num, yes_num).
pub fn export_partitions(raw: &str, prefix: &str, out_dir: &Path) -> Result<(usize, usize)> {
    std::fs::create_dir_all(out_dir).map_err(|e| Error::file("create", out_dir, e))?;
    let built = build_partitions(raw);

    for (records, digit_edged) in [(&built.no_digit_edge, false), (&built.digit_edge, true)] {
        let file = PartitionFile {
            list: records.iter().map(PartitionEntry::from_record).collect(),
        };
        let path = out_dir.join(partition_file_name(prefix, digit_edged));
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(&path, json).map_err(|e| Error::file("write", &path, e))?;
    }

    Ok((built.no_digit_edge.len(), built.digit_edge.len()))
}

/// Which end of a word a dictionary search matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    Prefix,
    Suffix,
}

impl SearchMode {
    pub fn toggled(self) -> Self {
        match self {
            SearchMode::Prefix => SearchMode::Suffix,
            SearchMode::Suffix => SearchMode::Prefix,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchMode::Prefix => "starts with",
            SearchMode::Suffix => "ends with",
        }
    }
}

/// Indexed, immutable word collection for one game
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    by_key: HashMap<String, Arc<WordRecord>>,
    by_first: HashMap<char, Vec<Arc<WordRecord>>>,
}

impl Dictionary {
    /// Index records. When two records share a key the first one wins.
    pub fn from_records(records: impl IntoIterator<Item = WordRecord>) -> Self {
        let mut dictionary = Self::default();
        for record in records {
            if dictionary.by_key.contains_key(&record.key) {
                continue;
            }
            let record = Arc::new(record);
            dictionary
                .by_first
                .entry(record.first_symbol)
                .or_default()
                .push(Arc::clone(&record));
            dictionary.by_key.insert(record.key.clone(), record);
        }
        dictionary
    }

    /// The embedded word lists selected by the rules
    pub fn for_rules(config: &RuleConfiguration) -> Self {
        Self::from_partitions(&Partition::selected(config))
    }

    /// Every embedded word list, regardless of rules
    pub fn full() -> Self {
        Self::from_partitions(Partition::all())
    }

    fn from_partitions(partitions: &[Partition]) -> Self {
        let records = partitions
            .iter()
            .filter_map(|p| EMBEDDED.get(p))
            .flatten()
            .cloned();
        Self::from_records(records)
    }

    /// Load the partitions selected by the rules from a directory of JSON files
    pub fn from_partition_dir(dir: &Path, config: &RuleConfiguration) -> Result<Self> {
        let mut records = Vec::new();
        for partition in Partition::selected(config) {
            records.extend(read_partition_file(&dir.join(partition.file_name()))?);
        }
        Ok(Self::from_records(records))
    }

    pub fn get(&self, key: &str) -> Option<&Arc<WordRecord>> {
        self.by_key.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Every record whose key starts with `symbol`
    pub fn starting_with(&self, symbol: char) -> &[Arc<WordRecord>] {
        self.by_first.get(&symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<WordRecord>> {
        self.by_key.values()
    }

    /// Returns the total number of words in the dictionary
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Display spellings whose key starts or ends with `keyword`, sorted by key
    pub fn search(&self, keyword: &str, mode: SearchMode) -> Vec<&str> {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return Vec::new();
        }

        let mut results: Vec<&Arc<WordRecord>> = self
            .by_key
            .values()
            .filter(|r| match mode {
                SearchMode::Prefix => r.key.starts_with(&keyword),
                SearchMode::Suffix => r.key.ends_with(&keyword),
            })
            .collect();
        results.sort_unstable_by(|a, b| a.key.cmp(&b.key));
        results.into_iter().map(|r| r.original.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_line_strips_trailing_note() {
        assert_eq!(clean_line("Harbor (old spelling)"), Some("Harbor".to_string()));
        assert_eq!(clean_line("  Route 66  "), Some("Route 66".to_string()));
        assert_eq!(clean_line("Level (2) Boss (hard)"), Some("Level (2) Boss".to_string()));
    }

    #[test]
    fn test_clean_line_rejects_bad_edges() {
        assert_eq!(clean_line("-broken"), None);
        assert_eq!(clean_line("trailing!"), None);
        assert_eq!(clean_line(""), None);
        assert_eq!(clean_line("(only a note)"), None);
    }

    #[test]
    fn test_record_fields() {
        let record = WordRecord::from_cleaned("Apollo 13").unwrap();
        assert_eq!(record.key, "apollo 13");
        assert_eq!(record.first_symbol, 'a');
        assert_eq!(record.last_symbol, Some('3'));
        assert_eq!(record.last_alpha_symbol, Some('o'));
        assert!(!record.starts_with_digit);
        assert!(record.ends_with_digit);

        let record = WordRecord::from_cleaned("7 Wonders").unwrap();
        assert!(record.starts_with_digit);
        assert_eq!(record.first_symbol, '7');
        assert_eq!(record.last_symbol, Some('s'));

        assert!(WordRecord::from_cleaned("").is_none());
    }

    #[test]
    fn test_build_partitions_splits_and_dedupes() {
        let raw = "apple\nApple\nRoute 66\nbanana (fruit)\nbanana\n-bad\n\n9 Lives\n";
        let built = build_partitions(raw);
        let plain: Vec<_> = built.no_digit_edge.iter().map(|r| r.original.as_str()).collect();
        let digit: Vec<_> = built.digit_edge.iter().map(|r| r.original.as_str()).collect();
        assert_eq!(plain, vec!["apple", "banana"]);
        assert_eq!(digit, vec!["Route 66", "9 Lives"]);
    }

    #[test]
    fn test_embedded_partitions_are_selected_by_rules() {
        let all = Dictionary::full();
        let classic_only = Dictionary::for_rules(&RuleConfiguration {
            include_platformer: false,
            allow_digit_edged_words: false,
            ..Default::default()
        });

        assert!(all.len() > classic_only.len());
        assert!(classic_only.contains("apple"));
        assert!(!classic_only.contains("route 66"));
        assert!(!classic_only.contains("skyline sprint"));
        assert!(all.contains("route 66"));
        assert!(all.contains("skyline sprint"));
        assert!(classic_only.iter().all(|r| !r.has_digit_edge()));
    }

    #[test]
    fn test_starting_with_index() {
        let dict = Dictionary::from_records(
            ["apple", "anchor", "banana"]
                .into_iter()
                .filter_map(WordRecord::from_cleaned),
        );
        let mut keys: Vec<_> = dict.starting_with('a').iter().map(|r| r.key.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["anchor", "apple"]);
        assert!(dict.starting_with('z').is_empty());
    }

    #[test]
    fn test_duplicate_key_keeps_first_record() {
        let dict = Dictionary::from_records(
            ["Echo", "echo"].into_iter().filter_map(WordRecord::from_cleaned),
        );
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get("echo").unwrap().original, "Echo");
        assert_eq!(dict.starting_with('e').len(), 1);
    }

    #[test]
    fn test_search_prefix_and_suffix() {
        let dict = Dictionary::from_records(
            ["Tiger", "Timber", "Amber", "tulip"]
                .into_iter()
                .filter_map(WordRecord::from_cleaned),
        );
        assert_eq!(dict.search("TI", SearchMode::Prefix), vec!["Tiger", "Timber"]);
        assert_eq!(dict.search("ber", SearchMode::Suffix), vec!["Amber", "Timber"]);
        assert!(dict.search("   ", SearchMode::Prefix).is_empty());
    }

    #[test]
    fn test_search_order_ignores_case() {
        let dict = Dictionary::from_records(
            ["Zipper", "amber", "Copper"]
                .into_iter()
                .filter_map(WordRecord::from_cleaned),
        );
        assert_eq!(
            dict.search("er", SearchMode::Suffix),
            vec!["amber", "Copper", "Zipper"]
        );
    }

    #[test]
    fn test_export_and_load_partition_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let (plain, digit) =
            export_partitions("echo\nRoute 66\nAlpha (demo)\n", "classic", dir.path()).unwrap();
        assert_eq!((plain, digit), (2, 1));
        assert!(dir.path().join("classic_no_num.json").exists());
        assert!(dir.path().join("classic_yes_num.json").exists());

        let config = RuleConfiguration {
            include_platformer: false,
            ..Default::default()
        };
        let dict = Dictionary::from_partition_dir(dir.path(), &config).unwrap();
        assert_eq!(dict.len(), 3);
        let route = dict.get("route 66").unwrap();
        assert_eq!(route.last_symbol, Some('6'));
        assert_eq!(route.last_alpha_symbol, Some('e'));
        assert!(route.ends_with_digit);
    }

    #[test]
    fn test_missing_partition_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = Dictionary::from_partition_dir(dir.path(), &RuleConfiguration::default());
        assert!(matches!(result, Err(Error::File { operation: "read", .. })));
    }

    #[test]
    fn test_malformed_entries() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("classic_no_num.json");
        std::fs::write(
            &path,
            r#"{"list": [
                {"original": "Odd", "lower": "odd", "first": null, "last": "d"},
                {"original": "Stub", "lower": "stub", "first": "s", "last": null}
            ]}"#,
        )
        .unwrap();

        let records = read_partition_file(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, "stub");
        assert_eq!(records[0].last_symbol, None);
    }

    #[test]
    fn test_invalid_json_reports_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("classic_no_num.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(read_partition_file(&path), Err(Error::Partition { .. })));
    }
}
