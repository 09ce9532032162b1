//! Bilingual dictionary and per-document word-frequency tables.
//!
//! Dictionary discovery on disk (resolving a `{src3}-{trg3}` package-share
//! path) is out of scope here; callers supply an explicit path. Loading is
//! idempotent: loading the same file twice yields an equal [`Dictionary`].

use crate::error::AlignResult;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Mapping from a source token to the set of target tokens it has been
/// observed paired with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: HashMap<String, HashSet<String>>,
}

impl Dictionary {
    /// An empty dictionary (equivalent to no dictionary filter being used).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a dictionary file (or its `.gz` sibling).
    ///
    /// Each line is either two whitespace-separated tokens (`src trg`) or six
    /// whitespace-separated fields, in which case fields 3 and 4 (1-based)
    /// are the source and target tokens.
    pub fn load(path: &Path) -> AlignResult<Self> {
        let content = crate::core::io_util::read_text_tolerant(path)?;
        Ok(Self::from_str(&content))
    }

    /// Parse dictionary entries directly from text (bypassing file I/O).
    pub fn from_str(content: &str) -> Self {
        let mut entries: HashMap<String, HashSet<String>> = HashMap::new();
        for line in content.lines() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            let (src, trg) = match fields.len() {
                0 | 1 => continue,
                2 => (fields[0], fields[1]),
                n if n >= 6 => (fields[2], fields[3]),
                _ => continue,
            };
            entries
                .entry(src.to_string())
                .or_default()
                .insert(trg.to_string());
        }
        Self { entries }
    }

    /// Whether `(src, trg)` is a known translation pair.
    pub fn contains(&self, src: &str, trg: &str) -> bool {
        self.entries.get(src).is_some_and(|set| set.contains(trg))
    }

    /// Whether any pair `(s, t)` with `s` in `src_tokens` and `t` in
    /// `trg_tokens` is a known translation pair.
    pub fn any_match(&self, src_tokens: &[String], trg_tokens: &[String]) -> bool {
        src_tokens.iter().any(|s| {
            trg_tokens
                .iter()
                .any(|t| self.contains(s, t))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Token -> occurrence count over one document, used to down-weight matches
/// dominated by high-frequency tokens.
pub type WordFreq = HashMap<String, u32>;

/// Compute a word-frequency table over every token in every sentence.
pub fn word_freq<'a>(token_lists: impl IntoIterator<Item = &'a [String]>) -> WordFreq {
    let mut freq = WordFreq::new();
    for tokens in token_lists {
        for token in tokens {
            *freq.entry(token.clone()).or_insert(0) += 1;
        }
    }
    freq
}
