//! Lexical anchor matching (C3): dictionary hits, identical-token runs, and
//! LCS-ratio cognates, in that priority order.

use crate::core::dictionary::{Dictionary, WordFreq};
use regex::Regex;

/// Closed configuration for [`match_tokens`].
#[derive(Debug, Clone)]
pub struct MatcherOptions {
    pub use_dictionary: bool,
    pub use_identical: bool,
    pub use_cognates: bool,
    pub min_token_length: usize,
    pub upper_case_only: bool,
    pub char_set_regex: Option<Regex>,
    pub use_word_freq: bool,
    /// `MINLENGTH`: minimum character length an identical-token run must
    /// exceed to count as an anchor.
    pub min_match_length: u32,
    pub cognate_threshold: f64,
    /// Lower bound the best-anchor cognate sweep (C7) steps down to.
    pub cognate_range: f64,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self {
            use_dictionary: true,
            use_identical: true,
            use_cognates: true,
            min_token_length: 1,
            upper_case_only: false,
            char_set_regex: None,
            use_word_freq: false,
            min_match_length: 5,
            cognate_threshold: 0.9,
            cognate_range: 0.5,
        }
    }
}

impl MatcherOptions {
    fn passes_filters(&self, token: &str) -> bool {
        if token.chars().count() < self.min_token_length {
            return false;
        }
        if self.upper_case_only && !token.chars().all(|c| !c.is_alphabetic() || c.is_uppercase()) {
            return false;
        }
        if let Some(re) = &self.char_set_regex {
            if !re.is_match(token) {
                return false;
            }
        }
        true
    }
}

/// Composite lexical match score between two token lists. Returns the first
/// positive score among dictionary / identical-run / cognate strategies, or
/// `0.0` if none fire.
pub fn match_tokens(
    src_tokens: &[String],
    trg_tokens: &[String],
    opts: &MatcherOptions,
    dict: &Dictionary,
    src_freq: &WordFreq,
    trg_freq: &WordFreq,
) -> f64 {
    if opts.use_dictionary && !dict.is_empty() && dict.any_match(src_tokens, trg_tokens) {
        return 1.0;
    }
    if opts.use_identical {
        let score = identical_run_score(src_tokens, trg_tokens, opts, src_freq, trg_freq);
        if score > 0.0 {
            return score;
        }
    }
    if opts.use_cognates {
        let score = cognate_score(src_tokens, trg_tokens, opts);
        if score > 0.0 {
            return score;
        }
    }
    0.0
}

fn identical_run_score(
    src_tokens: &[String],
    trg_tokens: &[String],
    opts: &MatcherOptions,
    src_freq: &WordFreq,
    trg_freq: &WordFreq,
) -> f64 {
    let mut best_run: &[String] = &[];
    for i in 0..src_tokens.len() {
        if !opts.passes_filters(&src_tokens[i]) {
            continue;
        }
        for j in 0..trg_tokens.len() {
            if src_tokens[i] != trg_tokens[j] {
                continue;
            }
            let mut k = 0;
            while i + k < src_tokens.len()
                && j + k < trg_tokens.len()
                && src_tokens[i + k] == trg_tokens[j + k]
            {
                k += 1;
            }
            if k > best_run.len() {
                best_run = &src_tokens[i..i + k];
            }
        }
    }
    let run_chars: usize = best_run.iter().map(|t| t.chars().count()).sum();
    if run_chars as u32 <= opts.min_match_length {
        return 0.0;
    }
    if opts.use_word_freq {
        let max_src = best_run.iter().filter_map(|t| src_freq.get(t)).max().copied().unwrap_or(1);
        let max_trg = best_run.iter().filter_map(|t| trg_freq.get(t)).max().copied().unwrap_or(1);
        run_chars as f64 / (max_src + max_trg) as f64
    } else {
        run_chars as f64
    }
}

fn cognate_score(src_tokens: &[String], trg_tokens: &[String], opts: &MatcherOptions) -> f64 {
    for s in src_tokens {
        if !opts.passes_filters(s) {
            continue;
        }
        for t in trg_tokens {
            if !opts.passes_filters(t) {
                continue;
            }
            let max_len = s.chars().count().max(t.chars().count());
            if max_len == 0 {
                continue;
            }
            let ratio = lcs_length(s, t) as f64 / max_len as f64;
            if ratio >= opts.cognate_threshold {
                return ratio;
            }
        }
    }
    0.0
}

/// Longest common subsequence length, over `char`s, via the standard
/// `O(|a|*|b|)` dynamic program.
pub fn lcs_length(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut row = vec![0usize; b.len() + 1];
    for &ca in &a {
        let mut prev_diag = 0;
        for (j, &cb) in b.iter().enumerate() {
            let tmp = row[j + 1];
            row[j + 1] = if ca == cb {
                prev_diag + 1
            } else {
                row[j + 1].max(row[j])
            };
            prev_diag = tmp;
        }
    }
    row[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_lcs_symmetry() {
        assert_eq!(lcs_length("kitten", "sitting"), lcs_length("sitting", "kitten"));
    }

    #[test]
    fn test_lcs_self() {
        assert_eq!(lcs_length("hello", "hello"), 5);
    }

    #[test]
    fn test_dictionary_match_wins() {
        let dict = Dictionary::from_str("chat cat\n");
        let opts = MatcherOptions::default();
        let score = match_tokens(
            &toks("le chat noir"),
            &toks("the black cat"),
            &opts,
            &dict,
            &HashMap::new(),
            &HashMap::new(),
        );
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_identical_run() {
        let opts = MatcherOptions { min_match_length: 3, ..Default::default() };
        let dict = Dictionary::empty();
        let score = match_tokens(
            &toks("hello world foo"),
            &toks("xx hello world yy"),
            &opts,
            &dict,
            &HashMap::new(),
            &HashMap::new(),
        );
        assert!(score > 0.0);
    }

    #[test]
    fn test_no_match_returns_zero() {
        let opts = MatcherOptions { use_dictionary: false, use_identical: false, use_cognates: false, ..Default::default() };
        let dict = Dictionary::empty();
        let score = match_tokens(&toks("abc"), &toks("xyz"), &opts, &dict, &HashMap::new(), &HashMap::new());
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_cognate_score() {
        let opts = MatcherOptions { cognate_threshold: 0.5, min_token_length: 1, ..Default::default() };
        let dict = Dictionary::empty();
        let score = match_tokens(
            &["nation".to_string()],
            &["nación".to_string()],
            &opts,
            &dict,
            &HashMap::new(),
            &HashMap::new(),
        );
        assert!(score >= 0.5);
    }
}
