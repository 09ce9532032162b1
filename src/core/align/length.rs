//! Length DP projector (C8): Gale–Church-style alignment of a time-stamped
//! template onto a length-fragmented translation, plus the line-wrapping
//! pass used when serializing the result to SRT.

use crate::core::formats::Sentence;
use crate::error::{AlignError, AlignResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::ops::Range;

/// `(d1, d2)` move priors, indexed by `d2` (`d1` is always `1`).
const PRIOR: [f64; 5] = [0.04, 0.24, 0.24, 0.24, 0.24];

#[derive(Debug, Clone)]
pub struct LengthOptions {
    /// `LengthLimitPenalty` applied when the consumed target span does
    /// *not* exceed `hard_max_line_length` (CLI `-l`).
    pub length_penalty: f64,
    /// `NotEosPenalty` applied when the move does not land on a
    /// translation-line boundary (CLI `-s`).
    pub not_eos_penalty: f64,
    pub soft_max_line_length: usize,
    pub hard_max_line_length: usize,
}

impl Default for LengthOptions {
    fn default() -> Self {
        Self {
            length_penalty: 0.5,
            not_eos_penalty: 0.5,
            soft_max_line_length: 30,
            hard_max_line_length: 37,
        }
    }
}

static FRAGMENT_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)^(.*?\p{P})[ \t]+").unwrap());

/// One fragment of translation text, tagged with whether it ends the input
/// line it was fragmented from.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub is_sent_end: bool,
}

/// Fragment translation text at clause punctuation, per spec §4.7: the
/// shortest prefix matching `«non-punct punct whitespace»` is repeatedly
/// consumed, with the remainder of each input line emitted as a final
/// fragment. Lines longer than `hard_max` are then pre-split on whitespace
/// after at least `soft_max` characters.
pub fn fragment_translation(text: &str, opts: &LengthOptions) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    for line in text.lines() {
        let line_fragments = fragment_line(line);
        let presplit = presplit_long(line_fragments, opts.soft_max_line_length, opts.hard_max_line_length);
        fragments.extend(presplit);
    }
    fragments
}

fn fragment_line(line: &str) -> Vec<String> {
    let mut remaining = line.trim();
    let mut fragments = Vec::new();
    while let Some(m) = FRAGMENT_SPLIT.find(remaining) {
        let frag = remaining[..m.end()].trim_end();
        if frag.is_empty() {
            break;
        }
        fragments.push(frag.to_string());
        remaining = remaining[m.end()..].trim_start();
        if remaining.is_empty() {
            break;
        }
    }
    if !remaining.is_empty() {
        fragments.push(remaining.to_string());
    }
    fragments
}

fn presplit_long(fragments: Vec<String>, soft_max: usize, hard_max: usize) -> Vec<Fragment> {
    let mut out = Vec::new();
    for (idx, frag) in fragments.iter().enumerate() {
        let is_last = idx == fragments.len() - 1;
        out.extend(presplit_one(frag, soft_max, hard_max, is_last));
    }
    out
}

fn presplit_one(frag: &str, soft_max: usize, hard_max: usize, is_last: bool) -> Vec<Fragment> {
    let chars: Vec<char> = frag.chars().collect();
    if chars.len() <= hard_max {
        return vec![Fragment { text: frag.to_string(), is_sent_end: is_last }];
    }
    let cut = (soft_max..chars.len()).find(|&i| chars[i].is_whitespace());
    match cut {
        Some(i) => {
            let left: String = chars[..i].iter().collect();
            let right: String = chars[i + 1..].iter().collect();
            let mut result = vec![Fragment { text: left, is_sent_end: false }];
            result.extend(presplit_one(&right, soft_max, hard_max, is_last));
            result
        }
        None => vec![Fragment { text: frag.to_string(), is_sent_end: is_last }],
    }
}

/// Which fragment range (0-based, half-open) each template frame consumed.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameAssignment {
    pub template_idx: usize,
    pub fragment_range: Range<usize>,
}

/// Run the length DP and backtrack into per-frame fragment assignments,
/// plus the `d2` move-count histogram (for the `Σd1 = |src|, Σd2 = |trg|`
/// coverage property).
pub fn project(
    template: &[Sentence],
    fragments: &[Fragment],
    opts: &LengthOptions,
) -> AlignResult<(Vec<FrameAssignment>, HashMap<usize, u32>)> {
    let n = template.len();
    let m = fragments.len();
    let cols = m + 1;

    let mut src_len = vec![0u32; n + 1];
    for i in 1..=n {
        src_len[i] = src_len[i - 1] + template[i - 1].tokens.join(" ").chars().count() as u32;
    }
    let mut trg_len = vec![0u32; m + 1];
    for j in 1..=m {
        trg_len[j] = trg_len[j - 1] + fragments[j - 1].text.chars().count() as u32;
    }

    let mut cost = vec![f64::INFINITY; (n + 1) * cols];
    let mut back = vec![0u8; (n + 1) * cols];
    cost[0] = 0.0;

    for i1 in 1..=n {
        for i2 in 0..=m {
            let mut best_cost = f64::INFINITY;
            let mut best_d2 = 0u8;
            for d2 in 0..=4usize.min(i2) {
                let prev = cost[(i1 - 1) * cols + (i2 - d2)];
                if !prev.is_finite() {
                    continue;
                }
                let l1 = (src_len[i1] - src_len[i1 - 1]) as f64;
                let l2 = (trg_len[i2] - trg_len[i2 - d2]) as f64;
                let eos_penalty = if d2 == 0 {
                    1.0
                } else if fragments[i2 - 1].is_sent_end {
                    1.0
                } else {
                    opts.not_eos_penalty
                };
                let length_penalty = if l2 as usize > opts.hard_max_line_length {
                    1.0
                } else {
                    opts.length_penalty
                };
                let step_cost = -(length_penalty * eos_penalty * PRIOR[d2]).ln() + match_cost(l1, l2);
                let total = prev + step_cost;
                if total < best_cost {
                    best_cost = total;
                    best_d2 = d2 as u8;
                }
            }
            cost[i1 * cols + i2] = best_cost;
            back[i1 * cols + i2] = best_d2;
        }
    }

    if !cost[n * cols + m].is_finite() {
        return Err(AlignError::config(
            "length DP could not align the template against the translation (too few template frames for the text length)",
        ));
    }

    let mut assignments = Vec::with_capacity(n);
    let mut move_counts: HashMap<usize, u32> = HashMap::new();
    let mut i1 = n;
    let mut i2 = m;
    while i1 > 0 {
        let d2 = back[i1 * cols + i2] as usize;
        *move_counts.entry(d2).or_insert(0) += 1;
        assignments.push(FrameAssignment { template_idx: i1 - 1, fragment_range: (i2 - d2)..i2 });
        i2 -= d2;
        i1 -= 1;
    }
    assignments.reverse();

    Ok((assignments, move_counts))
}

/// Gale–Church Gaussian length-match score (`c=1`, `s²=6.8`); returns `-log
/// p`, clamped to `25` when `p` underflows to zero and `0` for an empty
/// pair.
fn match_cost(l1: f64, l2: f64) -> f64 {
    if l1 == 0.0 && l2 == 0.0 {
        return 0.0;
    }
    const C: f64 = 1.0;
    const S2: f64 = 6.8;
    let z = (C * l1 - l2).abs() / (S2 * (l1 + l2 / C) / 2.0).sqrt();
    let p = 2.0 * (1.0 - standard_normal_cdf(z));
    if p <= 0.0 {
        25.0
    } else {
        -p.ln()
    }
}

/// Rational Zelen–Severo approximation of the standard normal CDF.
fn standard_normal_cdf(z: f64) -> f64 {
    let az = z.abs();
    let t = 1.0 / (1.0 + 0.33267 * az);
    let phi_z = (-az * az / 2.0).exp() / (2.0 * std::f64::consts::PI).sqrt();
    let p = 1.0 - phi_z * (0.4361836 * t - 0.1201676 * t * t + 0.9372980 * t * t * t);
    if z < 0.0 { 1.0 - p } else { p }
}

/// Insert a single newline at the best cut point once `text` exceeds
/// `hard_max`, trying sentence-ending punctuation, then clause punctuation,
/// then any whitespace.
pub fn wrap_line(text: &str, soft_max: usize, hard_max: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= hard_max {
        return text.to_string();
    }
    let half = chars.len() / 2;
    let (min, max) = if half < soft_max { (half, soft_max) } else { (soft_max, half) };

    if let Some(i) = find_punct_cut(&chars, is_sentence_end_punct, min, max) {
        return splice_at(&chars, i);
    }
    if let Some(i) = find_punct_cut(&chars, is_clause_punct, min, max) {
        return splice_at(&chars, i);
    }
    if let Some(i) = find_whitespace_cut(&chars, half) {
        return splice_at_whitespace(&chars, i);
    }
    text.to_string()
}

fn is_sentence_end_punct(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '"' | ')' | ']')
}

fn is_clause_punct(c: char) -> bool {
    matches!(c, ',' | ';' | ':' | '\'' | '-')
}

/// Latest index `i` such that `chars[i]` passes `class`, `chars[i+1]` is
/// whitespace, and the right-hand remainder (after consuming that
/// whitespace) has length in `[min, max]`.
fn find_punct_cut(chars: &[char], class: fn(char) -> bool, min: usize, max: usize) -> Option<usize> {
    let mut best = None;
    for i in 0..chars.len().saturating_sub(1) {
        if class(chars[i]) && chars[i + 1].is_whitespace() {
            let remainder = chars.len().saturating_sub(i + 2);
            if remainder >= min && remainder <= max {
                best = Some(i);
            }
        }
    }
    best
}

/// Latest whitespace index whose right-hand remainder is at least `half`.
fn find_whitespace_cut(chars: &[char], half: usize) -> Option<usize> {
    let mut best = None;
    for (i, &c) in chars.iter().enumerate() {
        if c.is_whitespace() && chars.len().saturating_sub(i + 1) >= half {
            best = Some(i);
        }
    }
    best
}

fn splice_at(chars: &[char], punct_idx: usize) -> String {
    let left: String = chars[..=punct_idx].iter().collect();
    let mut j = punct_idx + 1;
    while j < chars.len() && chars[j].is_whitespace() {
        j += 1;
    }
    let right: String = chars[j..].iter().collect();
    format!("{left}\n{right}")
}

fn splice_at_whitespace(chars: &[char], ws_idx: usize) -> String {
    let left: String = chars[..ws_idx].iter().collect();
    let right: String = chars[ws_idx + 1..].iter().collect();
    format!("{left}\n{right}")
}
