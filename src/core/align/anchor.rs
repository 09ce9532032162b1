//! Best-anchor search (C7): enumerate candidate first/last anchor pairs,
//! resynchronize, realign, and keep the configuration with the best
//! non-empty/empty score.
//!
//! The prefix/suffix candidate loop is embarrassingly parallel (each
//! candidate realigns independently), so it runs under [`rayon`] per the
//! concurrency model's explicit allowance.

use crate::core::align::overlap::{self, OverlapResult};
use crate::core::dictionary::{Dictionary, WordFreq};
use crate::core::formats::Sentence;
use crate::core::lexical::{self, MatcherOptions};
use crate::core::sync;
use rayon::prelude::*;

/// A candidate sentence pair sharing a lexical match, scored inversely to
/// its distance from the nearest document edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPoint {
    pub src_idx: usize,
    pub trg_idx: usize,
    pub match_score: f64,
    pub edge_distance: usize,
}

impl AnchorPoint {
    fn ranking_score(&self) -> f64 {
        self.match_score / (1.0 + self.edge_distance as f64)
    }
}

/// Prefix and suffix anchor candidate pools, per spec §3.
#[derive(Debug, Clone, Default)]
pub struct AnchorPools {
    pub prefix: Vec<AnchorPoint>,
    pub suffix: Vec<AnchorPoint>,
}

/// Scan the top-`window` sentences at each document edge for lexical
/// matches, returning up to `max_matches` candidates per pool (`0` =
/// unbounded), sorted by descending ranking score with ties broken by
/// ascending `(src_idx, trg_idx)`.
pub fn find_anchors(
    src: &[Sentence],
    trg: &[Sentence],
    window: usize,
    max_matches: usize,
    opts: &MatcherOptions,
    dict: &Dictionary,
    src_freq: &WordFreq,
    trg_freq: &WordFreq,
) -> AnchorPools {
    let src_window = window.min(src.len());
    let trg_window = window.min(trg.len());

    let mut prefix = Vec::new();
    for i in 0..src_window {
        for j in 0..trg_window {
            let score = lexical::match_tokens(&src[i].tokens, &trg[j].tokens, opts, dict, src_freq, trg_freq);
            if score > 0.0 {
                prefix.push(AnchorPoint { src_idx: i, trg_idx: j, match_score: score, edge_distance: i + j });
            }
        }
    }

    let mut suffix = Vec::new();
    let src_tail_start = src.len().saturating_sub(src_window);
    let trg_tail_start = trg.len().saturating_sub(trg_window);
    for i in src_tail_start..src.len() {
        for j in trg_tail_start..trg.len() {
            let score = lexical::match_tokens(&src[i].tokens, &trg[j].tokens, opts, dict, src_freq, trg_freq);
            if score > 0.0 {
                let edge_distance = (src.len() - 1 - i) + (trg.len() - 1 - j);
                suffix.push(AnchorPoint { src_idx: i, trg_idx: j, match_score: score, edge_distance });
            }
        }
    }

    sort_and_cap(&mut prefix, max_matches);
    sort_and_cap(&mut suffix, max_matches);
    AnchorPools { prefix, suffix }
}

fn sort_and_cap(pool: &mut Vec<AnchorPoint>, max_matches: usize) {
    pool.sort_by(|a, b| {
        b.ranking_score()
            .partial_cmp(&a.ranking_score())
            .unwrap()
            .then(a.src_idx.cmp(&b.src_idx))
            .then(a.trg_idx.cmp(&b.trg_idx))
    });
    if max_matches > 0 && pool.len() > max_matches {
        pool.truncate(max_matches);
    }
}

/// Outcome of the best-anchor search: the winning alignment, its score, and
/// whether any resynchronized candidate beat the unsynchronized baseline.
#[derive(Debug, Clone)]
pub struct BestAnchorResult {
    pub result: OverlapResult,
    pub score_r: f64,
    pub resynchronized: bool,
}

/// Run C6 once unmodified, then try every prefix×suffix anchor pair,
/// resynchronizing the source timeline and rerunning C6, keeping whichever
/// configuration maximizes `R`.
pub fn best_anchor_search(
    src: &[Sentence],
    trg: &[Sentence],
    pools: &AnchorPools,
    proportion: bool,
) -> BestAnchorResult {
    let baseline = overlap::align(src, trg);
    let baseline_r = baseline.score_r(proportion);

    let mut best = BestAnchorResult { result: baseline, score_r: baseline_r, resynchronized: false };

    if pools.prefix.is_empty() || pools.suffix.is_empty() {
        return best;
    }

    let candidates: Vec<(AnchorPoint, AnchorPoint)> = pools
        .prefix
        .iter()
        .flat_map(|&p| pools.suffix.iter().map(move |&q| (p, q)))
        .collect();

    let evaluated: Vec<(f64, OverlapResult)> = candidates
        .par_iter()
        .filter_map(|(p, q)| {
            let p1 = (src[p.src_idx].start, trg[p.trg_idx].start);
            let p2 = (src[q.src_idx].start, trg[q.trg_idx].start);
            let (slope, offset) = sync::fit_from_matches(&[p1, p2])?;
            let transformed: Vec<Sentence> = src
                .iter()
                .map(|s| {
                    let mut s = s.clone();
                    s.start = slope * s.start + offset;
                    s.end = slope * s.end + offset;
                    s
                })
                .collect();
            let result = overlap::align(&transformed, trg);
            let r = result.score_r(proportion);
            Some((r, result))
        })
        .collect();

    for (r, result) in evaluated {
        if r > best.score_r {
            best = BestAnchorResult { result, score_r: r, resynchronized: true };
        }
    }

    best
}

/// Step `cognate_threshold` from `1.0` down to `opts.cognate_range` in `0.05`
/// increments, rediscovering anchors and rerunning the best-anchor search at
/// each threshold, keeping the overall best result.
pub fn cognate_sweep(
    src: &[Sentence],
    trg: &[Sentence],
    window: usize,
    max_matches: usize,
    base_opts: &MatcherOptions,
    dict: &Dictionary,
    src_freq: &WordFreq,
    trg_freq: &WordFreq,
    proportion: bool,
) -> BestAnchorResult {
    let mut threshold = 1.0f64;
    let mut overall: Option<BestAnchorResult> = None;

    while threshold >= base_opts.cognate_range - 1e-9 {
        let mut opts = base_opts.clone();
        opts.cognate_threshold = threshold;
        let pools = find_anchors(src, trg, window, max_matches, &opts, dict, src_freq, trg_freq);
        let candidate = best_anchor_search(src, trg, &pools, proportion);
        overall = Some(match overall {
            Some(best) if best.score_r >= candidate.score_r => best,
            _ => candidate,
        });
        threshold -= 0.05;
    }

    overall.unwrap_or_else(|| best_anchor_search(src, trg, &AnchorPools::default(), proportion))
}
