//! Overlap DP aligner (C6): a left-to-right walk over two sentence
//! sequences, maximizing temporal overlap with a bounded block-merge set.

use crate::core::align::Link;
use crate::core::formats::Sentence;
use std::collections::HashMap;

/// Allowed non-trivial block shapes for merging (src_extra, trg_extra)
/// sentences beyond the current cursor, per spec §4.5. A plain `(0, 0)` 1:1
/// match is always considered too, as the implicit baseline every explicit
/// shape must beat on `not_common` to be chosen.
const DIST: [(usize, usize); 4] = [(0, 1), (1, 0), (0, 2), (2, 0)];

/// 10 ms guard nudge applied to degenerate `start >= end` source frames.
const GUARD_NUDGE: f64 = 0.010;

/// Result of one overlap-DP pass.
#[derive(Debug, Clone)]
pub struct OverlapResult {
    pub links: Vec<Link>,
    /// Counts of merged-block shapes, keyed by `(1+ds, 1+dt)`.
    pub buckets: HashMap<(usize, usize), u32>,
    pub empty: u32,
    pub nonempty: u32,
}

impl OverlapResult {
    /// Non-empty ratio `R`, used by the best-anchor search (C7) to compare
    /// configurations. `proportion` selects the alternate formula.
    pub fn score_r(&self, proportion: bool) -> f64 {
        if proportion {
            (self.nonempty as f64 + 1.0) / (self.nonempty as f64 + self.empty as f64 + 1.0)
        } else {
            (self.nonempty as f64 + 1.0) / (self.empty as f64 + 1.0)
        }
    }
}

fn frame_overlap(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    let common_start = a.0.max(b.0);
    let common_end = a.1.min(b.1);
    let common = (common_end - common_start).max(0.0);
    let dur_a = a.1 - a.0;
    let dur_b = b.1 - b.0;
    let not_common = (dur_a + dur_b - 2.0 * common).max(0.0);
    (common, not_common)
}

fn merge_frame(frames: &[(f64, f64)]) -> (f64, f64) {
    let start = frames.iter().map(|f| f.0).fold(f64::INFINITY, f64::min);
    let end = frames.iter().map(|f| f.1).fold(f64::NEG_INFINITY, f64::max);
    (start, end)
}

/// Align two sentence sequences (with `start`/`end` already set) by maximum
/// temporal overlap.
pub fn align(src: &[Sentence], trg: &[Sentence]) -> OverlapResult {
    let mut links = Vec::new();
    let mut buckets = HashMap::new();
    let mut empty = 0u32;
    let mut nonempty = 0u32;

    let mut src_times: Vec<(f64, f64)> = src.iter().map(|s| (s.start, s.end)).collect();
    let trg_times: Vec<(f64, f64)> = trg.iter().map(|s| (s.start, s.end)).collect();

    let mut s = 0usize;
    let mut t = 0usize;

    while s < src.len() && t < trg.len() {
        if src_times[s].0 >= src_times[s].1 {
            src_times[s].0 -= GUARD_NUDGE;
        }

        let (common, _) = frame_overlap(src_times[s], trg_times[t]);

        if common <= 0.0 && src_times[s].1 <= trg_times[t].0 {
            links.push(Link::empty_src(src[s].id.clone()));
            empty += 1;
            s += 1;
            continue;
        }
        if common <= 0.0 && trg_times[t].1 <= src_times[s].0 {
            links.push(Link::empty_trg(trg[t].id.clone()));
            empty += 1;
            t += 1;
            continue;
        }

        let baseline = frame_overlap(src_times[s], trg_times[t]);
        let mut best = (0usize, 0usize, baseline.0, baseline.1);

        for &(ds, dt) in DIST.iter() {
            if s + ds >= src.len() || t + dt >= trg.len() {
                continue;
            }
            let block_src = merge_frame(&src_times[s..=s + ds]);
            let block_trg = merge_frame(&trg_times[t..=t + dt]);
            if block_src.1 <= block_trg.0 || block_trg.1 <= block_src.0 {
                continue; // merged blocks must actually overlap in time
            }
            let (c, nc) = frame_overlap(block_src, block_trg);
            if nc < best.3 {
                best = (ds, dt, c, nc);
            }
        }

        let (ds, dt, common, not_common) = best;
        let src_ids: Vec<String> = src[s..=s + ds].iter().map(|x| x.id.clone()).collect();
        let trg_ids: Vec<String> = trg[t..=t + dt].iter().map(|x| x.id.clone()).collect();
        let overlap_ratio = if common + not_common > 0.0 {
            Some(common / (common + not_common))
        } else {
            None
        };
        links.push(Link {
            src_ids,
            trg_ids,
            common_time: Some(common),
            non_common_time: Some(not_common),
            overlap_ratio,
        });
        *buckets.entry((1 + ds, 1 + dt)).or_insert(0) += 1;
        nonempty += 1;
        s += ds + 1;
        t += dt + 1;
    }

    while s < src.len() {
        links.push(Link::empty_src(src[s].id.clone()));
        empty += 1;
        s += 1;
    }
    while t < trg.len() {
        links.push(Link::empty_trg(trg[t].id.clone()));
        empty += 1;
        t += 1;
    }

    OverlapResult { links, buckets, empty, nonempty }
}
