//! SubRip (.srt) reading and writing.
//!
//! Each numbered block becomes one [`Sentence`] whose `first`/`last` time
//! markers are set directly from the block's timestamp line (SRT carries
//! full per-sentence timing, so no interpolation is actually needed for
//! SRT-sourced documents — [`crate::core::interpolate::fill_times`] is a
//! no-op on them).
//!
//! Per Design Notes §9, blocks are found by splitting on blank lines and
//! locating the timestamp line within each block, rather than gating on a
//! leading numeric counter line (the original reader's counter-gating bug).

use crate::core::formats::{Document, Sentence};
use crate::error::{AlignError, AlignResult};
use crate::time::{sec_to_time, time_to_sec};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static TIME_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,2}:\d{2}:\d{2}[.,]\d{1,3})\s*-->\s*(\d{1,2}:\d{2}:\d{2}[.,]\d{1,3})")
        .unwrap()
});

/// Read an SRT file (or its `.gz` sibling) into a [`Document`].
pub fn read(path: &Path) -> AlignResult<Document> {
    let content = crate::core::io_util::read_text_tolerant(path)?;
    parse(&content)
}

/// Parse SRT content into a [`Document`].
///
/// Blocks with no recognizable timestamp line are silently skipped, as are
/// empty blocks; this keeps the reader robust against trailing blank lines
/// and stray counters.
pub fn parse(content: &str) -> AlignResult<Document> {
    let mut sentences = Vec::new();
    for (block_idx, block) in split_blocks(content).into_iter().enumerate() {
        let lines: Vec<&str> = block.lines().collect();
        let Some(time_line_idx) = lines.iter().position(|l| TIME_RANGE.is_match(l)) else {
            continue;
        };
        let caps = TIME_RANGE.captures(lines[time_line_idx]).unwrap();
        let start = time_to_sec(&caps[1])
            .ok_or_else(|| AlignError::parse(format!("bad start time in block {block_idx}")))?;
        let end = time_to_sec(&caps[2])
            .ok_or_else(|| AlignError::parse(format!("bad end time in block {block_idx}")))?;
        let text = lines[time_line_idx + 1..].join(" ");
        let tokens: Vec<String> = text.split_whitespace().map(|s| s.to_string()).collect();
        let joined_len = tokens.join(" ").chars().count() as u32;

        let mut sentence = Sentence::new((block_idx + 1).to_string(), tokens);
        sentence.start_pos = 0;
        sentence.end_pos = joined_len;
        sentence.first_time = Some(start);
        sentence.first_pos = Some(0);
        sentence.last_time = Some(end);
        sentence.last_pos = Some(joined_len);
        sentence.start = start;
        sentence.end = end;
        sentences.push(sentence);
    }
    Ok(Document { sentences })
}

/// Split raw SRT text into blank-line-delimited blocks.
fn split_blocks(content: &str) -> Vec<String> {
    content
        .replace("\r\n", "\n")
        .split("\n\n")
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty())
        .collect()
}

/// One fully-formed output block, ready to be rendered to SRT text.
#[derive(Debug, Clone)]
pub struct SrtBlock {
    /// 1-based block number.
    pub index: usize,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Text, already line-wrapped if needed.
    pub text: String,
}

/// Render a sequence of blocks as SRT text.
pub fn write(blocks: &[SrtBlock]) -> String {
    let mut out = String::new();
    for block in blocks {
        out.push_str(&format!("{}\n", block.index));
        out.push_str(&format!(
            "{} --> {}\n",
            sec_to_time(block.start),
            sec_to_time(block.end)
        ));
        out.push_str(&block.text);
        out.push_str("\n\n");
    }
    out
}
