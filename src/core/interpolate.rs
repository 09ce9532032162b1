//! Time interpolation (C4): derive each sentence's `start`/`end` seconds from
//! sparsely-placed inline time markers and character positions.
//!
//! SRT-sourced documents already carry a marker at both `start_pos` and
//! `end_pos`, so every branch below degenerates to a no-op for them; this is
//! the only path XML-sourced documents go through to get concrete timings.

use crate::core::formats::Sentence;
use crate::time::enforce_strict_order;

/// Fill in `start`/`end` for every sentence in place, applying the linear
/// transform `start = scale*first + offset`, `end = scale*last + offset`
/// after interpolation.
pub fn fill_times(sentences: &mut [Sentence], scale: f64, offset: f64) {
    for i in 0..sentences.len() {
        demote_single_marker(&mut sentences[i]);

        if sentences[i].first_time.is_none() {
            let prev_end = if i == 0 { 0.0 } else { sentences[i - 1].end };
            sentences[i].first_time = Some(prev_end);
            sentences[i].first_pos = Some(sentences[i].start_pos);
        }

        if sentences[i].last_time.is_none() {
            if let Some((time, pos)) = scan_forward_for_marker(sentences, i + 1) {
                sentences[i].last_time = Some(time);
                sentences[i].last_pos = Some(pos);
            } else {
                sentences[i].last_time = sentences[i].first_time;
                sentences[i].last_pos = Some(sentences[i].end_pos);
            }
        }

        interpolate_positions(&mut sentences[i]);

        let first = sentences[i].first_time.unwrap();
        let last = sentences[i].last_time.unwrap();
        let start = scale * first + offset;
        let end = scale * last + offset;
        sentences[i].start = enforce_strict_order(start, end);
        sentences[i].end = end;
    }
}

/// If exactly one marker was seen and it sits at the sentence-end position,
/// treat it as `last` rather than `first`.
fn demote_single_marker(sentence: &mut Sentence) {
    if sentence.first_time.is_some()
        && sentence.last_time.is_none()
        && sentence.first_pos == Some(sentence.end_pos)
    {
        sentence.last_time = sentence.first_time.take();
        sentence.last_pos = sentence.first_pos.take();
    }
}

/// Find the next sentence (from `start` onward) with a raw `first` or `last`
/// marker still defined, returning its value and position.
fn scan_forward_for_marker(sentences: &[Sentence], start: usize) -> Option<(f64, u32)> {
    sentences[start..].iter().find_map(|s| {
        s.first_time
            .zip(s.first_pos)
            .or_else(|| s.last_time.zip(s.last_pos))
    })
}

/// Extrapolate `first`/`last` back to the sentence boundaries when the
/// marker sat partway through the text.
///
/// `last_pos` in particular may have been copied in from a *different*
/// sentence (the scan-forward case in [`fill_times`]), so every position
/// here is compared and subtracted as signed `f64`, never as `u32` — a
/// plain `u32` subtraction would panic/wrap whenever that borrowed position
/// falls on the other side of this sentence's own positions.
fn interpolate_positions(sentence: &mut Sentence) {
    let (Some(first_time), Some(first_pos), Some(last_time), Some(last_pos)) = (
        sentence.first_time,
        sentence.first_pos,
        sentence.last_time,
        sentence.last_pos,
    ) else {
        return;
    };
    if last_pos == first_pos {
        return;
    }
    let first_pos = first_pos as f64;
    let last_pos = last_pos as f64;
    let start_pos = sentence.start_pos as f64;
    let end_pos = sentence.end_pos as f64;

    let time_span = last_time - first_time;
    let denom = last_pos - first_pos;
    if denom == 0.0 {
        return;
    }

    if first_pos != start_pos {
        let adjustment = time_span * (first_pos - start_pos) / denom;
        sentence.first_time = Some(first_time - adjustment);
    }
    if last_pos != end_pos {
        let adjustment = time_span * (end_pos - last_pos) / denom;
        sentence.last_time = Some(last_time + adjustment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::formats::Sentence;

    fn bare(id: &str, start_pos: u32, end_pos: u32) -> Sentence {
        let mut s = Sentence::new(id, vec!["x".to_string()]);
        s.start_pos = start_pos;
        s.end_pos = end_pos;
        s
    }

    #[test]
    fn test_strictly_positive_frames() {
        let mut sentences = vec![bare("1", 0, 10), bare("2", 0, 10), bare("3", 0, 10)];
        sentences[0].first_time = Some(1.0);
        sentences[0].first_pos = Some(0);
        sentences[0].last_time = Some(2.0);
        sentences[0].last_pos = Some(10);
        sentences[1].first_time = Some(2.0);
        sentences[1].first_pos = Some(0);
        sentences[1].last_time = Some(3.0);
        sentences[1].last_pos = Some(10);
        fill_times(&mut sentences, 1.0, 0.0);
        for s in &sentences {
            assert!(s.start < s.end);
        }
    }

    #[test]
    fn test_missing_first_uses_previous_end() {
        let mut sentences = vec![bare("1", 0, 10), bare("2", 0, 10)];
        sentences[0].first_time = Some(1.0);
        sentences[0].first_pos = Some(0);
        sentences[0].last_time = Some(2.0);
        sentences[0].last_pos = Some(10);
        sentences[1].last_time = Some(5.0);
        sentences[1].last_pos = Some(10);
        fill_times(&mut sentences, 1.0, 0.0);
        assert_eq!(sentences[1].first_time, Some(sentences[0].end));
    }

    #[test]
    fn test_demote_single_end_marker() {
        let mut sentence = bare("1", 0, 10);
        sentence.first_time = Some(4.0);
        sentence.first_pos = Some(10);
        let mut sentences = vec![sentence, bare("2", 0, 10)];
        sentences[1].first_time = Some(5.0);
        sentences[1].first_pos = Some(0);
        sentences[1].last_time = Some(6.0);
        sentences[1].last_pos = Some(10);
        fill_times(&mut sentences, 1.0, 0.0);
        assert_eq!(sentences[0].last_time, Some(4.0));
    }

    #[test]
    fn test_backward_interpolation() {
        let mut s = bare("1", 0, 10);
        s.first_time = Some(2.0);
        s.first_pos = Some(5);
        s.last_time = Some(4.0);
        s.last_pos = Some(10);
        let mut sentences = vec![s];
        fill_times(&mut sentences, 1.0, 0.0);
        // time_span=2 over 5 chars -> backward extrapolation of 5 chars = 2s
        assert!((sentences[0].start - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_transform_applied() {
        let mut sentences = vec![bare("1", 0, 10)];
        sentences[0].first_time = Some(1.0);
        sentences[0].first_pos = Some(0);
        sentences[0].last_time = Some(2.0);
        sentences[0].last_pos = Some(10);
        fill_times(&mut sentences, 2.0, 1.0);
        assert_eq!(sentences[0].start, 3.0);
        assert_eq!(sentences[0].end, 5.0);
    }

    #[test]
    fn test_scan_forward_copied_position_before_end_does_not_panic() {
        // A neighbour's marker position can land *before* this sentence's
        // own `end_pos` (or before its `first_pos`) once copied in by
        // scan-forward; `interpolate_positions` must handle that without a
        // `u32` underflow, regardless of how the positions were produced.
        let mut sentence = bare("1", 0, 20);
        sentence.first_time = Some(3.0);
        sentence.first_pos = Some(15);
        sentence.last_time = Some(4.0);
        sentence.last_pos = Some(2); // smaller than both first_pos and end_pos
        let mut sentences = vec![sentence];
        fill_times(&mut sentences, 1.0, 0.0);
        assert!(sentences[0].start < sentences[0].end);
    }

    #[test]
    fn test_xml_scan_forward_marker_from_later_sentence() {
        // End-to-end regression for the concrete trigger scenario: sentence
        // `a`'s only marker sits mid-sentence; sentence `b`'s only marker
        // sits at its own start. `a`'s `last_pos` is filled in by copying
        // `b`'s marker position, which used to collide with `a`'s own
        // (per-sentence-reset) positions and panic.
        let xml = concat!(
            r#"<doc><s id="a"><w>one</w><time value="00:00:01,000"/>"#,
            r#"<w>two</w><w>three</w></s>"#,
            r#"<s id="b"><time value="00:00:05,000"/><w>hi</w></s></doc>"#,
        );
        let mut doc = crate::core::formats::xml::parse(xml).unwrap();
        fill_times(&mut doc.sentences, 1.0, 0.0);
        for s in &doc.sentences {
            assert!(s.start < s.end);
        }
    }
}
