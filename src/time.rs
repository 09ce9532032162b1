//! Time arithmetic: `HH:MM:SS,mmm` <-> seconds conversion and ordering helpers.
//!
//! One tick is 10 nanoseconds (`10e-8` s), the smallest adjustment the
//! interpolator and overlap aligner ever apply to keep `start < end`.

/// The smallest time nudge used to break `start == end` / `start > end` ties.
pub const TICK: f64 = 1e-8;

/// Parse an SRT-style timestamp (`HH:MM:SS,mmm`) into seconds.
///
/// Per spec §6, the parser splits on any run of non-digit, non-minus
/// characters rather than anchoring on a strict regex, so `HH:MM:SS.mmm`
/// and similar variants also parse.
pub fn time_to_sec(ts: &str) -> Option<f64> {
    let parts: Vec<&str> = ts
        .split(|c: char| !c.is_ascii_digit() && c != '-')
        .filter(|s| !s.is_empty())
        .collect();
    if parts.len() < 3 {
        return None;
    }
    let hours: f64 = parts[0].parse().ok()?;
    let minutes: f64 = parts[1].parse().ok()?;
    let seconds: f64 = parts[2].parse().ok()?;
    let millis: f64 = if parts.len() > 3 {
        let ms_str = parts[3];
        let ms: f64 = ms_str.parse().ok()?;
        // Normalize to milliseconds regardless of digit count (e.g. "5" -> 500).
        ms * 10f64.powi(3 - ms_str.len() as i32)
    } else {
        0.0
    };
    Some(hours * 3600.0 + minutes * 60.0 + seconds + millis / 1000.0)
}

/// Format seconds as an SRT-style timestamp (`HH:MM:SS,mmm`).
///
/// Negative or otherwise degenerate input is clamped to zero.
pub fn sec_to_time(sec: f64) -> String {
    let total_ms = (sec.max(0.0) * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let seconds = (total_ms % 60_000) / 1_000;
    let millis = total_ms % 1_000;
    format!("{hours:02}:{minutes:02}:{seconds:02},{millis:03}")
}

/// Ensure `start < end` by nudging `start` back one tick if needed.
pub fn enforce_strict_order(start: f64, end: f64) -> f64 {
    if start >= end { start - TICK } else { start }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_to_sec_basic() {
        assert_eq!(time_to_sec("00:00:01,000"), Some(1.0));
        assert_eq!(time_to_sec("01:02:03,500"), Some(3723.5));
    }

    #[test]
    fn test_time_to_sec_dot_separator() {
        assert_eq!(time_to_sec("00:00:01.250"), Some(1.25));
    }

    #[test]
    fn test_time_to_sec_invalid() {
        assert_eq!(time_to_sec("not a time"), None);
        assert_eq!(time_to_sec("00:00"), None);
    }

    #[test]
    fn test_sec_to_time_basic() {
        assert_eq!(sec_to_time(1.0), "00:00:01,000");
        assert_eq!(sec_to_time(3723.5), "01:02:03,500");
    }

    #[test]
    fn test_sec_to_time_negative_clamped() {
        assert_eq!(sec_to_time(-5.0), "00:00:00,000");
    }

    #[test]
    fn test_round_trip() {
        for raw in ["00:00:01,000", "23:59:59,999", "12:34:56,789"] {
            let sec = time_to_sec(raw).unwrap();
            assert_eq!(sec_to_time(sec), raw);
        }
    }

    #[test]
    fn test_enforce_strict_order() {
        assert_eq!(enforce_strict_order(1.0, 2.0), 1.0);
        let nudged = enforce_strict_order(2.0, 2.0);
        assert!(nudged < 2.0);
        assert!((2.0 - nudged - TICK).abs() < 1e-12);
    }
}
