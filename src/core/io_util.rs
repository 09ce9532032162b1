//! Shared file-opening helpers: transparent gzip, BOM stripping, and control
//! character filtering, used by every reader in [`crate::core::formats`] and
//! by [`crate::core::dictionary`].

use crate::error::{AlignError, AlignResult};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read a UTF-8 text file, transparently decompressing it if it (or a `.gz`
/// sibling) is gzip-compressed.
///
/// Resolution order, per spec §4.1:
/// 1. The literal path, if openable.
/// 2. `<path>.gz`, decompressed on the fly.
///
/// Fails with [`AlignError::Input`] if neither is openable, and with
/// [`AlignError::Encoding`] if the decoded bytes are not valid UTF-8.
pub fn read_text_tolerant(path: &Path) -> AlignResult<String> {
    let raw = read_bytes_tolerant(path)?;
    let text = String::from_utf8(raw)
        .map_err(|e| AlignError::encoding(format!("{}: {e}", path.display())))?;
    Ok(strip_control_chars(strip_bom(&text)))
}

fn read_bytes_tolerant(path: &Path) -> AlignResult<Vec<u8>> {
    if let Ok(mut f) = File::open(path) {
        let mut buf = Vec::new();
        f.read_to_end(&mut buf)?;
        return Ok(buf);
    }
    let gz_path = append_gz(path);
    if let Ok(f) = File::open(&gz_path) {
        let mut decoder = GzDecoder::new(f);
        let mut buf = Vec::new();
        decoder.read_to_end(&mut buf)?;
        return Ok(buf);
    }
    Err(AlignError::input(format!(
        "neither {} nor {} could be opened",
        path.display(),
        gz_path.display()
    )))
}

fn append_gz(path: &Path) -> std::path::PathBuf {
    let mut s = path.as_os_str().to_os_string();
    s.push(".gz");
    std::path::PathBuf::from(s)
}

/// Strip a leading UTF-8 BOM (`EF BB BF`), if present.
fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Remove C0 control characters (except TAB/LF/CR) and stray surrogate-like
/// `U+FFFF` characters that sometimes leak in from mis-decoded input.
fn strip_control_chars(text: &str) -> String {
    text.chars()
        .filter(|&c| {
            let is_c0 = (c as u32) < 0x20 && c != '\t' && c != '\n' && c != '\r';
            let is_stray = c == '\u{ffff}' || c == '\u{fffe}';
            !is_c0 && !is_stray
        })
        .collect()
}
