//! Error types for the subtitle alignment toolkit.
//!
//! This module defines [`AlignError`], covering the failure modes described
//! for the overlap aligner and the length-based projector: unreadable or
//! malformed input documents, XML/SRT structural failures, non-UTF-8 input,
//! and invalid option combinations.
use thiserror::Error;

/// All possible errors produced by the alignment toolkit.
///
/// Each variant maps to an exit code via [`AlignError::exit_code`] and has
/// a user-facing rendering via [`AlignError::user_friendly_message`].
#[derive(Error, Debug)]
pub enum AlignError {
    /// I/O failure during file access (missing file, permission, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The requested input could not be opened: neither the bare file nor
    /// a `.gz` sibling was readable.
    #[error("Input error: {0}")]
    Input(String),

    /// Structural parse failure in an SRT or tokenized-XML document.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Input bytes were not valid UTF-8 where UTF-8 is required.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Invalid option or option combination (e.g. `cognate_range` without
    /// `use_cognates`).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catch-all wrapping any other failure.
    #[error("Unknown error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Specialized `Result` type for alignment operations.
pub type AlignResult<T> = Result<T, AlignError>;

impl AlignError {
    /// Create an [`AlignError::Input`] with the given message.
    pub fn input<S: Into<String>>(message: S) -> Self {
        AlignError::Input(message.into())
    }

    /// Create an [`AlignError::Parse`] with the given message.
    pub fn parse<S: Into<String>>(message: S) -> Self {
        AlignError::Parse(message.into())
    }

    /// Create an [`AlignError::Encoding`] with the given message.
    pub fn encoding<S: Into<String>>(message: S) -> Self {
        AlignError::Encoding(message.into())
    }

    /// Create an [`AlignError::Config`] with the given message.
    pub fn config<S: Into<String>>(message: S) -> Self {
        AlignError::Config(message.into())
    }

    /// Return the process exit code that corresponds to this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AlignError::Io(_) => 1,
            AlignError::Config(_) => 2,
            AlignError::Parse(_) => 3,
            AlignError::Encoding(_) => 4,
            AlignError::Input(_) => 5,
            AlignError::Other(_) => 1,
        }
    }

    /// Render a user-friendly message with a suggested remedy.
    pub fn user_friendly_message(&self) -> String {
        match self {
            AlignError::Io(e) => format!("File operation error: {e}"),
            AlignError::Input(msg) => {
                format!("Input error: {msg}\nHint: check the file path and its .gz sibling")
            }
            AlignError::Parse(msg) => {
                format!("Parse error: {msg}\nHint: verify the document is well-formed SRT or XML")
            }
            AlignError::Encoding(msg) => {
                format!("Encoding error: {msg}\nHint: re-save the input as UTF-8")
            }
            AlignError::Config(msg) => {
                format!("Configuration error: {msg}\nHint: check the combination of options passed")
            }
            AlignError::Other(err) => format!("Unknown error: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_input_error_creation() {
        let err = AlignError::input("missing.srt not found");
        assert!(matches!(err, AlignError::Input(_)));
        assert_eq!(err.to_string(), "Input error: missing.srt not found");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "nope");
        let err: AlignError = io_err.into();
        assert!(matches!(err, AlignError::Io(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(AlignError::config("x").exit_code(), 2);
        assert_eq!(AlignError::parse("x").exit_code(), 3);
        assert_eq!(AlignError::encoding("x").exit_code(), 4);
        assert_eq!(AlignError::input("x").exit_code(), 5);
    }

    #[test]
    fn test_user_friendly_messages() {
        let msg = AlignError::config("bad combo").user_friendly_message();
        assert!(msg.contains("Configuration error:"));
        assert!(msg.contains("Hint:"));
    }
}
