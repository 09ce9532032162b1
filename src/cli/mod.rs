//! Command-line argument definitions for the two alignment binaries.
//!
//! Each binary (`srtalign`, `mt2srt`) is a flat, non-subcommand `clap`
//! derive CLI per spec §6 — there is no shared dispatcher here, just the
//! argument structs each `src/bin/*.rs` parses directly.

mod mt2srt_args;
mod srtalign_args;

pub use mt2srt_args::{Mt2SrtArgs, OutputFormat, TemplateFormat};
pub use srtalign_args::SrtAlignArgs;
