//! CLI arguments for the `mt2srt` binary (the length-based projector).

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Input template format accepted by `-i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TemplateFormat {
    Srt,
    Xml,
}

/// Output format accepted by `-o`; SRT is the only one implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Srt,
}

/// Project a time-stamped template's frames onto a flat translation text
/// (read from standard input), writing SRT to standard output.
#[derive(Parser, Debug)]
#[command(name = "mt2srt")]
#[command(about = "Project subtitle timing onto a translation by sentence length")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Mt2SrtArgs {
    /// Time-stamped template file.
    pub template: PathBuf,

    /// Template input format.
    #[arg(short = 'i', long = "input-format", default_value = "srt")]
    pub input_format: TemplateFormat,

    /// Output format.
    #[arg(short = 'o', long = "output-format", default_value = "srt")]
    pub output_format: OutputFormat,

    /// `LengthLimitPenalty`: cost multiplier for moves that fit inside
    /// `HardMaxLineLength`.
    #[arg(short = 'l', long = "length-penalty")]
    pub length_penalty: Option<f64>,

    /// `NotEosPenalty`: cost multiplier for moves that don't land on a
    /// translation-line boundary.
    #[arg(short = 's', long = "not-eos-penalty")]
    pub not_eos_penalty: Option<f64>,

    /// Optional TOML file layering option overrides under CLI flags.
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// Verbose logging.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
