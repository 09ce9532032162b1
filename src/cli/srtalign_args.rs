//! CLI arguments for the `srtalign` binary (the time-overlap aligner).

use clap::Parser;
use std::path::PathBuf;

/// Align two time-stamped subtitle documents by maximum temporal overlap.
#[derive(Parser, Debug)]
#[command(name = "srtalign")]
#[command(about = "Align sentence times across two subtitle documents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct SrtAlignArgs {
    /// Source document (tokenized XML).
    pub source: PathBuf,

    /// Target document (tokenized XML).
    pub target: PathBuf,

    /// Source language (ISO 639, any form `isolang` accepts).
    #[arg(short = 'S', long = "source-lang")]
    pub source_lang: Option<String>,

    /// Target language (ISO 639, any form `isolang` accepts).
    #[arg(short = 'T', long = "target-lang")]
    pub target_lang: Option<String>,

    /// Cognate LCS-ratio threshold.
    #[arg(short = 'c', long = "cognate-threshold")]
    pub cognate_threshold: Option<f64>,

    /// Lower bound the cognate-threshold sweep steps down to.
    #[arg(short = 'r', long = "cognate-range")]
    pub cognate_range: Option<f64>,

    /// Minimum token character length admitted to the matcher.
    #[arg(short = 'l', long = "min-token-length")]
    pub min_token_length: Option<usize>,

    /// Minimum identical-run character length (`MINLENGTH`).
    #[arg(short = 'i', long = "min-match-length")]
    pub min_match_length: Option<u32>,

    /// Anchor-search window size at each document edge.
    #[arg(short = 'w', long = "window")]
    pub window: Option<usize>,

    /// Bilingual dictionary file (plain text or gzip-compressed).
    #[arg(short = 'd', long = "dictionary")]
    pub dictionary: Option<PathBuf>,

    /// Restrict matching to uppercase tokens.
    #[arg(short = 'u', long = "upper-case-only")]
    pub upper_case_only: bool,

    /// Character-class regex a token must match to be considered.
    #[arg(short = 's', long = "char-set")]
    pub char_set: Option<String>,

    /// Down-weight matches dominated by high-frequency tokens.
    #[arg(short = 'q', long = "word-freq")]
    pub use_word_freq: bool,

    /// Run the best-anchor search (C7) instead of a single unsynchronized pass.
    #[arg(short = 'b', long = "best-align")]
    pub best_align: bool,

    /// Candidate cap per anchor pool (alias of `-m`).
    #[arg(short = 'p', long = "max-candidates")]
    pub max_candidates: Option<usize>,

    /// Candidate cap per anchor pool (`MAX_MATCHES`).
    #[arg(short = 'm', long = "max-matches")]
    pub max_matches: Option<usize>,

    /// Fallback aligner executable name, resolved on `PATH` but never invoked.
    #[arg(short = 'f', long = "fallback")]
    pub fallback: Option<String>,

    /// Use the proportion scoring formula for the non-empty ratio `R`.
    #[arg(short = 'P', long = "proportion")]
    pub proportion: bool,

    /// Sweep the cognate threshold from 1.0 down to `cognate_range`.
    #[arg(long = "cognate-sweep")]
    pub cognate_sweep: bool,

    /// Disable the dictionary-lookup matching strategy.
    #[arg(long = "no-dictionary")]
    pub no_dictionary: bool,

    /// Disable the identical-token-run matching strategy.
    #[arg(long = "no-identical")]
    pub no_identical: bool,

    /// Disable the LCS-cognate matching strategy.
    #[arg(long = "no-cognates")]
    pub no_cognates: bool,

    /// Optional TOML file layering option overrides under CLI flags.
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// Verbose logging of self-corrections (non-positive slope, unsorted
    /// frames, time nudges).
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        SrtAlignArgs::command().debug_assert();
    }

    #[test]
    fn test_parses_positional_and_flags() {
        let args = SrtAlignArgs::parse_from([
            "srtalign",
            "-b",
            "-c",
            "0.8",
            "src.xml",
            "trg.xml",
        ]);
        assert!(args.best_align);
        assert_eq!(args.cognate_threshold, Some(0.8));
        assert_eq!(args.source, PathBuf::from("src.xml"));
        assert_eq!(args.target, PathBuf::from("trg.xml"));
    }
}
