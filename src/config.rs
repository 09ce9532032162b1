//! Layered runtime options: built-in defaults, an optional TOML override
//! file plus `ALIGN_*` environment variables, then explicit CLI flags
//! (highest precedence), assembled as three option groups: the lexical
//! matcher, the anchor search, and the length-DP penalties.

use crate::core::align::length::LengthOptions;
use crate::core::lexical::MatcherOptions;
use crate::error::{AlignError, AlignResult};
use config::{Config as ConfigSource, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Anchor-search parameters (C7), independent of the per-token matcher
/// filters carried in [`MatcherOptions`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorOptions {
    /// `WINDOW`: sentences considered at each document edge.
    pub window: usize,
    /// `MAX_MATCHES`: candidate cap per pool (`0` = unbounded).
    pub max_matches: usize,
    /// Whether to run the best-anchor search at all (`-b`).
    pub best_align: bool,
    /// Use the proportion scoring formula for `R` (`-P`).
    pub proportion: bool,
    /// Sweep `cognate_threshold` down to `cognate_range` (cognate-sweep
    /// variant of C7).
    pub cognate_sweep: bool,
}

impl Default for AnchorOptions {
    fn default() -> Self {
        Self {
            window: 25,
            max_matches: 10,
            best_align: false,
            proportion: false,
            cognate_sweep: false,
        }
    }
}

/// Optional overrides for every tunable field across the three option
/// groups. Every field defaults to `None`, so a TOML file only needs to
/// name what it changes; anything left unset falls through to the CLI flag
/// and, failing that, the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileOverrides {
    pub min_token_length: Option<usize>,
    pub upper_case_only: Option<bool>,
    pub use_word_freq: Option<bool>,
    pub min_match_length: Option<u32>,
    pub cognate_threshold: Option<f64>,
    pub cognate_range: Option<f64>,
    pub window: Option<usize>,
    pub max_matches: Option<usize>,
    pub length_penalty: Option<f64>,
    pub not_eos_penalty: Option<f64>,
    pub soft_max_line_length: Option<usize>,
    pub hard_max_line_length: Option<usize>,
}

/// Load an optional TOML override file plus `ALIGN_*` environment
/// variables into a [`FileOverrides`]. Passing `None` still picks up
/// environment overrides, since that source is layered in unconditionally.
pub fn load_overrides(path: Option<&Path>) -> AlignResult<FileOverrides> {
    let mut builder =
        ConfigSource::builder().add_source(Environment::with_prefix("ALIGN").separator("_"));
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }
    let built = builder
        .build()
        .map_err(|e| AlignError::config(format!("failed to build configuration: {e}")))?;
    built
        .try_deserialize()
        .map_err(|e| AlignError::config(format!("invalid configuration: {e}")))
}

/// Resolve one field: an explicit CLI flag wins, then the file/env layer,
/// then the built-in default.
fn resolve<T>(cli: Option<T>, file: Option<T>, default: T) -> T {
    cli.or(file).unwrap_or(default)
}

impl FileOverrides {
    /// Assemble a [`MatcherOptions`] from this layer, CLI flags, and the
    /// type's defaults. `use_dictionary`/`use_identical`/`use_cognates` are
    /// plain CLI booleans (no corresponding file override) since they are
    /// feature toggles rather than tuning knobs.
    #[allow(clippy::too_many_arguments)]
    pub fn matcher_options(
        &self,
        use_dictionary: bool,
        use_identical: bool,
        use_cognates: bool,
        cli_min_token_length: Option<usize>,
        cli_upper_case_only: Option<bool>,
        char_set_regex: Option<regex::Regex>,
        cli_use_word_freq: Option<bool>,
        cli_min_match_length: Option<u32>,
        cli_cognate_threshold: Option<f64>,
        cli_cognate_range: Option<f64>,
    ) -> MatcherOptions {
        let default = MatcherOptions::default();
        MatcherOptions {
            use_dictionary,
            use_identical,
            use_cognates,
            min_token_length: resolve(cli_min_token_length, self.min_token_length, default.min_token_length),
            upper_case_only: resolve(cli_upper_case_only, self.upper_case_only, default.upper_case_only),
            char_set_regex,
            use_word_freq: resolve(cli_use_word_freq, self.use_word_freq, default.use_word_freq),
            min_match_length: resolve(cli_min_match_length, self.min_match_length, default.min_match_length),
            cognate_threshold: resolve(cli_cognate_threshold, self.cognate_threshold, default.cognate_threshold),
            cognate_range: resolve(cli_cognate_range, self.cognate_range, default.cognate_range),
        }
    }

    /// Assemble [`AnchorOptions`] from this layer, CLI flags, and defaults.
    pub fn anchor_options(
        &self,
        cli_window: Option<usize>,
        cli_max_matches: Option<usize>,
        best_align: bool,
        proportion: bool,
        cognate_sweep: bool,
    ) -> AnchorOptions {
        let default = AnchorOptions::default();
        AnchorOptions {
            window: resolve(cli_window, self.window, default.window),
            max_matches: resolve(cli_max_matches, self.max_matches, default.max_matches),
            best_align,
            proportion,
            cognate_sweep,
        }
    }

    /// Assemble [`LengthOptions`] from this layer, CLI flags, and defaults.
    pub fn length_options(
        &self,
        cli_length_penalty: Option<f64>,
        cli_not_eos_penalty: Option<f64>,
    ) -> LengthOptions {
        let default = LengthOptions::default();
        LengthOptions {
            length_penalty: resolve(cli_length_penalty, self.length_penalty, default.length_penalty),
            not_eos_penalty: resolve(cli_not_eos_penalty, self.not_eos_penalty, default.not_eos_penalty),
            soft_max_line_length: resolve(
                None,
                self.soft_max_line_length,
                default.soft_max_line_length,
            ),
            hard_max_line_length: resolve(
                None,
                self.hard_max_line_length,
                default.hard_max_line_length,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_file_uses_defaults() {
        let overrides = FileOverrides::default();
        let opts = overrides.length_options(None, None);
        assert_eq!(opts.length_penalty, LengthOptions::default().length_penalty);
    }

    #[test]
    fn test_cli_wins_over_file_layer() {
        let overrides = FileOverrides { length_penalty: Some(0.9), ..Default::default() };
        let opts = overrides.length_options(Some(0.1), None);
        assert_eq!(opts.length_penalty, 0.1);
    }

    #[test]
    fn test_file_layer_wins_over_default() {
        let overrides = FileOverrides { length_penalty: Some(0.9), ..Default::default() };
        let opts = overrides.length_options(None, None);
        assert_eq!(opts.length_penalty, 0.9);
    }

    #[test]
    fn test_load_overrides_from_toml_file() {
        use std::io::Write;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("align.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "window = 40\nmax_matches = 3").unwrap();
        let overrides = load_overrides(Some(&path)).unwrap();
        assert_eq!(overrides.window, Some(40));
        assert_eq!(overrides.max_matches, Some(3));
    }

    #[test]
    fn test_missing_required_file_is_config_error() {
        let err = load_overrides(Some(Path::new("/no/such/align.toml"))).unwrap_err();
        assert!(matches!(err, AlignError::Config(_)));
    }
}
