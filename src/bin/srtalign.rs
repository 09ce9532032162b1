//! `srtalign`: align two time-stamped subtitle documents by maximum
//! temporal overlap, optionally resynchronizing via lexical anchor points
//! first. See spec §4.5-§4.7 for the algorithm and §6 for the CLI surface.

use align_lib::cli::SrtAlignArgs;
use align_lib::config;
use align_lib::core::align::anchor::{self, AnchorPools};
use align_lib::core::align::overlap::{self, OverlapResult};
use align_lib::core::dictionary::{self, Dictionary};
use align_lib::core::fallback::{self, WhichFallback};
use align_lib::core::formats::xces;
use align_lib::core::formats::xml as xml_fmt;
use align_lib::core::interpolate;
use align_lib::core::lexical::MatcherOptions;
use align_lib::error::{AlignError, AlignResult};
use clap::Parser;
use regex::Regex;

fn main() {
    let args = SrtAlignArgs::parse();
    init_logger(args.verbose);

    match run(args) {
        Ok(xml) => print!("{xml}"),
        Err(e) => {
            eprintln!("{}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_logger(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    let _ = builder.try_init();
}

fn run(args: SrtAlignArgs) -> AlignResult<String> {
    let overrides = config::load_overrides(args.config.as_deref())?;

    let char_set_regex = args
        .char_set
        .as_deref()
        .map(Regex::new)
        .transpose()
        .map_err(|e| AlignError::config(format!("invalid --char-set regex: {e}")))?;

    let matcher_opts: MatcherOptions = overrides.matcher_options(
        !args.no_dictionary,
        !args.no_identical,
        !args.no_cognates,
        args.min_token_length,
        if args.upper_case_only { Some(true) } else { None },
        char_set_regex,
        if args.use_word_freq { Some(true) } else { None },
        args.min_match_length,
        args.cognate_threshold,
        args.cognate_range,
    );
    let anchor_opts = overrides.anchor_options(
        args.window,
        args.max_candidates.or(args.max_matches),
        args.best_align,
        args.proportion,
        args.cognate_sweep,
    );

    let dict = match &args.dictionary {
        Some(path) => Dictionary::load(path)?,
        None => Dictionary::empty(),
    };

    let mut src_doc = xml_fmt::read(&args.source)?;
    let mut trg_doc = xml_fmt::read(&args.target)?;

    interpolate::fill_times(&mut src_doc.sentences, 1.0, 0.0);
    interpolate::fill_times(&mut trg_doc.sentences, 1.0, 0.0);

    if !src_doc.is_sorted_by_start() {
        log::warn!("source document out of order by start time; sorting");
    }
    if !trg_doc.is_sorted_by_start() {
        log::warn!("target document out of order by start time; sorting");
    }
    src_doc.sort_by_start();
    trg_doc.sort_by_start();

    let src_freq = dictionary::word_freq(src_doc.sentences.iter().map(|s| s.tokens.as_slice()));
    let trg_freq = dictionary::word_freq(trg_doc.sentences.iter().map(|s| s.tokens.as_slice()));

    let outcome = if anchor_opts.cognate_sweep {
        anchor::cognate_sweep(
            &src_doc.sentences,
            &trg_doc.sentences,
            anchor_opts.window,
            anchor_opts.max_matches,
            &matcher_opts,
            &dict,
            &src_freq,
            &trg_freq,
            anchor_opts.proportion,
        )
    } else if anchor_opts.best_align {
        let pools: AnchorPools = anchor::find_anchors(
            &src_doc.sentences,
            &trg_doc.sentences,
            anchor_opts.window,
            anchor_opts.max_matches,
            &matcher_opts,
            &dict,
            &src_freq,
            &trg_freq,
        );
        anchor::best_anchor_search(&src_doc.sentences, &trg_doc.sentences, &pools, anchor_opts.proportion)
    } else {
        let result: OverlapResult = overlap::align(&src_doc.sentences, &trg_doc.sentences);
        let score_r = result.score_r(anchor_opts.proportion);
        anchor::BestAnchorResult { result, score_r, resynchronized: false }
    };

    fallback::apply_fallback_policy(outcome.score_r, args.fallback.as_deref(), &WhichFallback)?;

    let src_lang = args.source_lang.as_deref().and_then(normalize_lang);
    let trg_lang = args.target_lang.as_deref().and_then(normalize_lang);

    Ok(xces::write_with_langs(
        &outcome.result.links,
        &args.source.display().to_string(),
        &args.target.display().to_string(),
        src_lang.as_deref(),
        trg_lang.as_deref(),
    ))
}

/// Normalize a user-supplied language name/code to its ISO 639 alpha-3
/// form, logging (but not failing) if it isn't recognized.
fn normalize_lang(raw: &str) -> Option<String> {
    let resolved = isolang::Language::from_name(raw)
        .or_else(|| isolang::Language::from_639_1(raw))
        .or_else(|| isolang::Language::from_639_3(raw));
    match resolved {
        Some(lang) => Some(lang.to_639_3().to_string()),
        None => {
            log::warn!("'{raw}' is not a recognized ISO 639 language name or code");
            None
        }
    }
}
