//! `mt2srt`: project a time-stamped template's frames onto a flat
//! translation text read from standard input, via the length-based DP
//! aligner (C8), emitting SRT to standard output. See spec §4.7.

use align_lib::cli::{Mt2SrtArgs, TemplateFormat};
use align_lib::config;
use align_lib::core::align::length::{self, LengthOptions};
use align_lib::core::formats::srt::{self, SrtBlock};
use align_lib::core::formats::xml as xml_fmt;
use align_lib::core::formats::Document;
use align_lib::core::interpolate;
use align_lib::error::AlignResult;
use clap::Parser;
use std::io::Read;

fn main() {
    let args = Mt2SrtArgs::parse();
    init_logger(args.verbose);

    match run(args) {
        Ok(text) => print!("{text}"),
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

fn run(args: Mt2SrtArgs) -> AlignResult<String> {
    let overrides = config::load_overrides(args.config.as_deref())?;
    let opts: LengthOptions = overrides.length_options(args.length_penalty, args.not_eos_penalty);

    let mut template = read_template(&args.template, args.input_format)?;
    if !template.is_sorted_by_start() {
        log::warn!("template out of order by start time; sorting");
    }
    template.sort_by_start();

    let mut translation = String::new();
    std::io::stdin()
        .read_to_string(&mut translation)
        .map_err(align_lib::error::AlignError::Io)?;

    let fragments = length::fragment_translation(&translation, &opts);
    let (assignments, _move_counts) = length::project(&template.sentences, &fragments, &opts)?;

    let blocks: Vec<SrtBlock> = assignments
        .iter()
        .map(|assignment| {
            let frame = &template.sentences[assignment.template_idx];
            let joined = fragments[assignment.fragment_range.clone()]
                .iter()
                .map(|f| f.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            let wrapped = length::wrap_line(&joined, opts.soft_max_line_length, opts.hard_max_line_length);
            SrtBlock {
                index: assignment.template_idx + 1,
                start: frame.start,
                end: frame.end,
                text: wrapped,
            }
        })
        .collect();

    Ok(srt::write(&blocks))
}

fn read_template(path: &std::path::Path, format: TemplateFormat) -> AlignResult<Document> {
    match format {
        TemplateFormat::Srt => srt::read(path),
        TemplateFormat::Xml => {
            let mut doc = xml_fmt::read(path)?;
            interpolate::fill_times(&mut doc.sentences, 1.0, 0.0);
            Ok(doc)
        }
    }
}
