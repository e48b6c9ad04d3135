// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::path::PathBuf;

use clap::Args;

use morphpose_core::config::{self, AssembleConfig};
use morphpose_core::constant;
use morphpose_core::io::{self, RecordFormat};
use morphpose_core::pipeline;
use morphpose_core::pose::{BoneVocabulary, ImageResolver};
use morphpose_core::ut;

#[derive(Debug, Args)]
#[command(about = "Assemble per-frame datapoint records from 2D/3D pose exports and rendered images.")]
pub struct AssembleArgs {
    #[arg(
        short = 'i',
        long,
        help = "A coordinates_2d_ export or a directory searched recursively for them.",
        required = true
    )]
    pub input: Option<String>,

    #[arg(
        short = 'b',
        long,
        help = "Base directory of the rendered image tree.",
        required = true
    )]
    pub base: Option<String>,

    #[arg(
        short = 'o',
        long,
        help = "Output directory for records. Defaults to <base>/datapoints."
    )]
    pub output: Option<String>,

    #[arg(
        long,
        help = "Bone vocabulary file. Defaults to $MORPHPOSE_BONES or bones.json."
    )]
    pub bones: Option<String>,

    #[arg(
        short = 'k',
        long,
        help = "Key of the bone list inside the vocabulary file.",
        default_value = "all"
    )]
    pub key: Option<String>,

    #[arg(
        short = 'f',
        long,
        help = "Record format (json or zip).",
        default_value = "json"
    )]
    pub format: Option<String>,

    #[arg(long, help = "Write an index of records (.csv, .txt, .tsv, .parquet, .pq).")]
    pub index: Option<String>,

    #[arg(short = 't', long, help = "Number of threads.")]
    pub threads: Option<usize>,

    #[arg(short = 'v', long, help = "Verbose output.")]
    pub verbose: bool,
}

pub fn assemble(args: &AssembleArgs) {
    if let Some(threads) = args.threads {
        if threads < 1 {
            eprintln!("[morphpose::assemble] ERROR: Threads must be set to a positive integer if provided.");
            std::process::exit(1);
        }

        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .unwrap_or_else(|err| {
                eprintln!("[morphpose::assemble] ERROR: Could not configure thread pool: {}", err);
                std::process::exit(1);
            });
    }

    let format: RecordFormat = args
        .format
        .as_deref()
        .unwrap_or(constant::SUPPORTED_RECORD_FORMATS[0])
        .parse()
        .unwrap_or_else(|err| {
            eprintln!("{}", err);
            std::process::exit(1);
        });

    let index = args.index.to_owned().map(PathBuf::from);

    if let Some(index) = &index {
        let extension = index
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        if !constant::SUPPORTED_TABLE_FORMATS.contains(&extension.as_str()) {
            eprintln!(
                "[morphpose::assemble] ERROR: Invalid index extension. Must end with one of .csv, .txt, .tsv, .parquet, .pq."
            );
            std::process::exit(1);
        }
    }

    let input = args.input.to_owned().unwrap_or_default();
    let base = args.base.to_owned().unwrap_or_default();
    let key = args
        .key
        .to_owned()
        .unwrap_or(constant::VOCABULARY_KEY.to_string());

    let mut assemble_config = AssembleConfig::new(&base)
        .with_vocabulary_key(&key)
        .with_format(format);

    if let Some(output) = &args.output {
        assemble_config = assemble_config.with_output_dir(output);
    }

    let vocabulary_path = args
        .bones
        .to_owned()
        .map(PathBuf::from)
        .unwrap_or_else(config::get_vocabulary_path);

    let vocabulary = BoneVocabulary::open_key(&vocabulary_path, &assemble_config.vocabulary_key)
        .unwrap_or_else(|err| {
            eprintln!("{}", err);
            std::process::exit(1);
        });

    ut::track::progress_log(
        &format!(
            "Loaded {} bones from {}.",
            vocabulary.len(),
            vocabulary_path.display()
        ),
        args.verbose,
    );

    let paths = pipeline::discover_2d_exports(&input).unwrap_or_else(|err| {
        eprintln!("{}", err);
        std::process::exit(1);
    });

    if paths.is_empty() {
        eprintln!(
            "[morphpose::assemble] ERROR: No 2D exports were detected. Please check your input path."
        );
        std::process::exit(1);
    }

    ut::track::progress_log(
        &format!(
            "Detected {} 2D exports.",
            ut::track::thousands_format(paths.len())
        ),
        args.verbose,
    );

    let summary = pipeline::assemble_batch(
        &paths,
        &vocabulary,
        &ImageResolver::default(),
        &assemble_config,
        args.verbose,
    )
    .unwrap_or_else(|err| {
        eprintln!("{}", err);
        std::process::exit(1);
    });

    if args.verbose {
        println!();
    }

    ut::track::progress_log(
        &format!(
            "Complete. {} of {} records written across {} exports ({} with images) to {}.",
            ut::track::thousands_format(summary.written()),
            ut::track::thousands_format(summary.datapoints()),
            ut::track::thousands_format(summary.pairs.len()),
            ut::track::thousands_format(summary.images()),
            assemble_config.output_dir.display()
        ),
        args.verbose,
    );

    if let Some(index) = index {
        let mut df = io::index_table(&summary.index()).unwrap_or_else(|err| {
            eprintln!("{}", err);
            std::process::exit(1);
        });

        io::write_table(&mut df, &index).unwrap_or_else(|err| {
            eprintln!("{}", err);
            std::process::exit(1);
        });

        ut::track::progress_log(
            &format!("Index written to {}.", index.display()),
            args.verbose,
        );
    }

    if summary.pairs.is_empty() {
        eprintln!(
            "[morphpose::assemble] ERROR: All {} exports failed to assemble.",
            summary.failures.len()
        );
        std::process::exit(1);
    }
}
