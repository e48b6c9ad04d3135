// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use clap::Args;

use morphpose_core::pose::{self, BoneVocabulary};
use morphpose_core::ut;

#[derive(Debug, Args)]
#[command(about = "Collect the union of bones across every 3D export under a directory.")]
pub struct BonesArgs {
    #[arg(
        short = 'i',
        long,
        help = "Directory searched recursively for .csv files with 3d in their name.",
        required = true
    )]
    pub input: Option<String>,

    #[arg(short = 'o', long, help = "Save the bones as a vocabulary file (.json).")]
    pub output: Option<String>,

    #[arg(short = 'v', long, help = "Verbose output.")]
    pub verbose: bool,
}

pub fn utils_bones(args: &BonesArgs) {
    let input = args.input.to_owned().unwrap_or_default();

    let paths = pose::collect_3d_exports(&input).unwrap_or_else(|err| {
        eprintln!("{}", err);
        std::process::exit(1);
    });

    if paths.is_empty() {
        eprintln!("[morphpose::utils::bones] ERROR: No 3D exports were detected.");
        std::process::exit(1);
    }

    ut::track::progress_log(
        &format!(
            "Detected {} 3D exports.",
            ut::track::thousands_format(paths.len())
        ),
        args.verbose,
    );

    let vocabulary = BoneVocabulary::from_bones(pose::bone_superset(&paths));

    for bone in vocabulary.iter() {
        println!("{}", bone);
    }

    if let Some(output) = &args.output {
        vocabulary.save(output).unwrap_or_else(|err| {
            eprintln!("{}", err);
            std::process::exit(1);
        });

        ut::track::progress_log(
            &format!("Saved {} bones to {}.", vocabulary.len(), output),
            args.verbose,
        );
    }
}
