// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use clap::Args;

use morphpose_core::pose;
use morphpose_core::ut;

#[derive(Debug, Args)]
#[command(about = "Count bone occurrences across every 3D export under a directory.")]
pub struct CountArgs {
    #[arg(
        short = 'i',
        long,
        help = "Directory searched recursively for .csv files with 3d in their name.",
        required = true
    )]
    pub input: Option<String>,

    #[arg(short = 'v', long, help = "Verbose output.")]
    pub verbose: bool,
}

pub fn utils_count(args: &CountArgs) {
    let input = args.input.to_owned().unwrap_or_default();

    let paths = pose::collect_3d_exports(&input).unwrap_or_else(|err| {
        eprintln!("{}", err);
        std::process::exit(1);
    });

    if paths.is_empty() {
        eprintln!("[morphpose::utils::count] ERROR: No 3D exports were detected.");
        std::process::exit(1);
    }

    ut::track::progress_log(
        &format!(
            "Detected {} 3D exports.",
            ut::track::thousands_format(paths.len())
        ),
        args.verbose,
    );

    for (bone, count) in pose::bone_counts(&paths) {
        println!("{}\t{}", bone, count);
    }
}
