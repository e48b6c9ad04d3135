// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::path::PathBuf;

use clap::Args;

use morphpose_core::config;
use morphpose_core::pose::{BoneVocabulary, PoseTable, PresenceMask, SourceMetadata};

#[derive(Debug, Args)]
#[command(about = "Print the joint presence mask of a single pose export.")]
pub struct MaskArgs {
    #[arg(short = 'i', long, help = "Pose export (.csv).", required = true)]
    pub input: Option<String>,

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
}

pub fn utils_mask(args: &MaskArgs) {
    let input = args.input.to_owned().unwrap_or_default();
    let key = args.key.to_owned().unwrap_or_default();

    let vocabulary_path = args
        .bones
        .to_owned()
        .map(PathBuf::from)
        .unwrap_or_else(config::get_vocabulary_path);

    let vocabulary = BoneVocabulary::open_key(&vocabulary_path, &key).unwrap_or_else(|err| {
        eprintln!("{}", err);
        std::process::exit(1);
    });

    let bones = PoseTable::open(&input)
        .and_then(|table| table.bones())
        .unwrap_or_else(|err| {
            eprintln!("{}", err);
            std::process::exit(1);
        });

    let mask = PresenceMask::generate(&vocabulary, &bones);
    let metadata = SourceMetadata::from_path(&input);

    let label = metadata
        .subject
        .map(|subject| subject.to_lowercase())
        .unwrap_or(metadata.file_name);

    println!("{}: {}", label, mask);
}
