// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use clap::{Args, Subcommand};

mod bones;
mod count;
mod mask;

use bones::{BonesArgs, utils_bones};
use count::{CountArgs, utils_count};
use mask::{MaskArgs, utils_mask};

#[derive(Debug, Args)]
#[command(about = "Read-only queries over pose exports and bone vocabularies.")]
#[command(args_conflicts_with_subcommands = true)]
#[command(arg_required_else_help = true)]
#[command(flatten_help = true)]
pub struct UtilsArgs {
    #[command(subcommand)]
    command: Option<UtilsCommands>,
}

#[derive(Debug, Subcommand)]
enum UtilsCommands {
    Bones(BonesArgs),
    Count(CountArgs),
    Mask(MaskArgs),
}

pub fn utils(args: &UtilsArgs) {
    match args.command.as_ref() {
        Some(UtilsCommands::Bones(bones_args)) => utils_bones(bones_args),
        Some(UtilsCommands::Count(count_args)) => utils_count(count_args),
        Some(UtilsCommands::Mask(mask_args)) => utils_mask(mask_args),
        None => {}
    }
}
