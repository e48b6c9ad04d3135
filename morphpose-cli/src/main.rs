// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

use clap::{Parser, Subcommand};
use morphpose_cli::{assemble, utils};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Assemble(assemble::AssembleArgs),
    Utils(utils::UtilsArgs),
}

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Assemble(assemble_args)) => assemble::assemble(assemble_args),
        Some(Commands::Utils(utils_args)) => utils::utils(utils_args),
        None => {}
    }
}
