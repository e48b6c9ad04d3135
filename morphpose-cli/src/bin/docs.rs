#![allow(clippy::all)]
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
    clap_markdown::print_help_markdown::<Cli>();
}
