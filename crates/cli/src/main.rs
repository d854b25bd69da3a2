use std::process::ExitCode;

use clap::Parser;

mod commands;
mod prompt;

use commands::Command;
use fattr_runtime::{PROGRAM_NAME, logging};

#[derive(Debug, Parser)]
#[command(name = PROGRAM_NAME, version, about = "Inspect and change inode attribute flags")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    match cli.command {
        Command::Show(args) => commands::show::run(args),
        Command::Apply(args) => commands::apply::run(args),
        Command::Edit(args) => commands::edit::run(args),
    }
}
