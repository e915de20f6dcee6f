use std::process::ExitCode;

use clap::Parser;

mod commands;
mod input;
mod printer;

use commands::Command;
use jsonbatch_runtime::logging;

#[derive(Debug, Parser)]
#[command(
    name = "jsonbatch",
    version,
    about = "Split JSON records into sink-sized batches",
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    match cli.command {
        Command::Validate(args) => commands::validate::run(args),
        Command::Size(args) => commands::size::run(args),
        Command::Sort(args) => commands::size::run_sort(args),
        Command::Plan(args) => commands::plan::run(args),
        Command::Dispatch(args) => commands::dispatch::run(args),
        Command::History(args) => commands::history::run(args),
    }
}
