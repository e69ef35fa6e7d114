use clap::Parser;
use sortdir::cli::{Cli, run_cli};
use sortdir::output::OutputFormatter;
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(message) = run_cli(cli) {
        OutputFormatter::error(&message);
        process::exit(1);
    }
}
