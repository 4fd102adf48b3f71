use clap::Parser;
use stockrank::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
