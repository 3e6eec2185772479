use clap::Parser;
use rallyscan::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
