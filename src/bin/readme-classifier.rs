//! readme-classifier CLI binary.

use std::process;

use anyhow::Context;
use clap::Parser;

use readme_classifier::cli::args::ClassifierArgs;
use readme_classifier::cli::commands::execute_command;
use readme_classifier::logging::init_logging;

fn main() {
    let args = ClassifierArgs::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(args: &ClassifierArgs) -> anyhow::Result<()> {
    init_logging(&args.log_file, args.verbosity())
        .with_context(|| format!("cannot set up logging to {}", args.log_file.display()))?;

    execute_command(args)?;
    Ok(())
}
