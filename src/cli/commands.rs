//! Command implementations for the readme-classifier CLI.

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::ClassifierConfig;
use crate::error::Result;
use crate::pipeline;
use crate::training;

/// Execute a CLI command.
pub fn execute_command(args: &ClassifierArgs) -> Result<()> {
    let config = ClassifierConfig::load(&args.config)?;

    match args.command() {
        Command::Classify => classify(&config, args),
        Command::Train(train_args) => train(&config, &train_args, args),
    }
}

fn classify(config: &ClassifierConfig, cli_args: &ClassifierArgs) -> Result<()> {
    let summary = pipeline::run(config)?;
    output_result("Classification finished", &summary, cli_args)
}

fn train(config: &ClassifierConfig, args: &TrainArgs, cli_args: &ClassifierArgs) -> Result<()> {
    let summary = training::train(config, &args.input)?;
    output_result("Training finished", &summary, cli_args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClassifierError;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("absent.cfg");
        let args = ClassifierArgs::try_parse_from([
            "readme-classifier",
            "--config",
            config.to_str().unwrap(),
        ])
        .unwrap();

        let err = execute_command(&args).unwrap_err();
        assert!(matches!(err, ClassifierError::Config(_)));
    }
}
