//! Command line argument parsing for the readme-classifier CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_CONFIG_PATH;
use crate::logging::DEFAULT_LOG_PATH;

/// readme-classifier - label README sections with a trained multi-label model
#[derive(Parser, Debug, Clone)]
#[command(name = "readme-classifier")]
#[command(about = "Classify README sections stored in SQLite into section codes")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ClassifierArgs {
    /// INI configuration file
    #[arg(short, long, value_name = "CONFIG_FILE", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Log file (truncated on start)
    #[arg(long, value_name = "LOG_FILE", default_value = DEFAULT_LOG_PATH)]
    pub log_file: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Format of the run summary printed on stdout
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Subcommand to execute (defaults to classify)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl ClassifierArgs {
    /// Effective verbosity level (0=quiet, 1=normal, 2=verbose, 3+=trace).
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Classify)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Classify every section of the configured database
    Classify,

    /// Fit the model artifacts from a labelled CSV
    Train(TrainArgs),
}

/// Arguments for training
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
pub struct TrainArgs {
    /// Labelled section CSV
    #[arg(short, long, value_name = "LABELLED_CSV")]
    pub input: PathBuf,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_run_classify() {
        let args = ClassifierArgs::try_parse_from(["readme-classifier"]).unwrap();

        assert_eq!(args.config, PathBuf::from("../../config/config.cfg"));
        assert_eq!(
            args.log_file,
            PathBuf::from("../../log/classifier_classify_target.log")
        );
        assert_eq!(args.command(), Command::Classify);
        assert_eq!(args.verbosity(), 1);
        assert_eq!(args.output_format, OutputFormat::Human);
    }

    #[test]
    fn test_train_command() {
        let args = ClassifierArgs::try_parse_from([
            "readme-classifier",
            "--config",
            "conf/local.cfg",
            "train",
            "--input",
            "labelled.csv",
        ])
        .unwrap();

        assert_eq!(args.config, PathBuf::from("conf/local.cfg"));
        assert_eq!(
            args.command(),
            Command::Train(TrainArgs {
                input: PathBuf::from("labelled.csv")
            })
        );
    }

    #[test]
    fn test_verbosity_levels() {
        let args = ClassifierArgs::try_parse_from(["readme-classifier", "-vv"]).unwrap();
        assert_eq!(args.verbosity(), 3);

        let args = ClassifierArgs::try_parse_from(["readme-classifier", "-v", "-q"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_train_requires_input() {
        assert!(ClassifierArgs::try_parse_from(["readme-classifier", "train"]).is_err());
    }

    #[test]
    fn test_json_format() {
        let args =
            ClassifierArgs::try_parse_from(["readme-classifier", "--format", "json", "classify"])
                .unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
    }
}
