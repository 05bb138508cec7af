//! Output formatting for CLI commands.

use serde::Serialize;

use crate::cli::args::{ClassifierArgs, OutputFormat};
use crate::error::Result;

/// Render a command result in the requested format.
pub fn render_result<T: Serialize>(message: &str, result: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Human => render_human(message, result),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
    }
}

/// Print a command result on stdout unless running quiet.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &ClassifierArgs) -> Result<()> {
    if args.verbosity() == 0 && args.output_format == OutputFormat::Human {
        return Ok(());
    }
    println!("{}", render_result(message, result, args.output_format)?);
    Ok(())
}

fn render_human<T: Serialize>(message: &str, result: &T) -> Result<String> {
    let mut out = String::from(message);
    if let serde_json::Value::Object(map) = serde_json::to_value(result)? {
        for (key, value) in map {
            let value = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) if n.is_f64() => {
                    format!("{:.3}", n.as_f64().unwrap_or_default())
                }
                other => other.to_string(),
            };
            out.push_str(&format!("\n  {}: {value}", key.replace('_', " ")));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::RunSummary;
    use std::path::PathBuf;

    fn summary() -> RunSummary {
        RunSummary {
            rows_written: 12,
            output_filename: PathBuf::from("out.csv"),
            duration_seconds: 0.25,
        }
    }

    #[test]
    fn test_human_output() {
        let text = render_result("Classification finished", &summary(), OutputFormat::Human).unwrap();

        assert!(text.starts_with("Classification finished"));
        assert!(text.contains("rows written: 12"));
        assert!(text.contains("output filename: out.csv"));
        assert!(text.contains("duration seconds: 0.250"));
    }

    #[test]
    fn test_json_output() {
        let text = render_result("ignored", &summary(), OutputFormat::Json).unwrap();
        let parsed: RunSummary = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, summary());
    }
}
