//! CLI arguments and parsing

use crate::config::DriverConfig;
use crate::error::Result;
use crate::types::{InputFormat, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

/// Infer the structural schema of JSON documents
#[derive(Parser, Debug)]
#[command(name = "json-shape")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Documents to infer (JSON, JSONL or YAML)
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Output format [default: tree]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Input format [default: detect from extension]
    #[arg(short, long)]
    pub input: Option<InputFormat>,

    /// JSONPath selecting the part of each document to infer
    #[arg(short, long, value_name = "JSONPATH")]
    pub path: Option<String>,

    /// List the locations of values whose shape could not be inferred
    #[arg(short, long)]
    pub explain: bool,

    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the effective driver config: file settings overridden by flags
    pub fn driver_config(&self) -> Result<DriverConfig> {
        let mut config = match &self.config {
            Some(path) => DriverConfig::load(path)?,
            None => DriverConfig::new(),
        };

        if let Some(format) = self.format {
            config = config.with_output_format(format);
        }
        if let Some(input) = self.input {
            config = config.with_input_format(input);
        }
        if let Some(path) = &self.path {
            config = config.with_record_path(path.clone());
        }
        if self.explain {
            config = config.with_explain(true);
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_single_positional_path() {
        let cli = Cli::try_parse_from(["json-shape", "data.json"]).unwrap();
        assert_eq!(cli.paths, vec![PathBuf::from("data.json")]);

        let config = cli.driver_config().unwrap();
        assert_eq!(config, DriverConfig::new());
    }

    #[test]
    fn test_path_is_required() {
        assert!(Cli::try_parse_from(["json-shape"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "json-shape",
            "-f",
            "json",
            "--input",
            "yaml",
            "--path",
            "$.items",
            "-e",
            "a.yml",
            "b.yml",
        ])
        .unwrap();

        let config = cli.driver_config().unwrap();
        assert_eq!(cli.paths.len(), 2);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.input_format, Some(InputFormat::Yaml));
        assert_eq!(config.record_path.as_deref(), Some("$.items"));
        assert!(config.explain);
    }

    #[test]
    fn test_invalid_record_path_flag() {
        let cli = Cli::try_parse_from(["json-shape", "-p", "items", "a.json"]).unwrap();
        assert!(cli.driver_config().is_err());
    }
}
