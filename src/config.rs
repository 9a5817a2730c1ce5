//! Driver configuration
//!
//! Settings for reading documents and writing results. Every field has a
//! default, so a config file only needs the settings it changes; command-line
//! flags are applied on top of whatever the file provides.
//!
//! ```yaml
//! input_format: jsonl
//! record_path: $.data.items
//! output_format: json
//! explain: true
//! ```

use crate::error::{Error, Result};
use crate::types::{InputFormat, OutputFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Driver configuration loaded from YAML or JSON
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// Input format; detected from the file extension when unset
    pub input_format: Option<InputFormat>,

    /// JSONPath selecting the part of each document to infer
    pub record_path: Option<String>,

    /// How results are written
    pub output_format: OutputFormat,

    /// Also list the locations of nodes that could not be inferred
    pub explain: bool,
}

impl DriverConfig {
    /// Create a config with every setting at its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a config file
    ///
    /// `.json` files are parsed as JSON, anything else as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Parse and validate a YAML config
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse config YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Failed to parse config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that serde cannot
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.record_path {
            if path.trim().is_empty() {
                return Err(Error::invalid_value("record_path", "cannot be empty"));
            }
            if !path.starts_with('$') {
                return Err(Error::invalid_value(
                    "record_path",
                    format!("'{path}' must start with '$'"),
                ));
            }
        }
        Ok(())
    }

    /// Input format to use for a file
    pub fn input_format_for(&self, path: &Path) -> InputFormat {
        self.input_format
            .or_else(|| InputFormat::from_path(path))
            .unwrap_or_default()
    }

    /// Set the input format
    #[must_use]
    pub fn with_input_format(mut self, format: InputFormat) -> Self {
        self.input_format = Some(format);
        self
    }

    /// Set the record path
    #[must_use]
    pub fn with_record_path(mut self, path: impl Into<String>) -> Self {
        self.record_path = Some(path.into());
        self
    }

    /// Set the output format
    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Enable or disable issue listing
    #[must_use]
    pub fn with_explain(mut self, explain: bool) -> Self {
        self.explain = explain;
        self
    }
}
