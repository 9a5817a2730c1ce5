//! Common types used throughout json-shape
//!
//! Small enums shared by the configuration file and the command line.

use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Input Format
// ============================================================================

/// Text format of an input document
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// A single JSON document (default)
    #[default]
    Json,
    /// JSON Lines, one value per line, inferred as a list
    Jsonl,
    /// A single YAML document
    Yaml,
}

impl InputFormat {
    /// Guess the format from a file extension
    ///
    /// Unknown or missing extensions yield `None`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(InputFormat::Json),
            "jsonl" | "ndjson" => Some(InputFormat::Jsonl),
            "yaml" | "yml" => Some(InputFormat::Yaml),
            _ => None,
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Json => write!(f, "json"),
            InputFormat::Jsonl => write!(f, "jsonl"),
            InputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

// ============================================================================
// Output Format
// ============================================================================

/// How an inferred schema is written out
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented human-readable tree
    #[default]
    Tree,
    /// Pretty-printed JSON
    Json,
}
