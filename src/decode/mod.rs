//! Document decoder module
//!
//! Supports: JSON, JSONL, YAML
//!
//! # Overview
//!
//! Turns document text into the `serde_json::Value` tree that inference runs
//! on, optionally narrowing it to a sub-document with a record path. All
//! failures here happen before inference and name the offending source.

mod decoders;
mod reader;
mod types;

pub use decoders::{decoder_for, select_records, JsonDecoder, JsonlDecoder, YamlDecoder};
pub use reader::{decode_file, decode_str};
pub use types::DocumentDecoder;
