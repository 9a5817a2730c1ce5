//! Reading documents from text and files

use super::decoders::{decoder_for, select_records};
use crate::config::DriverConfig;
use crate::error::{Error, Result};
use crate::types::InputFormat;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Decode document text, then apply the optional record path
///
/// `source` names the input in decode errors.
pub fn decode_str(
    source: &str,
    body: &str,
    format: InputFormat,
    record_path: Option<&str>,
) -> Result<Value> {
    let decoder = decoder_for(format);
    debug!(source, format = %decoder.format(), bytes = body.len(), "Decoding document");
    let value = decoder
        .decode(body)
        .map_err(|e| Error::decode(source, decode_message(e)))?;

    match record_path {
        Some(path) => {
            debug!(source, path, "Selecting records");
            select_records(&value, path)
        }
        None => Ok(value),
    }
}

/// Read and decode a document file according to the driver config
pub async fn decode_file(path: &Path, config: &DriverConfig) -> Result<Value> {
    let source = path.display().to_string();
    let body = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: source.clone(),
            }
        } else {
            Error::decode(&source, e.to_string())
        }
    })?;

    let format = config.input_format_for(path);
    decode_str(&source, &body, format, config.record_path.as_deref())
}

/// Message of the underlying parser error, without our own prefix
fn decode_message(err: Error) -> String {
    match err {
        Error::JsonParse(e) => e.to_string(),
        Error::YamlParse(e) => e.to_string(),
        other => other.to_string(),
    }
}
