//! Decoder types and traits
//!
//! Defines the core decoder abstraction.

use crate::error::Result;
use crate::types::InputFormat;
use serde_json::Value;

/// Trait for decoding document text into a JSON value tree
pub trait DocumentDecoder: Send + Sync {
    /// Decode the whole body into one value
    fn decode(&self, body: &str) -> Result<Value>;

    /// Format handled by this decoder
    fn format(&self) -> InputFormat;
}
