//! Error types for json-shape
//!
//! Only the driver can fail: reading files, decoding documents, selecting
//! record paths and loading configuration. Inference itself never returns an
//! error; ambiguous shapes are ordinary [`crate::schema::SchemaNode`] variants.

use thiserror::Error;

/// The main error type for json-shape
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Decoding Errors
    // ============================================================================
    #[error("Failed to decode '{path}': {message}")]
    Decode { path: String, message: String },

    #[error("JSONPath error: {message}")]
    JsonPath { message: String },

    #[error("Record path '{path}' matched nothing")]
    RecordPath { path: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a decode error for the given source
    pub fn decode(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a JSONPath error
    pub fn json_path(message: impl Into<String>) -> Self {
        Self::JsonPath {
            message: message.into(),
        }
    }

    /// Check if this error happened while turning input text into a value tree
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Error::Decode { .. } | Error::JsonParse(_) | Error::YamlParse(_)
        )
    }
}

/// Result type alias for json-shape
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::decode("data.json", "expected value at line 1 column 1");
        assert_eq!(
            err.to_string(),
            "Failed to decode 'data.json': expected value at line 1 column 1"
        );

        let err = Error::invalid_value("record_path", "must start with '$'");
        assert_eq!(
            err.to_string(),
            "Invalid config value for 'record_path': must start with '$'"
        );
    }

    #[test]
    fn test_json_path_error() {
        let err = Error::json_path("Invalid record path '$.a[x]'");
        assert!(matches!(err, Error::JsonPath { .. }));
        assert!(!err.is_decode_error());
        assert_eq!(err.to_string(), "JSONPath error: Invalid record path '$.a[x]'");
    }

    #[test]
    fn test_is_decode_error() {
        assert!(Error::decode("a.json", "bad").is_decode_error());

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(Error::from(json_err).is_decode_error());

        assert!(!Error::config("test").is_decode_error());
        assert!(!Error::FileNotFound {
            path: "missing.json".to_string()
        }
        .is_decode_error());
    }
}
