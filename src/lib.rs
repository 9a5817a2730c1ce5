// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # json-shape
//!
//! Structural type inference for decoded JSON documents.
//!
//! ## Features
//!
//! - **Scalar Kinds**: null, bool, int, float, string
//! - **Homogeneous Lists**: one element schema per list, empty elements ignored
//! - **Sorted Records**: field order independent of the source document
//! - **Ambiguity as Data**: empty and mixed lists are schema variants, not errors
//! - **Located Documents**: report where uninferrable values sit (`$.a.b[0]`)
//!
//! ## Quick Start
//!
//! ```rust
//! use json_shape::{infer, SchemaNode};
//! use serde_json::json;
//!
//! let schema = infer(&json!({"ids": [1, 2], "tags": []}));
//!
//! assert_eq!(
//!     schema,
//!     SchemaNode::dict([
//!         ("ids".to_string(), SchemaNode::list(SchemaNode::Int)),
//!         ("tags".to_string(), SchemaNode::EmptyCantInfer),
//!     ])
//! );
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────┐
//! │  decode  │──▶│ serde_json:: │──▶│ schema::infer│──▶│  render  │
//! │ json/    │   │    Value     │   │  SchemaNode  │   │ tree/json│
//! │ jsonl/   │   └──────┬───────┘   └──────────────┘   └──────────┘
//! │ yaml     │          │
//! └──────────┘          ▼
//!               ┌──────────────┐
//!               │   document   │  locations + issues (--explain)
//!               └──────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Input and output formats
pub mod types;

/// Driver configuration
pub mod config;

/// Schema inference from JSON values
pub mod schema;

/// Decoded documents annotated with node locations
pub mod document;

/// Document decoders (JSON, JSONL, YAML)
pub mod decode;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::DriverConfig;
pub use document::{Document, Location};
pub use error::{Error, Result};
pub use schema::{infer, SchemaNode};
pub use types::{InputFormat, OutputFormat};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
