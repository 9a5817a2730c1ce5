//! Located document module
//!
//! A decoded JSON value annotated with where every node sits, so inference
//! results can be reported against their position in the source.
//!
//! # Overview
//!
//! - `Location` / `Segment` - path of list indices and record keys from the root
//! - `Document` - value tree with per-node locations and list classification
//! - `Issue` - location of a node whose shape could not be inferred

mod parser;
mod types;

pub use types::{Document, DocumentNode, Issue, Location, Segment};

#[cfg(test)]
mod tests;
