//! CLI module
//!
//! Command-line driver: `json-shape [OPTIONS] <PATH>...`
//!
//! Decodes each document, infers its schema and writes the result to stdout.
//! A document that cannot be decoded fails the run with a message naming it.

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::{infer_file, infer_files, render_reports, Report, Runner};
