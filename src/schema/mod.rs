//! Schema inference module
//!
//! Infers the structural shape of a decoded JSON value.
//!
//! # Features
//!
//! - **Scalar Classification**: null, bool, int, float and string markers
//! - **Homogeneous Lists**: one element schema shared by every inferrable item
//! - **Sorted Records**: record fields ordered by key, independent of source order
//! - **In-band Ambiguity**: empty and mixed lists are schema variants, not errors

mod inference;
mod render;
mod types;

pub use inference::{classify_list, infer};
pub use types::SchemaNode;
