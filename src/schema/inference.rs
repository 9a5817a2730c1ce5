//! Schema inference from JSON values

use super::types::SchemaNode;
use serde_json::Value;

/// Pending work for the inference loop
enum Frame<'a> {
    /// Classify this value, scheduling its children first
    Enter(&'a Value),
    /// Combine the last `n` results into a list schema
    ExitList(usize),
    /// Combine the last `keys.len()` results into a record schema
    ExitRecord(Vec<&'a str>),
}

/// Infer the structural schema of a JSON value
///
/// Total over every value: shapes that cannot be determined come back as
/// [`SchemaNode::EmptyCantInfer`] or [`SchemaNode::NonHomogeneousCantParse`].
/// Runs on an explicit work stack, so input depth is bounded by memory rather
/// than by the call stack.
pub fn infer(value: &Value) -> SchemaNode {
    let mut frames = vec![Frame::Enter(value)];
    let mut results: Vec<SchemaNode> = Vec::new();

    while let Some(frame) = frames.pop() {
        match frame {
            Frame::Enter(value) => match value {
                Value::Null => results.push(SchemaNode::Null),
                Value::Bool(_) => results.push(SchemaNode::Bool),
                Value::Number(n) if n.is_i64() || n.is_u64() => results.push(SchemaNode::Int),
                Value::Number(_) => results.push(SchemaNode::Float),
                Value::String(_) => results.push(SchemaNode::String),
                Value::Array(items) => {
                    frames.push(Frame::ExitList(items.len()));
                    // Reversed so children are classified in source order
                    frames.extend(items.iter().rev().map(Frame::Enter));
                }
                Value::Object(map) => {
                    frames.push(Frame::ExitRecord(map.keys().map(String::as_str).collect()));
                    frames.extend(map.values().rev().map(Frame::Enter));
                }
            },
            Frame::ExitList(len) => {
                let start = results.len() - len;
                let node = classify_list(results.drain(start..));
                results.push(node);
            }
            Frame::ExitRecord(keys) => {
                let start = results.len() - keys.len();
                let node = SchemaNode::dict(
                    keys.into_iter()
                        .map(str::to_owned)
                        .zip(results.drain(start..)),
                );
                results.push(node);
            }
        }
    }

    results.pop().unwrap_or(SchemaNode::EmptyCantInfer)
}

/// Combine the inferred schemas of a list's elements into the list's schema
///
/// Every candidate is consumed. `EmptyCantInfer` candidates carry no opinion
/// and are skipped. A `NonHomogeneousCantParse` candidate, or two structurally
/// different candidates, make the whole list non-homogeneous. With nothing
/// left the list is `EmptyCantInfer`.
pub fn classify_list<I>(candidates: I) -> SchemaNode
where
    I: IntoIterator<Item = SchemaNode>,
{
    let mut element: Option<SchemaNode> = None;
    let mut mixed = false;

    for candidate in candidates {
        match candidate {
            SchemaNode::EmptyCantInfer => {}
            SchemaNode::NonHomogeneousCantParse => mixed = true,
            candidate => match &element {
                None => element = Some(candidate),
                Some(existing) if *existing == candidate => {}
                Some(_) => mixed = true,
            },
        }
    }

    match element {
        _ if mixed => SchemaNode::NonHomogeneousCantParse,
        Some(element) => SchemaNode::list(element),
        None => SchemaNode::EmptyCantInfer,
    }
}
