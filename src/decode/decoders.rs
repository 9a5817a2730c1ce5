//! Decoder implementations
//!
//! Each decoder handles a specific document format.

use super::types::DocumentDecoder;
use crate::error::{Error, Result};
use crate::types::InputFormat;
use serde_json::Value;

// ============================================================================
// JSON Decoder
// ============================================================================

/// Single JSON document decoder
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder;

impl JsonDecoder {
    /// Create a new JSON decoder
    pub fn new() -> Self {
        Self
    }
}

impl DocumentDecoder for JsonDecoder {
    fn decode(&self, body: &str) -> Result<Value> {
        Ok(serde_json::from_str(body)?)
    }

    fn format(&self) -> InputFormat {
        InputFormat::Json
    }
}

// ============================================================================
// JSONL Decoder
// ============================================================================

/// JSON Lines decoder (one JSON value per line)
///
/// Lines are collected into a single array, so the result is inferred as a
/// list of records rather than merged.
#[derive(Debug, Clone, Default)]
pub struct JsonlDecoder;

impl JsonlDecoder {
    /// Create a new JSONL decoder
    pub fn new() -> Self {
        Self
    }
}

impl DocumentDecoder for JsonlDecoder {
    fn decode(&self, body: &str) -> Result<Value> {
        let mut records = Vec::new();

        for (line_num, line) in body.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let value: Value = serde_json::from_str(line)
                .map_err(|e| Error::Other(format!("line {}: {e}", line_num + 1)))?;

            records.push(value);
        }

        Ok(Value::Array(records))
    }

    fn format(&self) -> InputFormat {
        InputFormat::Jsonl
    }
}

// ============================================================================
// YAML Decoder
// ============================================================================

/// YAML document decoder
///
/// Mappings must have string keys to fit the JSON value model. JSON numbers
/// are finite, so `.inf`, `-.inf` and `.nan` are rejected rather than turned
/// into `null`.
#[derive(Debug, Clone, Default)]
pub struct YamlDecoder;

impl YamlDecoder {
    /// Create a new YAML decoder
    pub fn new() -> Self {
        Self
    }
}

impl DocumentDecoder for YamlDecoder {
    fn decode(&self, body: &str) -> Result<Value> {
        let document: serde_yaml::Value = serde_yaml::from_str(body)?;
        reject_non_finite(&document)?;
        Ok(serde_json::to_value(document)?)
    }

    fn format(&self) -> InputFormat {
        InputFormat::Yaml
    }
}

fn reject_non_finite(document: &serde_yaml::Value) -> Result<()> {
    let mut pending = vec![document];
    while let Some(value) = pending.pop() {
        match value {
            serde_yaml::Value::Number(n) if !n.is_finite() => {
                return Err(Error::Other(format!(
                    "non-finite float '{n}' has no JSON representation"
                )));
            }
            serde_yaml::Value::Sequence(items) => pending.extend(items),
            serde_yaml::Value::Mapping(map) => pending.extend(map.values()),
            serde_yaml::Value::Tagged(tagged) => pending.push(&tagged.value),
            _ => {}
        }
    }
    Ok(())
}

/// Decoder for an input format
pub fn decoder_for(format: InputFormat) -> Box<dyn DocumentDecoder> {
    match format {
        InputFormat::Json => Box::new(JsonDecoder::new()),
        InputFormat::Jsonl => Box::new(JsonlDecoder::new()),
        InputFormat::Yaml => Box::new(YamlDecoder::new()),
    }
}

// ============================================================================
// Record path selection
// ============================================================================

/// One step of a plain record path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathStep<'p> {
    Key(&'p str),
    Index(i64),
}

/// Narrow a decoded document to the part selected by `path`
///
/// Plain paths (`$`, `$.data.items`, `$.items[-1]`, `$['first name']`) select
/// a single value. Paths using wildcards, filters, slices, unions or recursive
/// descent go through jsonpath-rust and select the array of all matches.
pub fn select_records(value: &Value, path: &str) -> Result<Value> {
    let selected = match plain_steps(path)? {
        Some(steps) => walk_steps(value, &steps).cloned(),
        None => extract_with_jsonpath(value, path)?,
    };

    selected.ok_or_else(|| Error::RecordPath {
        path: path.to_string(),
    })
}

/// Split a plain path into steps
///
/// `Ok(None)` means the path needs the full JSONPath engine.
fn plain_steps(path: &str) -> Result<Option<Vec<PathStep<'_>>>> {
    let mut rest = path.strip_prefix('$').unwrap_or(path);
    let mut steps = Vec::new();
    let mut first = true;

    while !rest.is_empty() {
        if let Some(bracket) = rest.strip_prefix('[') {
            // Quoted key: ['name'] or ["name"]
            if let Some(quote) = bracket.chars().next().filter(|c| matches!(c, '\'' | '"')) {
                let body = &bracket[1..];
                let Some(end) = body.find(quote) else {
                    return Ok(None);
                };
                let Some(after) = body[end + 1..].strip_prefix(']') else {
                    return Ok(None);
                };
                steps.push(PathStep::Key(&body[..end]));
                rest = after;
            } else {
                let Some(end) = bracket.find(']') else {
                    return Ok(None);
                };
                let inner = bracket[..end].trim();
                if inner == "*" || inner.starts_with('?') || inner.contains([':', ',']) {
                    return Ok(None);
                }
                let index = inner.parse::<i64>().map_err(|_| {
                    Error::json_path(format!(
                        "Invalid record path '{path}': '{inner}' is not a list index"
                    ))
                })?;
                steps.push(PathStep::Index(index));
                rest = &bracket[end + 1..];
            }
        } else {
            let body = match rest.strip_prefix('.') {
                Some(body) => body,
                None if first => rest,
                None => {
                    return Err(Error::json_path(format!(
                        "Invalid record path '{path}': unexpected '{rest}'"
                    )))
                }
            };
            if body.starts_with('.') {
                // Recursive descent
                return Ok(None);
            }
            let end = body.find(['.', '[']).unwrap_or(body.len());
            let key = &body[..end];
            match key {
                "" => {
                    return Err(Error::json_path(format!(
                        "Invalid record path '{path}': empty key"
                    )))
                }
                "*" => return Ok(None),
                key => steps.push(PathStep::Key(key)),
            }
            rest = &body[end..];
        }
        first = false;
    }

    Ok(Some(steps))
}

/// Follow plain path steps; negative indices count from the end of a list
fn walk_steps<'a>(value: &'a Value, steps: &[PathStep<'_>]) -> Option<&'a Value> {
    let mut current = value;
    for step in steps {
        current = match *step {
            PathStep::Key(key) => current.as_object()?.get(key)?,
            PathStep::Index(index) => {
                let items = current.as_array()?;
                let idx = if index < 0 {
                    items
                        .len()
                        .checked_sub(usize::try_from(index.unsigned_abs()).ok()?)?
                } else {
                    usize::try_from(index).ok()?
                };
                items.get(idx)?
            }
        };
    }
    Some(current)
}

/// Extract matches using jsonpath-rust
fn extract_with_jsonpath(value: &Value, path: &str) -> Result<Option<Value>> {
    use jsonpath_rust::JsonPath;

    let jp = JsonPath::try_from(path)
        .map_err(|e| Error::json_path(format!("Invalid JSONPath '{path}': {e}")))?;

    match jp.find(value) {
        Value::Array(arr) if arr.is_empty() => Ok(None),
        Value::Null => Ok(None),
        other => Ok(Some(other)),
    }
}
