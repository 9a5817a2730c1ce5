//! Human-readable tree rendering of inferred schemas

use super::types::SchemaNode;
use std::fmt;

const INDENT: usize = 2;

impl fmt::Display for SchemaNode {
    /// Writes one node per line; record fields are indented under their dict.
    ///
    /// ```text
    /// dict
    ///   id: int
    ///   tags: list of string
    ///   owner: dict
    ///     name: string
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self, 0)
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &SchemaNode, indent: usize) -> fmt::Result {
    // Lists of lists collapse onto one line: "list of list of int"
    let mut current = node;
    while let SchemaNode::List(element) = current {
        write!(f, "list of ")?;
        current = &**element;
    }

    match current {
        SchemaNode::Dict(fields) if fields.is_empty() => write!(f, "dict {{}}"),
        SchemaNode::Dict(fields) => {
            write!(f, "dict")?;
            for (key, schema) in fields {
                write!(f, "\n{:width$}{}: ", "", display_key(key), width = indent + INDENT)?;
                write_node(f, schema, indent + INDENT)?;
            }
            Ok(())
        }
        SchemaNode::EmptyCantInfer => write!(f, "<empty: cannot infer>"),
        SchemaNode::NonHomogeneousCantParse => write!(f, "<non-homogeneous: cannot parse>"),
        scalar => write!(f, "{}", scalar.name()),
    }
}

/// Quote keys that would not read back unambiguously
fn display_key(key: &str) -> String {
    let plain = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '$' | '@'));
    if plain {
        key.to_string()
    } else {
        serde_json::Value::String(key.to_string()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_scalars_and_sentinels() {
        assert_eq!(SchemaNode::Int.to_string(), "int");
        assert_eq!(SchemaNode::Null.to_string(), "null");
        assert_eq!(
            SchemaNode::EmptyCantInfer.to_string(),
            "<empty: cannot infer>"
        );
        assert_eq!(
            SchemaNode::NonHomogeneousCantParse.to_string(),
            "<non-homogeneous: cannot parse>"
        );
    }

    #[test]
    fn test_render_nested_lists() {
        let schema = SchemaNode::list(SchemaNode::list(SchemaNode::Float));
        assert_eq!(schema.to_string(), "list of list of float");
    }

    #[test]
    fn test_render_dict_tree() {
        let schema = SchemaNode::dict([
            ("id".to_string(), SchemaNode::Int),
            (
                "items".to_string(),
                SchemaNode::list(SchemaNode::dict([
                    ("sku".to_string(), SchemaNode::String),
                    ("tags".to_string(), SchemaNode::EmptyCantInfer),
                ])),
            ),
            ("meta".to_string(), SchemaNode::dict([])),
        ]);

        let expected = "\
dict
  id: int
  items: list of dict
    sku: string
    tags: <empty: cannot infer>
  meta: dict {}";
        assert_eq!(schema.to_string(), expected);
    }

    #[test]
    fn test_render_quotes_unusual_keys() {
        let schema = SchemaNode::dict([
            ("first name".to_string(), SchemaNode::String),
            (String::new(), SchemaNode::Bool),
        ]);
        assert_eq!(schema.to_string(), "dict\n  \"\": bool\n  \"first name\": string");
    }
}
