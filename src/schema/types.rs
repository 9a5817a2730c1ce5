//! Schema types

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::mem;

/// Inferred structural type of a JSON value
///
/// The two `*Cant*` variants are results, not errors: they describe values
/// whose shape could not be pinned down and sit alongside successfully
/// inferred siblings inside a [`SchemaNode::Dict`].
///
/// Deserializing re-sorts record fields and rejects duplicate keys and
/// sentinel list elements.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "of",
    rename_all = "snake_case",
    try_from = "SchemaNodeRepr"
)]
pub enum SchemaNode {
    Bool,
    String,
    Int,
    Float,
    Null,
    /// Homogeneous list; the element is always an inferrable schema
    List(Box<SchemaNode>),
    /// Record fields sorted by key
    Dict(Vec<(String, SchemaNode)>),
    /// No information to infer from (empty list, or only uninferrable elements)
    EmptyCantInfer,
    /// List elements were inferred to two or more distinct schemas
    NonHomogeneousCantParse,
}

impl SchemaNode {
    /// Create a list schema with the given element schema
    pub fn list(element: SchemaNode) -> Self {
        SchemaNode::List(Box::new(element))
    }

    /// Create a record schema, sorting fields by key
    pub fn dict(fields: impl IntoIterator<Item = (String, SchemaNode)>) -> Self {
        let mut fields: Vec<_> = fields.into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        SchemaNode::Dict(fields)
    }

    /// Short lowercase name of the variant
    pub fn name(&self) -> &'static str {
        match self {
            SchemaNode::Bool => "bool",
            SchemaNode::String => "string",
            SchemaNode::Int => "int",
            SchemaNode::Float => "float",
            SchemaNode::Null => "null",
            SchemaNode::List(_) => "list",
            SchemaNode::Dict(_) => "dict",
            SchemaNode::EmptyCantInfer => "empty",
            SchemaNode::NonHomogeneousCantParse => "non-homogeneous",
        }
    }

    /// Check if this is one of the two "cannot infer" outcomes
    pub fn is_sentinel(&self) -> bool {
        matches!(
            self,
            SchemaNode::EmptyCantInfer | SchemaNode::NonHomogeneousCantParse
        )
    }

    /// Check if this is a nullary scalar marker
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            SchemaNode::Bool
                | SchemaNode::String
                | SchemaNode::Int
                | SchemaNode::Float
                | SchemaNode::Null
        )
    }

    /// Element schema of a list
    pub fn element(&self) -> Option<&SchemaNode> {
        match self {
            SchemaNode::List(element) => Some(&**element),
            _ => None,
        }
    }

    /// Fields of a record
    pub fn fields(&self) -> Option<&[(String, SchemaNode)]> {
        match self {
            SchemaNode::Dict(fields) => Some(fields),
            _ => None,
        }
    }

    /// Look up a record field by key
    pub fn field(&self, key: &str) -> Option<&SchemaNode> {
        let fields = self.fields()?;
        fields
            .binary_search_by(|(k, _)| k.as_str().cmp(key))
            .ok()
            .map(|idx| &fields[idx].1)
    }

    /// Nesting depth, counting scalars and sentinels as 1
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut pending = vec![(self, 1usize)];
        while let Some((node, depth)) = pending.pop() {
            max = max.max(depth);
            match node {
                SchemaNode::List(element) => pending.push((&**element, depth + 1)),
                SchemaNode::Dict(fields) => {
                    pending.extend(fields.iter().map(|(_, schema)| (schema, depth + 1)));
                }
                _ => {}
            }
        }
        max
    }

    /// Count sentinel nodes anywhere in the tree
    pub fn sentinel_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            match node {
                SchemaNode::List(element) => pending.push(&**element),
                SchemaNode::Dict(fields) => pending.extend(fields.iter().map(|(_, s)| s)),
                node if node.is_sentinel() => count += 1,
                _ => {}
            }
        }
        count
    }
}

impl PartialEq for SchemaNode {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some(pair) = pending.pop() {
            match pair {
                (SchemaNode::List(a), SchemaNode::List(b)) => pending.push((&**a, &**b)),
                (SchemaNode::Dict(a), SchemaNode::Dict(b)) => {
                    if a.len() != b.len() {
                        return false;
                    }
                    for ((key_a, a), (key_b, b)) in a.iter().zip(b) {
                        if key_a != key_b {
                            return false;
                        }
                        pending.push((a, b));
                    }
                }
                (a, b) if mem::discriminant(a) == mem::discriminant(b) => {}
                _ => return false,
            }
        }
        true
    }
}

impl Hash for SchemaNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            mem::discriminant(node).hash(state);
            match node {
                SchemaNode::List(element) => pending.push(&**element),
                SchemaNode::Dict(fields) => {
                    fields.len().hash(state);
                    for (key, schema) in fields.iter().rev() {
                        key.hash(state);
                        pending.push(schema);
                    }
                }
                _ => {}
            }
        }
    }
}

impl Drop for SchemaNode {
    fn drop(&mut self) {
        // Deep schemas are unlinked on a heap stack instead of recursively
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.take_children(&mut pending);
        }
    }
}

impl SchemaNode {
    /// Move nested containers out of this node, leaving scalars behind
    fn take_children(&mut self, into: &mut Vec<SchemaNode>) {
        match self {
            SchemaNode::List(element)
                if matches!(**element, SchemaNode::List(_) | SchemaNode::Dict(_)) =>
            {
                into.push(mem::replace(&mut **element, SchemaNode::Null));
            }
            SchemaNode::Dict(fields) => into.extend(fields.drain(..).map(|(_, schema)| schema)),
            _ => {}
        }
    }
}

/// Wire form of [`SchemaNode`], checked before it becomes one
#[derive(Deserialize)]
#[serde(tag = "type", content = "of", rename_all = "snake_case")]
enum SchemaNodeRepr {
    Bool,
    String,
    Int,
    Float,
    Null,
    List(Box<SchemaNode>),
    Dict(Vec<(String, SchemaNode)>),
    EmptyCantInfer,
    NonHomogeneousCantParse,
}

impl TryFrom<SchemaNodeRepr> for SchemaNode {
    type Error = String;

    fn try_from(repr: SchemaNodeRepr) -> Result<Self, Self::Error> {
        let node = match repr {
            SchemaNodeRepr::Bool => SchemaNode::Bool,
            SchemaNodeRepr::String => SchemaNode::String,
            SchemaNodeRepr::Int => SchemaNode::Int,
            SchemaNodeRepr::Float => SchemaNode::Float,
            SchemaNodeRepr::Null => SchemaNode::Null,
            SchemaNodeRepr::List(element) if element.is_sentinel() => {
                return Err(format!("list element cannot be {}", element.name()));
            }
            SchemaNodeRepr::List(element) => SchemaNode::List(element),
            SchemaNodeRepr::Dict(mut fields) => {
                fields.sort_by(|a, b| a.0.cmp(&b.0));
                if let Some(pair) = fields.windows(2).find(|pair| pair[0].0 == pair[1].0) {
                    return Err(format!("duplicate field '{}'", pair[0].0));
                }
                SchemaNode::Dict(fields)
            }
            SchemaNodeRepr::EmptyCantInfer => SchemaNode::EmptyCantInfer,
            SchemaNodeRepr::NonHomogeneousCantParse => SchemaNode::NonHomogeneousCantParse,
        };
        Ok(node)
    }
}
