//! Building and querying located documents

use super::types::{Document, DocumentNode, Issue, Location, Segment};
use crate::schema::{classify_list, SchemaNode};
use serde_json::Value;
use std::collections::BTreeMap;

impl Document {
    /// Build a located document from a decoded value
    pub fn parse(value: &Value) -> Self {
        parse_at(value, Location::root()).0
    }

    /// Location of this node from the root
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Content of this node
    pub fn node(&self) -> &DocumentNode {
        &self.node
    }

    /// Schema of this node; equals [`crate::schema::infer`] on the source value
    pub fn schema(&self) -> SchemaNode {
        let mut frames = vec![SchemaFrame::Enter(self)];
        let mut results: Vec<SchemaNode> = Vec::new();

        while let Some(frame) = frames.pop() {
            match frame {
                SchemaFrame::Enter(doc) => match &doc.node {
                    DocumentNode::Null => results.push(SchemaNode::Null),
                    DocumentNode::Bool(_) => results.push(SchemaNode::Bool),
                    DocumentNode::Int(_) => results.push(SchemaNode::Int),
                    DocumentNode::Float(_) => results.push(SchemaNode::Float),
                    DocumentNode::String(_) => results.push(SchemaNode::String),
                    DocumentNode::List(items) => {
                        frames.push(SchemaFrame::ExitList(items.len()));
                        frames.extend(items.iter().rev().map(SchemaFrame::Enter));
                    }
                    DocumentNode::Record(fields) => {
                        frames.push(SchemaFrame::ExitRecord(
                            fields.keys().map(String::as_str).collect(),
                        ));
                        frames.extend(fields.values().rev().map(SchemaFrame::Enter));
                    }
                    DocumentNode::EmptyCantInfer(_) => results.push(SchemaNode::EmptyCantInfer),
                    DocumentNode::NonHomogeneousCantParse(_) => {
                        results.push(SchemaNode::NonHomogeneousCantParse);
                    }
                },
                SchemaFrame::ExitList(len) => {
                    let start = results.len() - len;
                    let node = classify_list(results.drain(start..));
                    results.push(node);
                }
                SchemaFrame::ExitRecord(keys) => {
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

    /// Direct children in document order
    pub fn children(&self) -> Box<dyn Iterator<Item = &Document> + '_> {
        match &self.node {
            DocumentNode::List(items) => Box::new(items.iter()),
            DocumentNode::Record(fields) => Box::new(fields.values()),
            _ => Box::new(std::iter::empty()),
        }
    }

    /// Find the node at `location`, walking down from this node
    ///
    /// `location` is absolute, so it must extend this node's own location.
    pub fn find(&self, location: &Location) -> Option<&Document> {
        let rest = location.relative_to(&self.location)?;

        let mut current = self;
        for segment in rest {
            current = match (&current.node, segment) {
                (DocumentNode::List(items), Segment::Index(index)) => items.get(*index)?,
                (DocumentNode::Record(fields), Segment::Key(key)) => fields.get(key)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Every node whose shape could not be inferred, in document order
    pub fn issues(&self) -> Vec<Issue> {
        let mut issues = Vec::new();
        let mut pending = vec![self];
        while let Some(doc) = pending.pop() {
            if doc.node.is_sentinel() {
                issues.push(Issue {
                    location: doc.location.clone(),
                    schema: doc.schema(),
                });
            }
            let children: Vec<_> = doc.children().collect();
            pending.extend(children.into_iter().rev());
        }
        issues
    }
}

/// Pending work for [`Document::schema`]
enum SchemaFrame<'a> {
    Enter(&'a Document),
    ExitList(usize),
    ExitRecord(Vec<&'a str>),
}

/// Pending work for [`parse_at`]
enum ParseFrame<'a> {
    /// Build this value, scheduling its children first
    Enter(&'a Value, Location),
    /// Combine the last `len` results into a list node, keeping the raw
    /// value for sentinels
    ExitList(&'a Value, usize, Location),
    /// Combine the last `keys.len()` results into a record node
    ExitRecord(Vec<&'a str>, Location),
}

/// Returns the document together with its schema so each list is classified
/// once, bottom-up.
fn parse_at(value: &Value, location: Location) -> (Document, SchemaNode) {
    let mut frames = vec![ParseFrame::Enter(value, location)];
    let mut results: Vec<(Document, SchemaNode)> = Vec::new();

    while let Some(frame) = frames.pop() {
        let (location, node, schema) = match frame {
            ParseFrame::Enter(value, location) => {
                let (node, schema) = match value {
                    Value::Null => (DocumentNode::Null, SchemaNode::Null),
                    Value::Bool(b) => (DocumentNode::Bool(*b), SchemaNode::Bool),
                    Value::Number(n) if n.is_i64() || n.is_u64() => {
                        (DocumentNode::Int(n.clone()), SchemaNode::Int)
                    }
                    Value::Number(n) => (DocumentNode::Float(n.clone()), SchemaNode::Float),
                    Value::String(s) => (DocumentNode::String(s.clone()), SchemaNode::String),
                    Value::Array(items) => {
                        let children: Vec<_> = items
                            .iter()
                            .enumerate()
                            .rev()
                            .map(|(index, item)| ParseFrame::Enter(item, location.child(index)))
                            .collect();
                        frames.push(ParseFrame::ExitList(value, items.len(), location));
                        frames.extend(children);
                        continue;
                    }
                    Value::Object(map) => {
                        let children: Vec<_> = map
                            .iter()
                            .rev()
                            .map(|(key, item)| {
                                ParseFrame::Enter(item, location.child(key.as_str()))
                            })
                            .collect();
                        frames.push(ParseFrame::ExitRecord(
                            map.keys().map(String::as_str).collect(),
                            location,
                        ));
                        frames.extend(children);
                        continue;
                    }
                };
                (location, node, schema)
            }
            ParseFrame::ExitList(value, len, location) => {
                let start = results.len() - len;
                let (docs, schemas): (Vec<_>, Vec<_>) = results.drain(start..).unzip();
                match classify_list(schemas) {
                    SchemaNode::EmptyCantInfer => (
                        location,
                        DocumentNode::EmptyCantInfer(value.clone()),
                        SchemaNode::EmptyCantInfer,
                    ),
                    SchemaNode::NonHomogeneousCantParse => (
                        location,
                        DocumentNode::NonHomogeneousCantParse(value.clone()),
                        SchemaNode::NonHomogeneousCantParse,
                    ),
                    list => (location, DocumentNode::List(docs), list),
                }
            }
            ParseFrame::ExitRecord(keys, location) => {
                let start = results.len() - keys.len();
                let mut docs = BTreeMap::new();
                let mut schemas = Vec::with_capacity(keys.len());
                for (key, (doc, schema)) in keys.into_iter().zip(results.drain(start..)) {
                    docs.insert(key.to_owned(), doc);
                    schemas.push((key.to_owned(), schema));
                }
                (location, DocumentNode::Record(docs), SchemaNode::dict(schemas))
            }
        };

        results.push((Document { location, node }, schema));
    }

    results.pop().unwrap_or_else(|| {
        let root = Document {
            location: Location::root(),
            node: DocumentNode::Null,
        };
        (root, SchemaNode::Null)
    })
}
