//! Location and document node types

use crate::schema::SchemaNode;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

// ============================================================================
// Location
// ============================================================================

/// One step from a container to one of its children
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    /// Position in a list
    Index(usize),
    /// Key in a record
    Key(String),
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

/// Path of segments from the document root
///
/// Displays in JSONPath form: `$`, `$.user.tags[0]`, `$["first name"]`.
/// A child location points at its parent instead of copying it, so every
/// node of a document can hold its own location.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Segment>", into = "Vec<Segment>")]
pub struct Location(Option<Arc<Step>>);

struct Step {
    parent: Location,
    segment: Segment,
    len: usize,
}

impl Location {
    /// The document root
    pub fn root() -> Self {
        Self::default()
    }

    /// Location of a child of this location
    #[must_use]
    pub fn child(&self, segment: impl Into<Segment>) -> Self {
        Self(Some(Arc::new(Step {
            parent: self.clone(),
            segment: segment.into(),
            len: self.len() + 1,
        })))
    }

    /// Segments from the root
    pub fn segments(&self) -> Vec<&Segment> {
        let mut segments: Vec<_> = self.steps().map(|step| &step.segment).collect();
        segments.reverse();
        segments
    }

    /// Check if this is the root location
    pub fn is_root(&self) -> bool {
        self.0.is_none()
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.0.as_ref().map_or(0, |step| step.len)
    }

    /// Alias for [`Location::is_root`]
    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    /// Segments that lead from `ancestor` down to this location
    ///
    /// `None` when `ancestor` is not a prefix of this location.
    pub fn relative_to(&self, ancestor: &Location) -> Option<Vec<&Segment>> {
        let extra = self.len().checked_sub(ancestor.len())?;
        let mut rest = Vec::with_capacity(extra);
        let mut current = self;
        for _ in 0..extra {
            let step = current.0.as_deref()?;
            rest.push(&step.segment);
            current = &step.parent;
        }
        if current != ancestor {
            return None;
        }
        rest.reverse();
        Some(rest)
    }

    /// Steps from this location up to the root
    fn steps(&self) -> impl Iterator<Item = &Step> + '_ {
        std::iter::successors(self.0.as_deref(), |step| step.parent.0.as_deref())
    }
}

impl Drop for Location {
    fn drop(&mut self) {
        // Unlink uniquely owned parents one by one instead of recursively
        let mut next = self.0.take();
        while let Some(step) = next {
            next = match Arc::try_unwrap(step) {
                Ok(mut step) => step.parent.0.take(),
                Err(_) => None,
            };
        }
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let (mut left, mut right) = (self, other);
        loop {
            match (&left.0, &right.0) {
                (None, None) => return true,
                (Some(a), Some(b)) if Arc::ptr_eq(a, b) => return true,
                (Some(a), Some(b)) if a.segment == b.segment => {
                    left = &a.parent;
                    right = &b.parent;
                }
                _ => return false,
            }
        }
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for segment in self.segments() {
            segment.hash(state);
        }
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Location({self})")
    }
}

impl FromIterator<Segment> for Location {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Location::root(), |location, segment| location.child(segment))
    }
}

impl From<Vec<Segment>> for Location {
    fn from(segments: Vec<Segment>) -> Self {
        segments.into_iter().collect()
    }
}

impl From<Location> for Vec<Segment> {
    fn from(location: Location) -> Self {
        location.segments().into_iter().cloned().collect()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in self.segments() {
            match segment {
                Segment::Index(index) => write!(f, "[{index}]")?,
                Segment::Key(key) if is_identifier(key) => write!(f, ".{key}")?,
                Segment::Key(key) => write!(f, "[{}]", Value::String(key.clone()))?,
            }
        }
        Ok(())
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ============================================================================
// Document
// ============================================================================

/// Decoded value annotated with its location and list classification
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub(super) location: Location,
    pub(super) node: DocumentNode,
}

/// Content of a [`Document`]
///
/// Lists only become `List` when their elements are homogeneous; otherwise
/// the raw value is kept in one of the sentinel variants and its children are
/// not located.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentNode {
    Null,
    Bool(bool),
    Int(Number),
    Float(Number),
    String(String),
    List(Vec<Document>),
    Record(BTreeMap<String, Document>),
    EmptyCantInfer(Value),
    NonHomogeneousCantParse(Value),
}

impl Drop for Document {
    fn drop(&mut self) {
        // Flatten the subtree so deep documents drop without deep recursion
        let mut pending = Vec::new();
        self.node.take_children(&mut pending);
        while let Some(mut doc) = pending.pop() {
            doc.node.take_children(&mut pending);
        }
    }
}

impl DocumentNode {
    fn take_children(&mut self, into: &mut Vec<Document>) {
        match self {
            DocumentNode::List(items) => into.append(items),
            DocumentNode::Record(fields) => into.extend(std::mem::take(fields).into_values()),
            _ => {}
        }
    }

    /// Check if this node is one of the "cannot infer" outcomes
    pub fn is_sentinel(&self) -> bool {
        matches!(
            self,
            DocumentNode::EmptyCantInfer(_) | DocumentNode::NonHomogeneousCantParse(_)
        )
    }
}

/// A node whose shape could not be inferred
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Where the node sits in the document
    pub location: Location,
    /// `EmptyCantInfer` or `NonHomogeneousCantParse`
    pub schema: SchemaNode,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.schema)
    }
}
