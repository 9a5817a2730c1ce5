//! Located document tests

use super::*;
use crate::schema::{infer, SchemaNode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashSet;

fn loc(segments: Vec<Segment>) -> Location {
    segments.into_iter().collect()
}

/// Take a nested array apart one level at a time
fn unnest(value: Value) {
    let mut current = value;
    while let Value::Array(mut items) = current {
        current = items.pop().unwrap_or(Value::Null);
    }
}

// ============================================================================
// Location
// ============================================================================

#[test]
fn test_location_display() {
    assert_eq!(Location::root().to_string(), "$");
    assert_eq!(
        Location::root().child("user").child("tags").child(0usize).to_string(),
        "$.user.tags[0]"
    );
    assert_eq!(
        Location::root().child("first name").to_string(),
        "$[\"first name\"]"
    );
    assert_eq!(Location::root().child("1st").to_string(), "$[\"1st\"]");
    assert_eq!(Location::root().child(3usize).child(1usize).to_string(), "$[3][1]");
}

#[test]
fn test_location_child_does_not_mutate_parent() {
    let parent = Location::root().child("a");
    let child = parent.child(2usize);

    assert_eq!(parent.len(), 1);
    assert_eq!(child.len(), 2);
    assert_eq!(
        child.segments(),
        vec![&Segment::Key("a".to_string()), &Segment::Index(2)]
    );
    assert!(Location::root().is_root());
    assert!(!child.is_root());
}

#[test]
fn test_location_equality_is_structural() {
    let built = Location::root().child("a").child(2usize);
    let collected = loc(vec!["a".into(), Segment::Index(2)]);

    assert_eq!(built, collected);
    assert_ne!(built, Location::root().child("a").child(3usize));
    assert_ne!(built, Location::root().child("a"));

    let set: HashSet<_> = [built.clone(), collected].into_iter().collect();
    assert_eq!(set.len(), 1);

    let value = serde_json::to_value(&built).unwrap();
    assert_eq!(value, json!([{"key": "a"}, {"index": 2}]));
    let back: Location = serde_json::from_value(value).unwrap();
    assert_eq!(back, built);
}

#[test]
fn test_relative_to() {
    let parent = Location::root().child("a");
    let child = parent.child(0usize).child("b");

    assert_eq!(
        child.relative_to(&parent),
        Some(vec![&Segment::Index(0), &Segment::Key("b".to_string())])
    );
    assert_eq!(child.relative_to(&child), Some(vec![]));
    assert_eq!(child.relative_to(&Location::root().child("x")), None);
    assert_eq!(parent.relative_to(&child), None);
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_assigns_locations() {
    let value = json!({"items": [{"id": 1}, {"id": 2}]});
    let doc = Document::parse(&value);

    assert!(doc.location().is_root());

    let items = doc.find(&loc(vec!["items".into()])).unwrap();
    assert_eq!(items.location().to_string(), "$.items");
    assert_eq!(items.children().count(), 2);

    let id = doc
        .find(&loc(vec!["items".into(), Segment::Index(1), "id".into()]))
        .unwrap();
    assert_eq!(id.location().to_string(), "$.items[1].id");
    assert_eq!(id.node(), &DocumentNode::Int(serde_json::Number::from(2)));
}

#[test]
fn test_schema_matches_infer() {
    let samples = [
        json!(null),
        json!(1.5),
        json!([]),
        json!([1, []]),
        json!([1, "a"]),
        json!({"b": [[], [true]], "a": {"c": [{"x": 1}, {"x": 2}]}}),
        json!([[1, "a"], [1, "a"]]),
    ];
    for sample in &samples {
        assert_eq!(Document::parse(sample).schema(), infer(sample), "{sample}");
    }
}

#[test]
fn test_sentinel_nodes_keep_raw_value() {
    let value = json!({"mixed": [1, "a"], "empty": []});
    let doc = Document::parse(&value);

    let mixed = doc.find(&loc(vec!["mixed".into()])).unwrap();
    assert_eq!(
        mixed.node(),
        &DocumentNode::NonHomogeneousCantParse(json!([1, "a"]))
    );
    assert_eq!(mixed.children().count(), 0);

    let empty = doc.find(&loc(vec!["empty".into()])).unwrap();
    assert_eq!(empty.node(), &DocumentNode::EmptyCantInfer(json!([])));
}

#[test]
fn test_float_and_int_nodes() {
    let doc = Document::parse(&json!([1.5, 2.0]));
    let first = doc.find(&loc(vec![Segment::Index(0)])).unwrap();
    assert!(matches!(first.node(), DocumentNode::Float(n) if n.as_f64() == Some(1.5)));
}

// ============================================================================
// find
// ============================================================================

#[test]
fn test_find_missing_or_mismatched() {
    let doc = Document::parse(&json!({"a": [1, 2]}));

    assert!(doc.find(&loc(vec!["b".into()])).is_none());
    assert!(doc.find(&loc(vec!["a".into(), Segment::Index(5)])).is_none());
    // Index into a record / key into a list
    assert!(doc.find(&loc(vec![Segment::Index(0)])).is_none());
    assert!(doc.find(&loc(vec!["a".into(), "x".into()])).is_none());
}

#[test]
fn test_find_from_subtree() {
    let doc = Document::parse(&json!({"a": {"b": {"c": true}}}));
    let a = doc.find(&loc(vec!["a".into()])).unwrap();

    let c = a
        .find(&loc(vec!["a".into(), "b".into(), "c".into()]))
        .unwrap();
    assert_eq!(c.node(), &DocumentNode::Bool(true));

    // Not below this subtree
    assert!(a.find(&Location::root()).is_none());
    assert_eq!(a.find(a.location()), Some(a));
}

// ============================================================================
// Issues
// ============================================================================

#[test]
fn test_issues_in_document_order() {
    let value = json!({
        "a": [],
        "b": {"c": [1, "x"], "d": [[], 1]},
        "e": 3
    });
    let issues = Document::parse(&value).issues();

    let rendered: Vec<String> = issues.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "$.a: <empty: cannot infer>".to_string(),
            "$.b.c: <non-homogeneous: cannot parse>".to_string(),
            "$.b.d[0]: <empty: cannot infer>".to_string(),
        ]
    );
}

#[test]
fn test_no_issues_for_clean_document() {
    let doc = Document::parse(&json!({"ids": [1, 2, 3], "name": "x"}));
    assert!(doc.issues().is_empty());
}

#[test]
fn test_root_sentinel_is_an_issue() {
    let issues = Document::parse(&json!([])).issues();
    assert_eq!(
        issues,
        vec![Issue {
            location: Location::root(),
            schema: SchemaNode::EmptyCantInfer,
        }]
    );
}

#[test]
fn test_deeply_nested_document_does_not_overflow() {
    const DEPTH: usize = 50_000;

    let handle = std::thread::Builder::new()
        .stack_size(256 * 1024)
        .spawn(|| {
            let mut value = json!(1);
            for _ in 0..DEPTH {
                value = Value::Array(vec![value]);
            }

            let doc = Document::parse(&value);
            let schema = doc.schema();
            assert_eq!(schema.depth(), infer(&value).depth());
            assert!(doc.issues().is_empty());

            let deepest: Location = std::iter::repeat(Segment::Index(0)).take(DEPTH).collect();
            let leaf = doc.find(&deepest).unwrap();
            assert_eq!(leaf.node(), &DocumentNode::Int(serde_json::Number::from(1)));
            assert_eq!(leaf.location(), &deepest);

            unnest(value);
            schema.depth()
        })
        .unwrap();
    assert_eq!(handle.join().unwrap(), DEPTH + 1);
}
