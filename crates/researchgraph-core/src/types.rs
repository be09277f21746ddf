//! Core graph delta model.
//!
//! These types mirror what the extraction layer produces: nodes identified
//! by a composite key, directed relationships between keys, and schema
//! declarations for the `(label, property)` pairs the keys are looked up by.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

// ── Property Values ───────────────────────────────────────────────

/// A property value stored on a node or relationship.
///
/// Closed variant over the primitive types the store supports. Floats are
/// compared by bit pattern so values can participate in key equality and
/// hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GraphValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<GraphValue>),
}

impl GraphValue {
    /// Convert a JSON value coming back from the store into a `GraphValue`.
    /// Nulls and objects have no graph representation and yield `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<GraphValue> {
        match value {
            serde_json::Value::Null | serde_json::Value::Object(_) => None,
            serde_json::Value::Bool(b) => Some(GraphValue::Bool(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(GraphValue::Int(i))
                } else {
                    n.as_f64().map(GraphValue::Float)
                }
            }
            serde_json::Value::String(s) => Some(GraphValue::Str(s.clone())),
            serde_json::Value::Array(items) => Some(GraphValue::List(
                items.iter().filter_map(GraphValue::from_json).collect(),
            )),
        }
    }

    /// The string content, if this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            GraphValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// True for an empty string, an empty list, or a list of empty values.
    pub fn is_empty(&self) -> bool {
        match self {
            GraphValue::Str(s) => s.is_empty(),
            GraphValue::List(items) => items.is_empty(),
            _ => false,
        }
    }
}

impl PartialEq for GraphValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (GraphValue::Str(a), GraphValue::Str(b)) => a == b,
            (GraphValue::Int(a), GraphValue::Int(b)) => a == b,
            (GraphValue::Float(a), GraphValue::Float(b)) => a.to_bits() == b.to_bits(),
            (GraphValue::Bool(a), GraphValue::Bool(b)) => a == b,
            (GraphValue::List(a), GraphValue::List(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for GraphValue {}

impl Hash for GraphValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            GraphValue::Str(s) => {
                state.write_u8(0);
                s.hash(state);
            }
            GraphValue::Int(i) => {
                state.write_u8(1);
                i.hash(state);
            }
            GraphValue::Float(f) => {
                state.write_u8(2);
                f.to_bits().hash(state);
            }
            GraphValue::Bool(b) => {
                state.write_u8(3);
                b.hash(state);
            }
            GraphValue::List(items) => {
                state.write_u8(4);
                items.hash(state);
            }
        }
    }
}

impl fmt::Display for GraphValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphValue::Str(s) => write!(f, "{s}"),
            GraphValue::Int(i) => write!(f, "{i}"),
            GraphValue::Float(x) => write!(f, "{x}"),
            GraphValue::Bool(b) => write!(f, "{b}"),
            GraphValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<&str> for GraphValue {
    fn from(s: &str) -> Self {
        GraphValue::Str(s.to_string())
    }
}

impl From<String> for GraphValue {
    fn from(s: String) -> Self {
        GraphValue::Str(s)
    }
}

impl From<i64> for GraphValue {
    fn from(i: i64) -> Self {
        GraphValue::Int(i)
    }
}

impl From<i32> for GraphValue {
    fn from(i: i32) -> Self {
        GraphValue::Int(i as i64)
    }
}

impl From<f64> for GraphValue {
    fn from(x: f64) -> Self {
        GraphValue::Float(x)
    }
}

impl From<bool> for GraphValue {
    fn from(b: bool) -> Self {
        GraphValue::Bool(b)
    }
}

impl From<Vec<String>> for GraphValue {
    fn from(items: Vec<String>) -> Self {
        GraphValue::List(items.into_iter().map(GraphValue::Str).collect())
    }
}

// ── Keys ──────────────────────────────────────────────────────────

/// Composite node identity: `(label, property, value)`.
///
/// A key both identifies a node for merge lookups and serves as the index
/// under which relationships wait for that node to appear. Immutable once
/// constructed; equality and hashing cover all three components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphKey {
    pub label: String,
    pub property: String,
    pub value: GraphValue,
}

impl GraphKey {
    pub fn new(
        label: impl Into<String>,
        property: impl Into<String>,
        value: impl Into<GraphValue>,
    ) -> Self {
        Self {
            label: label.into(),
            property: property.into(),
            value: value.into(),
        }
    }

    /// Stable `label.property.value` rendering, used in log output.
    pub fn canonical_string(&self) -> String {
        format!("{}.{}.{}", self.label, self.property, self.value)
    }
}

impl fmt::Display for GraphKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_string())
    }
}

// ── Schema Declarations ───────────────────────────────────────────

/// A request for the store to maintain an index — or, if `unique`, a
/// uniqueness constraint — on a `(label, property)` pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GraphSchema {
    pub label: String,
    pub property: String,
    pub unique: bool,
}

impl GraphSchema {
    pub fn new(label: impl Into<String>, property: impl Into<String>, unique: bool) -> Self {
        Self {
            label: label.into(),
            property: property.into(),
            unique,
        }
    }
}

impl fmt::Display for GraphSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} ({})",
            self.label,
            self.property,
            if self.unique { "unique" } else { "index" }
        )
    }
}

// ── Nodes ─────────────────────────────────────────────────────────

/// A node delta produced by the extraction layer.
///
/// `broken` and `deleted` mark nodes the merge engine must skip without
/// raising an error. `extra_keys` are secondary identities indexed alongside
/// the primary key when the node is first created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub key: GraphKey,
    pub node_source: String,
    pub node_type: String,
    pub labels: BTreeSet<String>,
    pub properties: BTreeMap<String, GraphValue>,
    pub extra_keys: Vec<GraphKey>,
    pub broken: bool,
    pub deleted: bool,
}

impl GraphNode {
    pub fn builder(key: GraphKey) -> GraphNodeBuilder {
        GraphNodeBuilder {
            node: GraphNode {
                key,
                node_source: String::new(),
                node_type: String::new(),
                labels: BTreeSet::new(),
                properties: BTreeMap::new(),
                extra_keys: Vec::new(),
                broken: false,
                deleted: false,
            },
        }
    }
}

/// Chainable builder for [`GraphNode`].
#[derive(Debug)]
pub struct GraphNodeBuilder {
    node: GraphNode,
}

impl GraphNodeBuilder {
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.node.node_source = source.into();
        self
    }

    pub fn node_type(mut self, node_type: impl Into<String>) -> Self {
        self.node.node_type = node_type.into();
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.node.labels.insert(label.into());
        self
    }

    /// Set a property. `None` values are dropped, matching the extraction
    /// layer's habit of passing optional columns straight through.
    pub fn property(
        mut self,
        name: impl Into<String>,
        value: impl Into<Option<GraphValue>>,
    ) -> Self {
        if let Some(value) = value.into() {
            self.node.properties.insert(name.into(), value);
        }
        self
    }

    pub fn extra_key(mut self, key: GraphKey) -> Self {
        self.node.extra_keys.push(key);
        self
    }

    pub fn broken(mut self, broken: bool) -> Self {
        self.node.broken = broken;
        self
    }

    pub fn deleted(mut self, deleted: bool) -> Self {
        self.node.deleted = deleted;
        self
    }

    pub fn build(self) -> GraphNode {
        self.node
    }
}

// ── Relationships ─────────────────────────────────────────────────

/// A directed relationship delta between two node keys.
///
/// Endpoints are keys, not node handles: the nodes may not exist yet when
/// the relationship is staged, in which case the importer defers it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphRelationship {
    pub rel_type: String,
    pub start: GraphKey,
    pub end: GraphKey,
    pub properties: BTreeMap<String, GraphValue>,
}

impl GraphRelationship {
    pub fn new(rel_type: impl Into<String>, start: GraphKey, end: GraphKey) -> Self {
        Self {
            rel_type: rel_type.into(),
            start,
            end,
            properties: BTreeMap::new(),
        }
    }

    pub fn property(mut self, name: impl Into<String>, value: impl Into<GraphValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }
}

// ── Batches ───────────────────────────────────────────────────────

/// One accumulated batch of deltas awaiting import.
///
/// Schemas are deduplicated within the batch; nodes and relationships keep
/// their insertion order. The batch performs no I/O — the orchestrator
/// decides when it is flushed and replaces it with a fresh one afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub relationships: Vec<GraphRelationship>,
    pub schemas: BTreeSet<GraphSchema>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: GraphNode) {
        self.nodes.push(node);
    }

    pub fn add_relationship(&mut self, relationship: GraphRelationship) {
        self.relationships.push(relationship);
    }

    pub fn add_schema(&mut self, schema: GraphSchema) {
        self.schemas.insert(schema);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Total staged objects; the flush threshold is checked against this.
    pub fn object_count(&self) -> usize {
        self.node_count() + self.relationship_count() + self.schema_count()
    }

    pub fn is_empty(&self) -> bool {
        self.object_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_equality_covers_all_components() {
        let a = GraphKey::new("crossref", "key", "10.1234/x");
        let b = GraphKey::new("crossref", "key", "10.1234/x");
        let c = GraphKey::new("crossref", "doi", "10.1234/x");
        let d = GraphKey::new("crossref", "key", "10.1234/y");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_key_value_typed_equality() {
        let int_key = GraphKey::new("crossref", "key", 42i64);
        let str_key = GraphKey::new("crossref", "key", "42");
        assert_ne!(int_key, str_key);
        assert_eq!(int_key, GraphKey::new("crossref", "key", 42i64));
    }

    #[test]
    fn test_canonical_string() {
        let key = GraphKey::new("crossref", "key", "http://dx.doi.org/10.1/a");
        assert_eq!(key.canonical_string(), "crossref.key.http://dx.doi.org/10.1/a");
    }

    #[test]
    fn test_value_from_json() {
        assert_eq!(
            GraphValue::from_json(&serde_json::json!("doi")),
            Some(GraphValue::Str("doi".to_string()))
        );
        assert_eq!(
            GraphValue::from_json(&serde_json::json!(7)),
            Some(GraphValue::Int(7))
        );
        assert_eq!(GraphValue::from_json(&serde_json::Value::Null), None);
        assert_eq!(
            GraphValue::from_json(&serde_json::json!(["a", "b"])),
            Some(GraphValue::List(vec![
                GraphValue::Str("a".to_string()),
                GraphValue::Str("b".to_string()),
            ]))
        );
    }

    #[test]
    fn test_node_builder() {
        let node = GraphNode::builder(GraphKey::new("crossref", "key", "u1"))
            .source("crossref.org")
            .node_type("publication")
            .label("crossref")
            .label("publication")
            .property("title", GraphValue::from("A Title"))
            .property("year", None)
            .extra_key(GraphKey::new("crossref", "doi", "10.1/a"))
            .build();

        assert_eq!(node.labels.len(), 2);
        assert_eq!(node.properties.len(), 1);
        assert_eq!(node.extra_keys.len(), 1);
        assert!(!node.broken);
        assert!(!node.deleted);
    }

    #[test]
    fn test_batch_object_count_dedups_schemas() {
        let mut graph = Graph::new();
        assert!(graph.is_empty());

        graph.add_schema(GraphSchema::new("crossref", "key", true));
        graph.add_schema(GraphSchema::new("crossref", "key", true));
        graph.add_node(
            GraphNode::builder(GraphKey::new("crossref", "key", "u1")).build(),
        );
        graph.add_relationship(GraphRelationship::new(
            "RELATED_TO",
            GraphKey::new("crossref", "key", "u1"),
            GraphKey::new("orcid", "key", "0000-1"),
        ));

        assert_eq!(graph.schema_count(), 1);
        assert_eq!(graph.object_count(), 3);
    }
}
