// src/serialize/model.rs

//! Wire format of the output document (graphology JSON import format).
//!
//! ```json
//! {
//!   "nodes": [{"key": "a", "attributes": {"label": "a", "x": 0.0, "y": -1.0, "data": {}}}],
//!   "edges": [{"key": "0", "source": "a", "target": "b",
//!              "attributes": {"type": "arrow", "kind": "build"}}]
//! }
//! ```
//!
//! Field names and the `"arrow"` literal are consumed by the front end as-is.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SerializedGraph {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl SerializedGraph {
    pub fn node(&self, key: &str) -> Option<&NodeRecord> {
        self.nodes.iter().find(|n| n.key == key)
    }

    /// Whether an edge `source -> target` is present.
    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges
            .iter()
            .any(|e| e.source == source && e.target == target)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub key: String,
    pub attributes: NodeAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeAttributes {
    pub label: String,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Dense per-document sequence number, as a string.
    pub key: String,
    pub source: String,
    pub target: String,
    pub attributes: EdgeAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeAttributes {
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    pub kind: Option<String>,
}

/// Edge rendering type understood by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    #[default]
    Arrow,
}
