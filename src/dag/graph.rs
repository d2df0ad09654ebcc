// src/dag/graph.rs

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use serde_json::Value;

/// Node payload: the visual identity of one or more merged tasks.
#[derive(Debug, Clone, PartialEq)]
pub struct DagNode {
    /// Unique node key (task id, canonical label or kind).
    pub key: String,
    pub label: String,
    pub kind: Option<String>,
    /// Raw payload of the record retained for this node.
    pub data: Value,
}

/// Edge payload.
#[derive(Debug, Clone, PartialEq)]
pub struct DagEdge {
    /// Kind of the task that declared the dependency (the downstream task).
    pub kind: Option<String>,
}

/// Directed task graph keyed by node key.
///
/// Edges point from upstream to downstream: `a -> b` means `a` must finish
/// before `b` starts. Nodes and edges keep their insertion order, which the
/// layout and serializer rely on for deterministic output. Parallel edges
/// are allowed; see [`TaskDag::add_edge`].
#[derive(Debug, Clone, Default)]
pub struct TaskDag {
    name: String,
    graph: DiGraph<DagNode, DagEdge>,
    index: HashMap<String, NodeIndex>,
}

impl TaskDag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graph: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert a node unless its key already exists.
    ///
    /// Returns the node index and whether a new node was created. An
    /// existing node keeps its original payload.
    pub fn add_node(&mut self, node: DagNode) -> (NodeIndex, bool) {
        if let Some(&idx) = self.index.get(&node.key) {
            return (idx, false);
        }
        let key = node.key.clone();
        let idx = self.graph.add_node(node);
        self.index.insert(key, idx);
        (idx, true)
    }

    /// Add an edge `source -> target`.
    ///
    /// No deduplication happens here: adding the same pair twice creates a
    /// parallel edge.
    pub fn add_edge(&mut self, source: NodeIndex, target: NodeIndex, edge: DagEdge) -> EdgeIndex {
        self.graph.add_edge(source, target, edge)
    }

    pub fn node_index(&self, key: &str) -> Option<NodeIndex> {
        self.index.get(key).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&DagNode> {
        self.graph.node_weight(idx)
    }

    pub fn node_mut(&mut self, idx: NodeIndex) -> Option<&mut DagNode> {
        self.graph.node_weight_mut(idx)
    }

    /// Look up a node payload by key.
    pub fn get(&self, key: &str) -> Option<&DagNode> {
        self.node_index(key).and_then(|idx| self.node(idx))
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &DagNode)> {
        self.graph
            .node_indices()
            .map(move |idx| (idx, &self.graph[idx]))
    }

    /// All edges in insertion order as `(source, target, payload)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, &DagEdge)> {
        self.graph
            .edge_references()
            .map(|e| (e.source(), e.target(), e.weight()))
    }

    /// Incoming edges of `idx` as `(source, payload)`, in insertion order.
    pub fn incoming(&self, idx: NodeIndex) -> Vec<(NodeIndex, &DagEdge)> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| (e.id(), e.source(), e.weight()))
            .collect();
        edges.sort_by_key(|(id, _, _)| *id);
        edges.into_iter().map(|(_, src, w)| (src, w)).collect()
    }

    /// Direct successors of `idx`, one entry per edge (parallel edges repeat).
    pub fn outgoing_targets(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| e.target())
    }

    /// Keys of the direct upstream nodes of `key`, deduplicated, in edge
    /// insertion order.
    pub fn dependencies_of(&self, key: &str) -> Vec<&str> {
        let Some(idx) = self.node_index(key) else {
            return Vec::new();
        };
        let mut keys: Vec<&str> = Vec::new();
        for (src, _) in self.incoming(idx) {
            let k = self.graph[src].key.as_str();
            if !keys.contains(&k) {
                keys.push(k);
            }
        }
        keys
    }

    /// Keys of the direct downstream nodes of `key`, deduplicated.
    pub fn dependents_of(&self, key: &str) -> Vec<&str> {
        let Some(idx) = self.node_index(key) else {
            return Vec::new();
        };
        let mut targets: Vec<NodeIndex> = self.outgoing_targets(idx).collect();
        targets.sort();
        targets.dedup();
        targets
            .into_iter()
            .map(|t| self.graph[t].key.as_str())
            .collect()
    }

    /// Number of nodes ("order").
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges ("size"), parallel edges included.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
