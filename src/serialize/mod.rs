// src/serialize/mod.rs

//! Serialization of a laid-out [`TaskDag`] into the node/edge document.

pub mod model;

use std::collections::HashSet;

use petgraph::graph::NodeIndex;
use tracing::debug;

use crate::dag::TaskDag;
use crate::errors::{Result, TaskgraphError};
use crate::layout::Layout;

pub use model::{
    EdgeAttributes, EdgeRecord, EdgeType, NodeAttributes, NodeRecord, SerializedGraph,
};

/// Serializer switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Attach the raw task payload as node `data`.
    pub include_data: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self { include_data: true }
    }
}

/// Walk `dag` and emit one node record per node key and one edge record per
/// distinct `(source, target)` pair.
///
/// Nodes come out in insertion order. Edges are emitted while walking the
/// nodes, each node contributing its incoming edges in insertion order; edge
/// keys are `"0"`, `"1"`, ... in that order. Only uniqueness of edge keys
/// within one document is guaranteed.
pub fn serialize(dag: &TaskDag, layout: &Layout, options: SerializeOptions) -> Result<SerializedGraph> {
    let mut out = SerializedGraph::default();
    let mut seen_nodes: HashSet<&str> = HashSet::new();
    let mut seen_edges: HashSet<(NodeIndex, NodeIndex)> = HashSet::new();

    for (idx, node) in dag.nodes() {
        if !seen_nodes.insert(node.key.as_str()) {
            continue;
        }

        let position = layout.position_of(idx).ok_or_else(|| {
            TaskgraphError::LayoutMismatch(format!("no position for node '{}'", node.key))
        })?;

        out.nodes.push(NodeRecord {
            key: node.key.clone(),
            attributes: NodeAttributes {
                label: node.label.clone(),
                x: position.x,
                y: position.y,
                data: options.include_data.then(|| node.data.clone()),
            },
        });

        for (source, edge) in dag.incoming(idx) {
            if !seen_edges.insert((source, idx)) {
                continue;
            }
            let Some(source_node) = dag.node(source) else {
                continue;
            };
            out.edges.push(EdgeRecord {
                key: out.edges.len().to_string(),
                source: source_node.key.clone(),
                target: node.key.clone(),
                attributes: EdgeAttributes {
                    edge_type: EdgeType::Arrow,
                    kind: edge.kind.clone(),
                },
            });
        }
    }

    debug!(
        graph = %dag.name(),
        nodes = out.nodes.len(),
        edges = out.edges.len(),
        "graph serialized"
    );
    Ok(out)
}
