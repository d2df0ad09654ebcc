// src/dag/builder.rs

//! Turn a [`TaskSnapshot`] into a [`TaskDag`].

use std::collections::{HashMap, HashSet};
use std::fmt;

use petgraph::graph::NodeIndex;
use serde_json::json;
use tracing::{debug, warn};

use crate::canonical::Canonicalize;
use crate::dag::graph::{DagEdge, DagNode, TaskDag};
use crate::dag::record::{TaskRecord, TaskSnapshot};
use crate::errors::{Result, TaskgraphError};
use crate::types::MissingDependencyPolicy;

/// Node key used for tasks that carry no kind in kind projection.
pub const UNKNOWN_KIND: &str = "unknown";

/// How a task record is mapped onto a graph node.
#[derive(Clone, Copy, Default)]
pub enum NodeIdentity<'a> {
    /// One node per task, keyed by task id.
    #[default]
    TaskId,
    /// Tasks whose labels canonicalize to the same string share a node.
    CanonicalLabel(&'a dyn Canonicalize),
    /// One node per task kind.
    Kind,
}

impl fmt::Debug for NodeIdentity<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeIdentity::TaskId => f.write_str("TaskId"),
            NodeIdentity::CanonicalLabel(_) => f.write_str("CanonicalLabel(..)"),
            NodeIdentity::Kind => f.write_str("Kind"),
        }
    }
}

impl NodeIdentity<'_> {
    /// Whether several records may collapse onto one node.
    fn merges(&self) -> bool {
        !matches!(self, NodeIdentity::TaskId)
    }

    fn key_for(&self, record: &TaskRecord) -> String {
        match self {
            NodeIdentity::TaskId => record.id.clone(),
            NodeIdentity::CanonicalLabel(c) => c.canonicalize(&record.label),
            NodeIdentity::Kind => record
                .kind
                .clone()
                .unwrap_or_else(|| UNKNOWN_KIND.to_string()),
        }
    }

    fn node_for(&self, record: &TaskRecord, key: String) -> DagNode {
        let label = match self {
            NodeIdentity::TaskId => record.label.clone(),
            NodeIdentity::CanonicalLabel(_) | NodeIdentity::Kind => key.clone(),
        };
        DagNode {
            key,
            label,
            kind: record.kind.clone(),
            data: record.data.clone(),
        }
    }
}

/// Builds a [`TaskDag`] from an ordered snapshot.
///
/// Edges always run from the upstream dependency to the dependent task,
/// whatever the snapshot's source was.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBuilder<'a> {
    identity: NodeIdentity<'a>,
    missing: MissingDependencyPolicy,
}

impl<'a> GraphBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity(mut self, identity: NodeIdentity<'a>) -> Self {
        self.identity = identity;
        self
    }

    /// Shorthand for `identity(NodeIdentity::CanonicalLabel(c))`.
    pub fn canonicalize_with(self, canonicalizer: &'a dyn Canonicalize) -> Self {
        self.identity(NodeIdentity::CanonicalLabel(canonicalizer))
    }

    pub fn missing_dependencies(mut self, policy: MissingDependencyPolicy) -> Self {
        self.missing = policy;
        self
    }

    pub fn build(&self, snapshot: &TaskSnapshot) -> Result<TaskDag> {
        let mut dag = TaskDag::new(snapshot.name());
        let records = snapshot.records();

        // Pass 1: nodes. The first record seen for a key owns the payload.
        let mut node_of: Vec<NodeIndex> = Vec::with_capacity(records.len());
        let mut merged_counts: HashMap<NodeIndex, usize> = HashMap::new();
        for record in records {
            let key = self.identity.key_for(record);
            let (idx, inserted) = dag.add_node(self.identity.node_for(record, key));
            if !inserted {
                debug!(task = %record.id, label = %record.label, "task merged into existing node");
            }
            *merged_counts.entry(idx).or_default() += 1;
            node_of.push(idx);
        }

        if matches!(self.identity, NodeIdentity::Kind) {
            for (idx, count) in &merged_counts {
                if let Some(node) = dag.node_mut(*idx) {
                    node.data = json!({ "kind": node.key, "task_count": count });
                }
            }
        }

        // Pass 2: edges, upstream -> dependent.
        let mut seen: HashSet<(NodeIndex, NodeIndex)> = HashSet::new();
        for (record, &target) in records.iter().zip(node_of.iter()) {
            for dep in &record.dependencies {
                let Some(upstream) = snapshot.position(&dep.task_id) else {
                    match self.missing {
                        MissingDependencyPolicy::Reject => {
                            return Err(TaskgraphError::MissingDependency {
                                task: record.id.clone(),
                                dependency: dep.task_id.clone(),
                            });
                        }
                        MissingDependencyPolicy::Skip => {
                            warn!(
                                task = %record.id,
                                dependency = %dep.task_id,
                                "dependency not present in input; skipping edge"
                            );
                            continue;
                        }
                    }
                };
                let source = node_of[upstream];

                if self.identity.merges() {
                    if source == target {
                        debug!(
                            task = %record.id,
                            dependency = %dep.task_id,
                            "dropping self-edge created by node merge"
                        );
                        continue;
                    }
                    if !seen.insert((source, target)) {
                        continue;
                    }
                }

                dag.add_edge(
                    source,
                    target,
                    DagEdge {
                        kind: record.kind.clone(),
                    },
                );
            }
        }

        debug!(
            graph = %dag.name(),
            identity = ?self.identity,
            nodes = dag.node_count(),
            edges = dag.edge_count(),
            "task DAG built"
        );
        Ok(dag)
    }
}

/// Build a DAG keyed by task id, or by canonical label when a canonicalizer
/// is given. Dangling dependencies are rejected.
pub fn build(snapshot: &TaskSnapshot, canonicalize: Option<&dyn Canonicalize>) -> Result<TaskDag> {
    let builder = match canonicalize {
        Some(c) => GraphBuilder::new().canonicalize_with(c),
        None => GraphBuilder::new(),
    };
    builder.build(snapshot)
}
