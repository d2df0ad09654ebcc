// src/layout/generations.rs

use petgraph::graph::NodeIndex;
use tracing::debug;

use crate::dag::TaskDag;
use crate::errors::{Result, TaskgraphError};

/// Maximum number of stuck node keys quoted in a cycle error.
const CYCLE_REPORT_LIMIT: usize = 10;

/// Split the graph into topological generations (Kahn's algorithm, one
/// generation at a time).
///
/// Generation 0 holds every node without predecessors; generation `n + 1`
/// holds the nodes whose last remaining predecessor sat in generation `n`.
/// Inside a generation nodes are ordered by insertion order.
///
/// Fails with [`TaskgraphError::CyclicGraph`] when nodes remain but none of
/// them is free of predecessors.
pub fn topological_generations(dag: &TaskDag) -> Result<Vec<Vec<NodeIndex>>> {
    let mut in_degree: Vec<usize> = vec![0; dag.node_count()];
    for (_, target, _) in dag.edges() {
        in_degree[target.index()] += 1;
    }

    let mut current: Vec<NodeIndex> = dag
        .nodes()
        .map(|(idx, _)| idx)
        .filter(|idx| in_degree[idx.index()] == 0)
        .collect();

    let mut generations: Vec<Vec<NodeIndex>> = Vec::new();
    let mut placed = 0usize;

    while !current.is_empty() {
        let mut next: Vec<NodeIndex> = Vec::new();
        for &node in &current {
            for target in dag.outgoing_targets(node) {
                let degree = &mut in_degree[target.index()];
                *degree -= 1;
                if *degree == 0 {
                    next.push(target);
                }
            }
        }
        next.sort();

        placed += current.len();
        generations.push(current);
        current = next;
    }

    if placed < dag.node_count() {
        let stuck: Vec<&str> = dag
            .nodes()
            .filter(|(idx, _)| in_degree[idx.index()] > 0)
            .map(|(_, node)| node.key.as_str())
            .collect();
        let shown = stuck
            .iter()
            .take(CYCLE_REPORT_LIMIT)
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        let more = stuck.len().saturating_sub(CYCLE_REPORT_LIMIT);
        let suffix = if more > 0 {
            format!(" (and {more} more)")
        } else {
            String::new()
        };
        return Err(TaskgraphError::CyclicGraph(format!(
            "{} of {} nodes could not be layered; involved: {shown}{suffix}",
            stuck.len(),
            dag.node_count()
        )));
    }

    debug!(
        graph = %dag.name(),
        generations = generations.len(),
        "topological generations computed"
    );
    Ok(generations)
}
