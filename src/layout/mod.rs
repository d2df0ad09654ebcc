// src/layout/mod.rs

//! Layered ("multipartite") layout.
//!
//! - [`generations`] splits the DAG into topological generations.
//! - [`position`] turns generation sizes into 2D coordinates.
//!
//! No attempt is made to reduce edge crossings: nodes keep their insertion
//! order inside a generation.

pub mod generations;
pub mod position;

use petgraph::graph::NodeIndex;
use tracing::debug;

use crate::dag::TaskDag;
use crate::errors::Result;
use crate::types::Alignment;

pub use generations::topological_generations;
pub use position::{multipartite_positions, Position};

/// Layout parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub alignment: Alignment,
    /// Largest absolute coordinate after rescaling.
    pub scale: f64,
    /// Offset added to every position, in output (x, y) coordinates.
    pub center: (f64, f64),
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            alignment: Alignment::default(),
            scale: 1.0,
            center: (0.0, 0.0),
        }
    }
}

/// Computed layout: a generation index and position for every node.
#[derive(Debug, Clone)]
pub struct Layout {
    alignment: Alignment,
    generations: Vec<Vec<NodeIndex>>,
    layers: Vec<usize>,
    positions: Vec<Position>,
}

impl Layout {
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Generations in rank order; nodes in insertion order inside each.
    pub fn generations(&self) -> &[Vec<NodeIndex>] {
        &self.generations
    }

    pub fn layer_of(&self, node: NodeIndex) -> Option<usize> {
        self.layers.get(node.index()).copied()
    }

    pub fn position_of(&self, node: NodeIndex) -> Option<Position> {
        self.positions.get(node.index()).copied()
    }

    /// Number of positioned nodes.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Generational layout engine.
#[derive(Debug, Clone, Default)]
pub struct LayeredLayout {
    options: LayoutOptions,
}

impl LayeredLayout {
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Layer and position every node of `dag`.
    ///
    /// A cycle aborts before any position is computed.
    pub fn compute(&self, dag: &TaskDag) -> Result<Layout> {
        let generations = topological_generations(dag)?;

        let sizes: Vec<usize> = generations.iter().map(Vec::len).collect();
        let placed = multipartite_positions(
            &sizes,
            self.options.alignment,
            self.options.scale,
            self.options.center,
        );

        let mut layers = vec![0usize; dag.node_count()];
        let mut positions = vec![Position::new(0.0, 0.0); dag.node_count()];
        let order = generations
            .iter()
            .enumerate()
            .flat_map(|(layer, nodes)| nodes.iter().map(move |n| (layer, *n)));
        for ((layer, node), position) in order.zip(placed) {
            layers[node.index()] = layer;
            positions[node.index()] = position;
        }

        debug!(
            graph = %dag.name(),
            alignment = %self.options.alignment,
            generations = generations.len(),
            "layout computed"
        );

        Ok(Layout {
            alignment: self.options.alignment,
            generations,
            layers,
            positions,
        })
    }
}

/// Layer and position `dag` with the default scale and center.
pub fn layer_and_position(dag: &TaskDag, alignment: Alignment) -> Result<Layout> {
    LayeredLayout::new(LayoutOptions {
        alignment,
        ..LayoutOptions::default()
    })
    .compute(dag)
}
