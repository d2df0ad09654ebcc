// src/dag/mod.rs

//! Task graph representation.
//!
//! - [`record`] holds the raw task records read from a graph source.
//! - [`graph`] holds the directed graph of nodes keyed by task id, canonical
//!   label or kind.
//! - [`builder`] turns a snapshot of records into a graph.

pub mod builder;
pub mod graph;
pub mod record;

pub use builder::{build, GraphBuilder, NodeIdentity, UNKNOWN_KIND};
pub use graph::{DagEdge, DagNode, TaskDag};
pub use record::{Dependency, TaskId, TaskRecord, TaskSnapshot};
