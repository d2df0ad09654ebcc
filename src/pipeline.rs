// src/pipeline.rs

//! The synchronous core: snapshot → DAG → layout → document.
//!
//! Nothing here touches the filesystem or the network, so the whole
//! conversion can be exercised from tests with in-memory snapshots.

use tracing::debug;

use crate::canonical::{default_locales, LabelCanonicalizer};
use crate::dag::{GraphBuilder, NodeIdentity, TaskDag, TaskSnapshot};
use crate::errors::Result;
use crate::layout::{LayeredLayout, Layout, LayoutOptions};
use crate::serialize::{serialize, SerializeOptions, SerializedGraph};
use crate::types::MissingDependencyPolicy;

/// Which node identity to build the graph with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityMode {
    /// One node per task.
    #[default]
    TaskId,
    /// Chunk/locale/partner variants share a node.
    CanonicalLabel,
    /// One node per task kind.
    Kind,
}

/// Everything the core needs besides the snapshot.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub identity: IdentityMode,
    /// Locale codes for [`IdentityMode::CanonicalLabel`].
    pub locales: Vec<String>,
    pub missing_dependencies: MissingDependencyPolicy,
    pub layout: LayoutOptions,
    pub serialize: SerializeOptions,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            identity: IdentityMode::default(),
            locales: default_locales(),
            missing_dependencies: MissingDependencyPolicy::default(),
            layout: LayoutOptions::default(),
            serialize: SerializeOptions::default(),
        }
    }
}

/// Output of one pipeline pass.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub dag: TaskDag,
    pub layout: Layout,
    pub graph: SerializedGraph,
}

/// Build, lay out and serialize `snapshot`.
///
/// Any error (missing dependency, cycle) aborts before a document exists.
pub fn render(snapshot: &TaskSnapshot, options: &PipelineOptions) -> Result<Rendered> {
    let dag = build_dag(snapshot, options)?;
    let layout = LayeredLayout::new(options.layout).compute(&dag)?;
    let graph = serialize(&dag, &layout, options.serialize)?;
    debug!(graph = %dag.name(), "pipeline finished");
    Ok(Rendered { dag, layout, graph })
}

/// Build the DAG with the identity and policy from `options`.
pub fn build_dag(snapshot: &TaskSnapshot, options: &PipelineOptions) -> Result<TaskDag> {
    let builder = GraphBuilder::new().missing_dependencies(options.missing_dependencies);
    match options.identity {
        IdentityMode::TaskId => builder.identity(NodeIdentity::TaskId).build(snapshot),
        IdentityMode::Kind => builder.identity(NodeIdentity::Kind).build(snapshot),
        IdentityMode::CanonicalLabel => {
            let canonicalizer = LabelCanonicalizer::new(&options.locales)?;
            builder.canonicalize_with(&canonicalizer).build(snapshot)
        }
    }
}

/// Pretty-printed JSON (two-space indent) of the document.
pub fn to_json(graph: &SerializedGraph) -> Result<String> {
    Ok(serde_json::to_string_pretty(graph)?)
}
