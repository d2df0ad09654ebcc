// src/lib.rs

pub mod canonical;
pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod fs;
pub mod layout;
pub mod logging;
pub mod pipeline;
pub mod serialize;
pub mod source;
pub mod types;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::cli::CliArgs;
use crate::config::loader::load_or_default;
use crate::config::model::ConfigFile;
use crate::errors::{Result, TaskgraphError};
use crate::fs::{FileSystem, RealFileSystem};
use crate::layout::LayoutOptions;
use crate::pipeline::{render, to_json, IdentityMode, PipelineOptions};
use crate::serialize::SerializeOptions;
use crate::source::{GraphSource, TaskGroupLister, TaskclusterQueue};
use crate::types::{Alignment, LayoutAlgorithm};

/// Fully resolved settings for one run: CLI flags layered over the config.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub source: GraphSource,
    pub output: PathBuf,
    pub layout_algorithm: LayoutAlgorithm,
    pub pipeline: PipelineOptions,
}

impl RunSettings {
    pub fn resolve(args: &CliArgs, cfg: &ConfigFile) -> Result<Self> {
        let source = args.source().ok_or_else(|| {
            TaskgraphError::ConfigError(
                "one of --input-file or --task-group is required".to_string(),
            )
        })?;
        if args.canonicalize && args.kinds {
            return Err(TaskgraphError::ConfigError(
                "--canonicalize and --kinds cannot be combined".to_string(),
            ));
        }

        let alignment = args.alignment.unwrap_or(cfg.layout.alignment);
        let layout_algorithm = args.layout.unwrap_or(cfg.layout.algorithm);

        let identity = if args.canonicalize {
            IdentityMode::CanonicalLabel
        } else if args.kinds {
            IdentityMode::Kind
        } else {
            IdentityMode::TaskId
        };

        let output = match &args.output {
            Some(path) => path.clone(),
            None => default_output_path(
                &cfg.output.directory,
                &source.graph_name(),
                layout_algorithm,
                alignment,
            ),
        };

        let pipeline = PipelineOptions {
            identity,
            locales: cfg.canonicalize.locales.clone(),
            missing_dependencies: args
                .missing_dependencies
                .unwrap_or(cfg.build.missing_dependencies),
            layout: LayoutOptions {
                alignment,
                scale: cfg.layout.scale,
                center: (cfg.layout.center[0], cfg.layout.center[1]),
            },
            serialize: SerializeOptions {
                include_data: cfg.output.include_data && !args.no_data,
            },
        };

        Ok(Self {
            source,
            output,
            layout_algorithm,
            pipeline,
        })
    }
}

/// `{dir}/{name}-{layout}-{alignment}.json`
pub fn default_output_path(
    dir: &Path,
    name: &str,
    layout: LayoutAlgorithm,
    alignment: Alignment,
) -> PathBuf {
    dir.join(format!("{name}-{layout}-{alignment}.json"))
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub graph_name: String,
    /// Number of nodes.
    pub graph_order: usize,
    /// Number of edge records written.
    pub graph_size: usize,
    pub layout_algorithm: LayoutAlgorithm,
    pub layout_alignment: Alignment,
    pub input_graph: String,
    pub output_file: PathBuf,
}

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - graph source selection (file or remote task group)
/// - the build → layout → serialize pipeline
/// - writing the output document
pub async fn run(args: CliArgs) -> Result<RunSummary> {
    let fs = RealFileSystem;
    let cfg = load_or_default(&fs, args.config.as_deref())?;
    let settings = RunSettings::resolve(&args, &cfg)?;
    let queue = TaskclusterQueue::new(&cfg.remote.root_url, cfg.remote.page_size)?;
    execute(&settings, &fs, &queue).await
}

/// Run one conversion with explicit collaborators.
///
/// The output file is only written once the whole document has been built;
/// any failure before that leaves the filesystem untouched.
pub async fn execute(
    settings: &RunSettings,
    fs: &dyn FileSystem,
    lister: &dyn TaskGroupLister,
) -> Result<RunSummary> {
    let snapshot = settings.source.load(fs, lister).await?;
    let rendered = render(&snapshot, &settings.pipeline)?;
    let json = to_json(&rendered.graph)?;
    fs.write_atomic(&settings.output, json.as_bytes())?;

    let summary = RunSummary {
        graph_name: snapshot.name().to_string(),
        graph_order: rendered.graph.nodes.len(),
        graph_size: rendered.graph.edges.len(),
        layout_algorithm: settings.layout_algorithm,
        layout_alignment: settings.pipeline.layout.alignment,
        input_graph: settings.source.to_string(),
        output_file: settings.output.clone(),
    };

    info!(
        graph_name = %summary.graph_name,
        graph_order = summary.graph_order,
        graph_size = summary.graph_size,
        layout_algorithm = %summary.layout_algorithm,
        layout_alignment = %summary.layout_alignment,
        input_graph = %summary.input_graph,
        output_file = %summary.output_file.display(),
        "graph serialized"
    );

    Ok(summary)
}
