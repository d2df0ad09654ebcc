// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueEnum};

use crate::source::GraphSource;
use crate::types::{Alignment, LayoutAlgorithm, MissingDependencyPolicy};

/// Command-line arguments for `taskgraph-viz`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskgraph-viz",
    version,
    about = "Serialize Taskcluster task graphs and task groups into laid-out graphology graphs.",
    long_about = None
)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["input_file", "task_group"])
))]
pub struct CliArgs {
    /// Path to a task graph JSON file.
    #[arg(short = 'i', long, value_name = "PATH")]
    pub input_file: Option<PathBuf>,

    /// Taskcluster task group id to list and serialize.
    #[arg(short = 'g', long, value_name = "ID")]
    pub task_group: Option<String>,

    /// Path of the output document.
    ///
    /// Default: `<output dir>/<name>-<layout>-<alignment>.json`.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Layout algorithm.
    #[arg(short = 'l', long, value_enum, value_name = "LAYOUT")]
    pub layout: Option<LayoutAlgorithm>,

    /// Direction in which generations advance.
    #[arg(short = 'a', long, value_enum, value_name = "ALIGNMENT")]
    pub alignment: Option<Alignment>,

    /// Collapse chunk/locale/partner variants of a job into one node.
    #[arg(long, conflicts_with = "kinds")]
    pub canonicalize: bool,

    /// Draw one node per task kind instead of one per task.
    #[arg(long)]
    pub kinds: bool,

    /// What to do with dependencies on tasks that are not in the input.
    #[arg(long, value_enum, value_name = "POLICY")]
    pub missing_dependencies: Option<MissingDependencyPolicy>,

    /// Leave raw task payloads out of node attributes.
    #[arg(long)]
    pub no_data: bool,

    /// Path to a TOML config file. Built-in defaults are used if omitted.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKGRAPH_VIZ_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

impl CliArgs {
    /// The graph source selected on the command line.
    pub fn source(&self) -> Option<GraphSource> {
        match (&self.input_file, &self.task_group) {
            (Some(path), _) => Some(GraphSource::File(path.clone())),
            (None, Some(group)) => Some(GraphSource::TaskGroup(group.clone())),
            (None, None) => None,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
