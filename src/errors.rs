// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskgraphError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Missing dependency: task '{task}' depends on unknown task '{dependency}'")]
    MissingDependency { task: String, dependency: String },

    #[error("Cycle detected in task graph: {0}")]
    CyclicGraph(String),

    #[error("Remote fetch error: {0}")]
    RemoteFetch(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Layout does not match graph: {0}")]
    LayoutMismatch(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Failure carrying extra context, such as the path of a failed read.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, TaskgraphError>;
