// src/types.rs

use std::fmt;

use clap::ValueEnum;
use serde::Deserialize;

/// Which screen axis generations advance along.
///
/// - `Vertical`: generations are stacked top-to-bottom (rank → `y`), and
///   same-generation tasks are spread along `x`.
/// - `Horizontal`: generations advance left-to-right (rank → `x`), and
///   same-generation tasks are spread along `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Vertical,
    Horizontal,
}

impl Default for Alignment {
    fn default() -> Self {
        Alignment::Vertical
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alignment::Vertical => f.write_str("vertical"),
            Alignment::Horizontal => f.write_str("horizontal"),
        }
    }
}

/// Layout algorithm used to place nodes.
///
/// Only the layered multipartite layout exists today; the name still ends up
/// in the default output file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutAlgorithm {
    #[value(name = "multipartite-layout")]
    MultipartiteLayout,
}

impl Default for LayoutAlgorithm {
    fn default() -> Self {
        LayoutAlgorithm::MultipartiteLayout
    }
}

impl fmt::Display for LayoutAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutAlgorithm::MultipartiteLayout => f.write_str("multipartite-layout"),
        }
    }
}

/// What to do with a dependency that points at a task absent from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MissingDependencyPolicy {
    /// Fail the whole build with `TaskgraphError::MissingDependency`.
    Reject,
    /// Drop the dangling edge and log a warning.
    Skip,
}

impl Default for MissingDependencyPolicy {
    fn default() -> Self {
        MissingDependencyPolicy::Reject
    }
}
