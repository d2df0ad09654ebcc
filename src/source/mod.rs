// src/source/mod.rs

//! Where task records come from.
//!
//! - [`file`] reads a task graph JSON file.
//! - [`remote`] lists a task group from the Taskcluster queue.
//!
//! Both produce a [`TaskSnapshot`]; everything downstream is source-agnostic.

pub mod file;
pub mod remote;

use std::fmt;
use std::path::PathBuf;

use crate::dag::TaskSnapshot;
use crate::errors::Result;
use crate::fs::FileSystem;

pub use file::{graph_name_for, load_taskgraph, parse_taskgraph};
pub use remote::{
    fetch_task_group, task_group_record, TaskGroupLister, TaskGroupPage, TaskclusterQueue,
};

/// Selected graph source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphSource {
    /// Local task graph JSON file.
    File(PathBuf),
    /// Remote task group id.
    TaskGroup(String),
}

impl GraphSource {
    /// Name used for logging and for the default output file name.
    pub fn graph_name(&self) -> String {
        match self {
            GraphSource::File(path) => graph_name_for(path),
            GraphSource::TaskGroup(id) => id.clone(),
        }
    }

    /// Load the snapshot. `lister` is only consulted for task groups.
    pub async fn load(
        &self,
        fs: &dyn FileSystem,
        lister: &dyn TaskGroupLister,
    ) -> Result<TaskSnapshot> {
        match self {
            GraphSource::File(path) => load_taskgraph(fs, path),
            GraphSource::TaskGroup(id) => fetch_task_group(lister, id).await,
        }
    }
}

impl fmt::Display for GraphSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphSource::File(path) => write!(f, "{}", path.display()),
            GraphSource::TaskGroup(id) => write!(f, "task-group-{id}"),
        }
    }
}
