// src/source/file.rs

//! Task graphs stored as JSON files (`taskgraph` output, e.g.
//! `task-graph.json`).
//!
//! ```json
//! {
//!   "abc123": {
//!     "label": "build-linux64/opt",
//!     "dependencies": {"docker-image": "def456"},
//!     "attributes": {"kind": "build"},
//!     "task": {...}
//!   }
//! }
//! ```

use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::dag::{Dependency, TaskRecord, TaskSnapshot};
use crate::errors::{Result, TaskgraphError};
use crate::fs::FileSystem;

/// Read and parse a task graph file. The graph is named after the file stem.
pub fn load_taskgraph(fs: &dyn FileSystem, path: &Path) -> Result<TaskSnapshot> {
    let contents = fs.read_to_string(path)?;
    let name = graph_name_for(path);
    let snapshot = parse_taskgraph(&name, &contents)?;
    debug!(path = %path.display(), tasks = snapshot.len(), "task graph file loaded");
    Ok(snapshot)
}

/// Graph name derived from a task graph path (`data/ship-115.json` ->
/// `ship-115`).
pub fn graph_name_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "taskgraph".to_string())
}

/// Parse task graph JSON. Object order is kept as task order.
pub fn parse_taskgraph(name: &str, contents: &str) -> Result<TaskSnapshot> {
    let root: Value = serde_json::from_str(contents)
        .map_err(|e| TaskgraphError::MalformedInput(format!("invalid JSON: {e}")))?;

    let Value::Object(tasks) = root else {
        return Err(TaskgraphError::MalformedInput(
            "task graph must be a JSON object mapping task ids to tasks".to_string(),
        ));
    };

    let mut snapshot = TaskSnapshot::new(name);
    for (id, entry) in tasks {
        snapshot.push(parse_entry(id, entry)?);
    }
    Ok(snapshot)
}

fn parse_entry(id: String, entry: Value) -> Result<TaskRecord> {
    let Value::Object(fields) = &entry else {
        return Err(malformed(&id, "task entry must be an object"));
    };

    let label = match fields.get("label") {
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(malformed(&id, "`label` must be a string")),
        None => return Err(malformed(&id, "missing `label`")),
    };

    let dependencies = match fields.get("dependencies") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Object(deps)) => parse_dependencies(&id, deps)?,
        Some(_) => return Err(malformed(&id, "`dependencies` must be an object")),
    };

    let kind = match fields.get("attributes") {
        Some(Value::Object(attrs)) => match attrs.get("kind") {
            Some(Value::String(kind)) => kind.clone(),
            Some(_) => return Err(malformed(&id, "`attributes.kind` must be a string")),
            None => return Err(malformed(&id, "missing `attributes.kind`")),
        },
        Some(_) => return Err(malformed(&id, "`attributes` must be an object")),
        None => return Err(malformed(&id, "missing `attributes`")),
    };

    Ok(TaskRecord {
        id,
        label,
        dependencies,
        kind: Some(kind),
        data: entry,
    })
}

fn parse_dependencies(id: &str, deps: &Map<String, Value>) -> Result<Vec<Dependency>> {
    deps.iter()
        .map(|(name, upstream)| match upstream {
            Value::String(task_id) => Ok(Dependency::new(name.clone(), task_id.clone())),
            _ => Err(malformed(
                id,
                &format!("dependency '{name}' must map to a task id string"),
            )),
        })
        .collect()
}

fn malformed(id: &str, what: &str) -> TaskgraphError {
    TaskgraphError::MalformedInput(format!("task '{id}': {what}"))
}
