// src/dag/record.rs

//! Raw task records as read from a graph source.

use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

/// Opaque task identifier (a Taskcluster task id or taskgraph label).
pub type TaskId = String;

/// A named reference from a task to an upstream task it requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Dependency name as written in the input (`"build"`, `"docker-image"`,
    /// or the list position for remote listings).
    pub name: String,
    /// Upstream task id.
    pub task_id: TaskId,
}

impl Dependency {
    pub fn new(name: impl Into<String>, task_id: impl Into<TaskId>) -> Self {
        Self {
            name: name.into(),
            task_id: task_id.into(),
        }
    }
}

/// One task of the input graph.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRecord {
    pub id: TaskId,
    pub label: String,
    /// Upstream dependencies in declaration order.
    pub dependencies: Vec<Dependency>,
    /// `attributes.kind` (file input) or `tags.kind` (remote input).
    pub kind: Option<String>,
    /// The complete raw record, passed through untouched as node `data`.
    pub data: Value,
}

/// One-shot, ordered snapshot of all task records of a graph.
///
/// Iteration order is input order, which decides both which record survives
/// a canonical merge and the order of nodes inside a layout generation.
#[derive(Debug, Clone, Default)]
pub struct TaskSnapshot {
    name: String,
    records: Vec<TaskRecord>,
    index: HashMap<TaskId, usize>,
}

impl TaskSnapshot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a snapshot from records; later duplicates of an id are dropped.
    pub fn from_records(
        name: impl Into<String>,
        records: impl IntoIterator<Item = TaskRecord>,
    ) -> Self {
        let mut snapshot = Self::new(name);
        for record in records {
            snapshot.push(record);
        }
        snapshot
    }

    /// Append a record. Returns `false` (and keeps the earlier record) if a
    /// record with the same id is already present.
    pub fn push(&mut self, record: TaskRecord) -> bool {
        if self.index.contains_key(&record.id) {
            warn!(task = %record.id, "duplicate task id in input; keeping first occurrence");
            return false;
        }
        self.index.insert(record.id.clone(), self.records.len());
        self.records.push(record);
        true
    }

    /// Graph name, used for logging and the default output file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> &[TaskRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&TaskRecord> {
        self.position(id).map(|i| &self.records[i])
    }

    /// Position of the record with `id` in input order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
