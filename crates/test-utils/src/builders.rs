#![allow(dead_code)]

use serde_json::{json, Map, Value};
use taskgraph_viz::dag::{Dependency, TaskRecord, TaskSnapshot};

/// Builder for a single `TaskRecord`.
pub struct TaskRecordBuilder {
    record: TaskRecord,
}

impl TaskRecordBuilder {
    /// A task whose label equals its id, of kind `test`.
    pub fn new(id: &str) -> Self {
        Self {
            record: TaskRecord {
                id: id.to_string(),
                label: id.to_string(),
                dependencies: Vec::new(),
                kind: Some("test".to_string()),
                data: json!({ "id": id }),
            },
        }
    }

    pub fn label(mut self, label: &str) -> Self {
        self.record.label = label.to_string();
        self
    }

    pub fn kind(mut self, kind: &str) -> Self {
        self.record.kind = Some(kind.to_string());
        self
    }

    pub fn no_kind(mut self) -> Self {
        self.record.kind = None;
        self
    }

    /// Depend on `upstream`; the dependency is named after it.
    pub fn after(mut self, upstream: &str) -> Self {
        self.record
            .dependencies
            .push(Dependency::new(upstream, upstream));
        self
    }

    pub fn data(mut self, data: Value) -> Self {
        self.record.data = data;
        self
    }

    pub fn build(self) -> TaskRecord {
        self.record
    }
}

/// Builder for an ordered `TaskSnapshot`.
pub struct SnapshotBuilder {
    name: String,
    records: Vec<TaskRecord>,
}

impl SnapshotBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            records: Vec::new(),
        }
    }

    pub fn with(mut self, record: TaskRecordBuilder) -> Self {
        self.records.push(record.build());
        self
    }

    /// Shorthand for a plain task with the given upstream ids.
    pub fn task(self, id: &str, after: &[&str]) -> Self {
        let record = after
            .iter()
            .fold(TaskRecordBuilder::new(id), |r, dep| r.after(dep));
        self.with(record)
    }

    pub fn build(self) -> TaskSnapshot {
        TaskSnapshot::from_records(self.name, self.records)
    }
}

/// Chain `A -> B -> C -> D`.
pub fn chain() -> TaskSnapshot {
    SnapshotBuilder::new("chain")
        .task("A", &[])
        .task("B", &["A"])
        .task("C", &["B"])
        .task("D", &["C"])
        .build()
}

/// Diamond `A -> {B, C} -> D`.
pub fn diamond() -> TaskSnapshot {
    SnapshotBuilder::new("diamond")
        .task("A", &[])
        .task("B", &["A"])
        .task("C", &["A"])
        .task("D", &["B", "C"])
        .build()
}

/// Builder for task graph JSON in the file input format.
pub struct TaskGraphJsonBuilder {
    tasks: Map<String, Value>,
}

impl TaskGraphJsonBuilder {
    pub fn new() -> Self {
        Self { tasks: Map::new() }
    }

    /// Add task `id` with `label`, `kind` and upstream task ids.
    pub fn task(mut self, id: &str, label: &str, kind: &str, after: &[&str]) -> Self {
        let dependencies: Map<String, Value> = after
            .iter()
            .map(|dep| (format!("dep-{dep}"), Value::String(dep.to_string())))
            .collect();
        self.tasks.insert(
            id.to_string(),
            json!({
                "label": label,
                "dependencies": dependencies,
                "attributes": { "kind": kind },
                "task": { "metadata": { "name": label } },
            }),
        );
        self
    }

    pub fn build(self) -> String {
        Value::Object(self.tasks).to_string()
    }
}

impl Default for TaskGraphJsonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// One element of a task group listing.
pub fn listing_element(task_id: &str, name: &str, kind: Option<&str>, deps: &[&str]) -> Value {
    let mut tags = Map::new();
    if let Some(kind) = kind {
        tags.insert("kind".to_string(), Value::String(kind.to_string()));
    }
    json!({
        "status": { "taskId": task_id, "state": "completed" },
        "task": {
            "dependencies": deps,
            "metadata": { "name": name },
            "tags": tags,
        },
    })
}
