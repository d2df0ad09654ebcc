// src/source/remote.rs

//! Task groups listed from the Taskcluster queue.
//!
//! The queue's `listTaskGroup` endpoint is paginated: every page carries a
//! `continuationToken` until the last one. Pages are fetched one after the
//! other and appended before the next request; there is no retry.
//!
//! Each listed element looks like
//! `{"status": {"taskId": ...}, "task": {"dependencies": [...], "metadata": {"name": ...}, "tags": {"kind": ...}}}`.
//! Its dependency list is turned into regular [`Dependency`] entries, so the
//! graph builder draws edges from the dependency to the dependent task just
//! like it does for task graph files.

use std::future::Future;
use std::pin::Pin;

use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::dag::{Dependency, TaskRecord, TaskSnapshot};
use crate::errors::{Result, TaskgraphError};

/// One page of a task group listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskGroupPage {
    #[serde(default)]
    pub tasks: Vec<Value>,
    #[serde(default)]
    pub continuation_token: Option<String>,
}

/// Anything that can list one page of a task group.
///
/// Production code uses [`TaskclusterQueue`]; tests provide canned pages.
pub trait TaskGroupLister: Send + Sync {
    fn list_page<'a>(
        &'a self,
        task_group_id: &'a str,
        continuation_token: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<TaskGroupPage>> + Send + 'a>>;
}

/// HTTP client for the Taskcluster queue service.
#[derive(Debug, Clone)]
pub struct TaskclusterQueue {
    client: reqwest::Client,
    root_url: Url,
    page_size: Option<u32>,
}

impl TaskclusterQueue {
    /// `root_url` is the deployment root, e.g.
    /// `https://firefox-ci-tc.services.mozilla.com/`.
    pub fn new(root_url: &str, page_size: Option<u32>) -> Result<Self> {
        let root_url = parse_root_url(root_url)?;
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TaskgraphError::RemoteFetch(format!("building HTTP client: {e}")))?;
        Ok(Self {
            client,
            root_url,
            page_size,
        })
    }

    /// `GET {root}/api/queue/v1/task-group/{id}/list`
    pub fn list_url(&self, task_group_id: &str) -> Result<Url> {
        self.root_url
            .join(&format!("api/queue/v1/task-group/{task_group_id}/list"))
            .map_err(|e| {
                TaskgraphError::ConfigError(format!(
                    "cannot build listing URL for task group '{task_group_id}': {e}"
                ))
            })
    }
}

/// Parse a root URL, making sure it ends with `/` so relative joins append.
pub fn parse_root_url(root_url: &str) -> Result<Url> {
    let normalized = if root_url.ends_with('/') {
        root_url.to_string()
    } else {
        format!("{root_url}/")
    };
    Url::parse(&normalized)
        .map_err(|e| TaskgraphError::ConfigError(format!("invalid root URL '{root_url}': {e}")))
}

impl TaskGroupLister for TaskclusterQueue {
    fn list_page<'a>(
        &'a self,
        task_group_id: &'a str,
        continuation_token: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<TaskGroupPage>> + Send + 'a>> {
        Box::pin(async move {
            let url = self.list_url(task_group_id)?;
            let mut request = self.client.get(url);
            if let Some(token) = continuation_token {
                request = request.query(&[("continuationToken", token)]);
            }
            if let Some(limit) = self.page_size {
                request = request.query(&[("limit", limit)]);
            }

            let response = request.send().await.map_err(fetch_error)?;
            let response = response.error_for_status().map_err(fetch_error)?;
            response.json::<TaskGroupPage>().await.map_err(fetch_error)
        })
    }
}

fn fetch_error(err: reqwest::Error) -> TaskgraphError {
    TaskgraphError::RemoteFetch(err.to_string())
}

/// Fetch every page of a task group and convert it into a snapshot named
/// after the group.
pub async fn fetch_task_group(
    lister: &dyn TaskGroupLister,
    task_group_id: &str,
) -> Result<TaskSnapshot> {
    let mut elements: Vec<Value> = Vec::new();
    let mut token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = lister.list_page(task_group_id, token.as_deref()).await?;
        pages += 1;
        debug!(
            task_group = %task_group_id,
            page = pages,
            tasks = page.tasks.len(),
            "task group page fetched"
        );
        elements.extend(page.tasks);

        match page.continuation_token {
            Some(next) if !next.is_empty() => {
                if token.as_deref() == Some(next.as_str()) {
                    return Err(TaskgraphError::RemoteFetch(format!(
                        "listing of task group '{task_group_id}' returned the same continuation token twice"
                    )));
                }
                token = Some(next);
            }
            _ => break,
        }
    }

    info!(
        task_group = %task_group_id,
        pages,
        tasks = elements.len(),
        "task group listing complete"
    );

    let mut snapshot = TaskSnapshot::new(task_group_id);
    for element in elements {
        snapshot.push(task_group_record(element)?);
    }
    Ok(snapshot)
}

/// Convert one listing element into a [`TaskRecord`].
///
/// Label is `task.metadata.name` (falling back to the task id), kind is
/// `task.tags.kind` when present.
pub fn task_group_record(element: Value) -> Result<TaskRecord> {
    let id = element
        .pointer("/status/taskId")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            TaskgraphError::MalformedInput(
                "task group element without a `status.taskId` string".to_string(),
            )
        })?
        .to_string();

    let dependencies = match element.pointer("/task/dependencies") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(deps)) => deps
            .iter()
            .enumerate()
            .map(|(i, dep)| {
                dep.as_str()
                    .map(|dep| Dependency::new(i.to_string(), dep))
                    .ok_or_else(|| {
                        TaskgraphError::MalformedInput(format!(
                            "task '{id}': `task.dependencies` must contain task id strings"
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?,
        Some(_) => {
            return Err(TaskgraphError::MalformedInput(format!(
                "task '{id}': `task.dependencies` must be an array"
            )));
        }
    };

    let label = element
        .pointer("/task/metadata/name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| id.clone());

    let kind = element
        .pointer("/task/tags/kind")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(TaskRecord {
        id,
        label,
        dependencies,
        kind,
        data: element,
    })
}
