use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use taskgraph_viz::errors::{Result, TaskgraphError};
use taskgraph_viz::source::{TaskGroupLister, TaskGroupPage};

/// A fake task group lister that:
/// - serves canned pages, chained by tokens `"page-1"`, `"page-2"`, ...
/// - records every continuation token it was asked for.
#[derive(Clone, Default)]
pub struct FakeLister {
    pages: Vec<Vec<Value>>,
    calls: Arc<Mutex<Vec<Option<String>>>>,
}

impl FakeLister {
    pub fn new(pages: Vec<Vec<Value>>) -> Self {
        Self {
            pages,
            calls: Arc::default(),
        }
    }

    /// A lister with no pages; any request fails.
    pub fn unreachable() -> Self {
        Self::default()
    }

    /// Continuation tokens received, in call order.
    pub fn calls(&self) -> Vec<Option<String>> {
        self.calls.lock().unwrap().clone()
    }

    fn page(&self, token: Option<&str>) -> Result<TaskGroupPage> {
        let index = match token {
            None => 0,
            Some(t) => t
                .strip_prefix("page-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| TaskgraphError::RemoteFetch(format!("unknown token {t}")))?,
        };
        let tasks = self
            .pages
            .get(index)
            .cloned()
            .ok_or_else(|| TaskgraphError::RemoteFetch(format!("no page {index}")))?;
        let continuation_token = (index + 1 < self.pages.len()).then(|| format!("page-{}", index + 1));
        Ok(TaskGroupPage {
            tasks,
            continuation_token,
        })
    }
}

impl TaskGroupLister for FakeLister {
    fn list_page<'a>(
        &'a self,
        _task_group_id: &'a str,
        continuation_token: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<TaskGroupPage>> + Send + 'a>> {
        self.calls
            .lock()
            .unwrap()
            .push(continuation_token.map(str::to_string));
        let page = self.page(continuation_token);
        Box::pin(async move { page })
    }
}

/// A lister that always hands back the same continuation token.
#[derive(Clone, Default)]
pub struct LoopingLister;

impl TaskGroupLister for LoopingLister {
    fn list_page<'a>(
        &'a self,
        _task_group_id: &'a str,
        _continuation_token: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<TaskGroupPage>> + Send + 'a>> {
        Box::pin(async move {
            Ok(TaskGroupPage {
                tasks: Vec::new(),
                continuation_token: Some("again".to_string()),
            })
        })
    }
}
