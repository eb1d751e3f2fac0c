// Background sync: OS-triggered wake-ups create one demo record
//
// Contract: every invocation reports finished to the scheduler exactly
// once, success or failure. Failures are logged and swallowed; the OS
// never sees them. Overlapping invocations are assumed not to happen
// (scheduler precondition, not guarded here).

use crate::platform::background::{BackgroundScheduler, FetchConfig, TaskHandler};
use crate::store::posts::PostStore;
use crate::CoreError;
use async_trait::async_trait;
use std::sync::Arc;

pub struct BackgroundSync {
    scheduler: Arc<dyn BackgroundScheduler>,
    posts: PostStore,
}

impl BackgroundSync {
    pub fn new(scheduler: Arc<dyn BackgroundScheduler>, posts: PostStore) -> Self {
        Self { scheduler, posts }
    }

    /// Register the periodic-wake and timeout callbacks with the OS
    /// scheduler. Returns the scheduler status code.
    pub async fn configure(self: Arc<Self>) -> Result<i32, CoreError> {
        let status = self
            .scheduler
            .configure(FetchConfig::default(), Arc::clone(&self) as Arc<dyn TaskHandler>)
            .await?;
        tracing::info!(status, "background fetch configured");
        Ok(status)
    }

    /// One wake-up: create a demo record, then always report finished.
    pub async fn perform_task(&self, task_id: &str) {
        tracing::info!(task_id, "background fetch woke");

        let title = format!("New Post {}", crate::current_timestamp());
        match self.posts.create(&title, "created by background sync") {
            Ok(post) => tracing::info!(post_id = %post.id, "sync completed"),
            Err(e) => tracing::error!(error = %e, "sync failed"),
        }

        // Must run on every path or the OS penalizes future wake-ups
        if let Err(e) = self.scheduler.finish(task_id).await {
            tracing::error!(task_id, error = %e, "failed to signal task finish");
        }
    }
}

#[async_trait]
impl TaskHandler for BackgroundSync {
    async fn on_wake(&self, task_id: String) {
        self.perform_task(&task_id).await;
    }

    async fn on_timeout(&self, task_id: String) {
        tracing::warn!(task_id, "background fetch timeout");
        if let Err(e) = self.scheduler.finish(&task_id).await {
            tracing::error!(task_id, error = %e, "failed to signal task finish on timeout");
        }
    }
}
