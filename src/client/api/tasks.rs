//! Task API trait for CRUD operations

use async_trait::async_trait;
use log::warn;

use crate::client::models::{Task, TaskCreateData, TaskEdit};
use crate::error::Result;

/// Task operations for the task API
///
/// `list_tasks` is soft-fail and answers an empty list when the backend
/// errors. `fetch_tasks` returns the failure instead; mutations wrap theirs
/// in a [`TaskError`](crate::error::TaskError).
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Create a task
    async fn create_task(&self, data: &TaskCreateData) -> Result<Task>;

    /// Fetch the caller's tasks, failing on any backend or transport error
    async fn fetch_tasks(&self) -> Result<Vec<Task>>;

    /// List the caller's tasks; empty on any failure
    async fn list_tasks(&self) -> Vec<Task> {
        match self.fetch_tasks().await {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!("Listing tasks failed, showing none: {}", err);
                Vec::new()
            }
        }
    }

    /// Replace the editable fields of a task
    async fn edit_task(&self, id: i64, data: &TaskEdit) -> Result<Task>;

    /// Delete a task
    async fn delete_task(&self, id: i64) -> Result<()>;
}
