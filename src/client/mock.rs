//! Mock task API client for testing
//!
//! Keeps tasks in memory and behaves like the backend for the CRUD
//! endpoints, so command handlers can be tested without HTTP.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::api::TaskApi;
use super::models::{Task, TaskCreateData, TaskEdit};
use crate::error::{ApiError, Error, Result, TaskError};

/// Mock task client.
///
/// # Example
/// ```ignore
/// let mock = MockTaskClient::new().with_tasks(vec![task]).await;
/// let tasks = mock.list_tasks().await;
/// assert_eq!(tasks.len(), 1);
/// ```
#[derive(Default)]
pub struct MockTaskClient {
    /// Backing task table
    tasks: Arc<Mutex<Vec<Task>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Bodies sent to edit_task, in order
    captured_edits: Arc<Mutex<Vec<(i64, TaskEdit)>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub create_task: usize,
    /// Reads through either `list_tasks` or `fetch_tasks`
    pub list_tasks: usize,
    pub edit_task: usize,
    pub delete_task: usize,
}

impl MockTaskClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the task table
    pub async fn with_tasks(self, tasks: Vec<Task>) -> Self {
        *self.tasks.lock().await = tasks;
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    pub async fn captured_edits(&self) -> Vec<(i64, TaskEdit)> {
        self.captured_edits.lock().await.clone()
    }

    pub async fn tasks(&self) -> Vec<Task> {
        self.tasks.lock().await.clone()
    }

    async fn take_error(&self) -> Option<Error> {
        self.error.lock().await.take().map(Error::from)
    }
}

#[async_trait]
impl TaskApi for MockTaskClient {
    async fn create_task(&self, data: &TaskCreateData) -> Result<Task> {
        self.call_count.lock().await.create_task += 1;
        if let Some(err) = self.take_error().await {
            return Err(TaskError::CreateFailed(Box::new(err)).into());
        }

        let mut tasks = self.tasks.lock().await;
        let id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let task = Task {
            id,
            title: data.title.clone(),
            description: data.description.clone(),
            status: data.status.clone().unwrap_or_else(|| "pending".to_string()),
            created_at: chrono::Utc::now().to_rfc3339(),
            updated_at: None,
            due_date: data.due_date.clone(),
            completed_at: None,
            owner: data.owner.clone(),
        };
        tasks.push(task.clone());
        Ok(task)
    }

    async fn fetch_tasks(&self) -> Result<Vec<Task>> {
        self.call_count.lock().await.list_tasks += 1;
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        Ok(self.tasks.lock().await.clone())
    }

    async fn edit_task(&self, id: i64, data: &TaskEdit) -> Result<Task> {
        self.call_count.lock().await.edit_task += 1;
        self.captured_edits.lock().await.push((id, data.clone()));
        if let Some(err) = self.take_error().await {
            return Err(TaskError::EditFailed {
                id,
                source: Box::new(err),
            }
            .into());
        }

        let mut tasks = self.tasks.lock().await;
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Err(TaskError::EditFailed {
                id,
                source: Box::new(ApiError::NotFound(format!("tasks/{}/", id)).into()),
            }
            .into());
        };

        task.title = data.title.clone();
        task.description = data.description.clone();
        task.owner = data.owner.clone();
        task.due_date = data.due_date.clone();
        Ok(task.clone())
    }

    async fn delete_task(&self, id: i64) -> Result<()> {
        self.call_count.lock().await.delete_task += 1;
        if let Some(err) = self.take_error().await {
            return Err(TaskError::DeleteFailed {
                id,
                source: Box::new(err),
            }
            .into());
        }

        let mut tasks = self.tasks.lock().await;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(TaskError::DeleteFailed {
                id,
                source: Box::new(ApiError::NotFound(format!("tasks/{}/", id)).into()),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_create_assigns_ids() {
        let mock = MockTaskClient::new();
        let data = TaskCreateData {
            title: "One".to_string(),
            owner: "1".to_string(),
            ..Default::default()
        };

        let first = mock.create_task(&data).await.unwrap();
        let second = mock.create_task(&data).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(first.is_pending());
        assert_eq!(mock.list_tasks().await.len(), 2);
    }

    #[tokio::test]
    async fn test_mock_error_is_consumed_once() {
        let mock = MockTaskClient::new()
            .with_error(ApiError::ServerError("boom".to_string()))
            .await;

        assert!(mock.list_tasks().await.is_empty());
        let counts = mock.call_counts().await;
        assert_eq!(counts.list_tasks, 1);

        let err = mock.delete_task(1).await.unwrap_err();
        assert!(matches!(err, Error::Task(TaskError::DeleteFailed { id: 1, .. })));
    }
}
