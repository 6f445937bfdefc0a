//! Task CRUD client

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::TASKS_PATH;
use super::api::TaskApi;
use super::interceptor::AuthInterceptor;
use super::models::{Task, TaskCreateData, TaskEdit};
use super::session::ApiRequest;
use crate::error::{Error, Result, TaskError};

pub struct TaskClient {
    interceptor: Arc<AuthInterceptor>,
}

impl TaskClient {
    pub fn new(interceptor: Arc<AuthInterceptor>) -> Self {
        Self { interceptor }
    }
}

/// Path of a single task
fn task_path(id: i64) -> String {
    format!("{}{}/", TASKS_PATH, id)
}

/// Wrap a mutation failure; authentication failures pass through untouched so
/// the caller sees the sign-in hint.
pub(crate) fn mutation_error(err: Error, wrap: impl FnOnce(Box<Error>) -> TaskError) -> Error {
    match err {
        Error::Auth(_) => err,
        other => wrap(Box::new(other)).into(),
    }
}

#[async_trait]
impl TaskApi for TaskClient {
    async fn create_task(&self, data: &TaskCreateData) -> Result<Task> {
        let request = ApiRequest::post(TASKS_PATH).json(data)?;
        self.interceptor
            .execute(request)
            .await
            .and_then(|r| r.json())
            .map_err(|e| mutation_error(e, TaskError::CreateFailed))
    }

    async fn fetch_tasks(&self) -> Result<Vec<Task>> {
        let tasks = self
            .interceptor
            .execute(ApiRequest::get(TASKS_PATH))
            .await?
            .json::<Vec<Task>>()?;
        debug!("Fetched {} tasks", tasks.len());
        Ok(tasks)
    }

    async fn edit_task(&self, id: i64, data: &TaskEdit) -> Result<Task> {
        let request = ApiRequest::put(task_path(id)).json(data)?;
        self.interceptor
            .execute(request)
            .await
            .and_then(|r| r.json())
            .map_err(|e| mutation_error(e, |source| TaskError::EditFailed { id, source }))
    }

    async fn delete_task(&self, id: i64) -> Result<()> {
        self.interceptor
            .execute(ApiRequest::delete(task_path(id)))
            .await
            .map(|_| ())
            .map_err(|e| mutation_error(e, |source| TaskError::DeleteFailed { id, source }))
    }
}
