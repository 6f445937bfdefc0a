//! Task command implementations

use chrono::{DateTime, Utc};
use colored::Colorize;
use futures::future::join_all;
use log::debug;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::client::models::parse_api_datetime;
use crate::client::tasks::mutation_error;
use crate::client::{Task, TaskApi, TaskCreateData};
use crate::error::{Error, Result, TaskError};
use crate::models::display::{TaskDisplay, format_task_pretty};
use crate::output::{Formattable, json};

/// Optional field changes requested by `task edit`
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub due: Option<String>,
}

impl TaskChanges {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.owner.is_none()
            && self.due.is_none()
    }
}

/// Reject due dates the backend would not understand
fn validate_due(due: Option<String>) -> Result<Option<String>> {
    match due {
        Some(d) if parse_api_datetime(&d).is_none() => Err(Error::Other(format!(
            "Invalid due date '{}'. Use YYYY-MM-DD or an RFC 3339 timestamp.",
            d
        ))),
        other => Ok(other),
    }
}

/// Keep tasks matching the optional status and overdue filters
pub fn filter_tasks(
    tasks: Vec<Task>,
    status: Option<&str>,
    overdue_only: bool,
    now: DateTime<Utc>,
) -> Vec<Task> {
    tasks
        .into_iter()
        .filter(|t| status.is_none_or(|s| t.status.eq_ignore_ascii_case(s)))
        .filter(|t| !overdue_only || t.is_overdue_at(now))
        .collect()
}

fn print_tasks(tasks: &[Task], format: OutputFormat) -> Result<()> {
    let now = Utc::now();
    match format {
        OutputFormat::Pretty => {
            if tasks.is_empty() {
                println!("No tasks found.");
            }
            for task in tasks {
                println!("{}", format_task_pretty(task, now));
            }
            Ok(())
        }
        _ => tasks
            .iter()
            .map(|t| TaskDisplay::at(t, now))
            .collect::<Vec<_>>()
            .print(format),
    }
}

fn print_task(task: &Task, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", json::format_json(task)?);
            Ok(())
        }
        _ => print_tasks(std::slice::from_ref(task), format),
    }
}

/// Run `task list`
pub async fn list(opts: &GlobalOptions, status: Option<String>, overdue: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_session().await?;

    let tasks = ctx.tasks.list_tasks().await;
    debug!("Fetched {} tasks", tasks.len());

    let tasks = filter_tasks(tasks, status.as_deref(), overdue, Utc::now());
    print_tasks(&tasks, ctx.format)
}

/// Run `task create`
pub async fn create(
    opts: &GlobalOptions,
    title: String,
    description: Option<String>,
    due: Option<String>,
    owner: Option<String>,
    status: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let user = ctx.require_session().await?;

    let data = TaskCreateData {
        title,
        description,
        due_date: validate_due(due)?,
        owner: owner.unwrap_or(user.id),
        status,
        ..Default::default()
    };

    let task = ctx.tasks.create_task(&data).await?;
    if ctx.format != OutputFormat::Json {
        println!("{} Created task #{}", "✓".green(), task.id);
    }
    print_task(&task, ctx.format)
}

/// Load a task, merge the requested changes over its editable fields and
/// send the result as a full replacement.
pub async fn edit_task(api: &dyn TaskApi, id: i64, changes: TaskChanges) -> Result<Task> {
    if changes.is_empty() {
        return Err(Error::Other(
            "Nothing to change. Pass at least one of --title, --description, --owner or --due."
                .to_string(),
        ));
    }

    let current = api
        .fetch_tasks()
        .await
        .map_err(|e| mutation_error(e, |source| TaskError::EditFailed { id, source }))?
        .into_iter()
        .find(|t| t.id == id)
        .ok_or(TaskError::NotFound(id))?;

    let mut edit = current.to_edit();
    if let Some(title) = changes.title {
        edit.title = title;
    }
    if let Some(description) = changes.description {
        edit.description = Some(description);
    }
    if let Some(owner) = changes.owner {
        edit.owner = owner;
    }
    if let Some(due) = validate_due(changes.due)? {
        edit.due_date = Some(due);
    }

    api.edit_task(id, &edit).await
}

/// Run `task edit`
pub async fn edit(opts: &GlobalOptions, id: i64, changes: TaskChanges) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_session().await?;

    let task = edit_task(&ctx.tasks, id, changes).await?;
    if ctx.format != OutputFormat::Json {
        println!("{} Updated task #{}", "✓".green(), task.id);
    }
    print_task(&task, ctx.format)
}

/// Delete every id concurrently; returns the ids that failed with their errors
pub async fn delete_tasks(api: &dyn TaskApi, ids: &[i64]) -> Vec<(i64, Error)> {
    let results = join_all(ids.iter().map(|&id| async move { (id, api.delete_task(id).await) })).await;

    results
        .into_iter()
        .filter_map(|(id, result)| result.err().map(|e| (id, e)))
        .collect()
}

/// Run `task delete`
pub async fn delete(opts: &GlobalOptions, ids: Vec<i64>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_session().await?;

    let failures = delete_tasks(&ctx.tasks, &ids).await;

    for id in ids.iter().filter(|id| !failures.iter().any(|(f, _)| f == *id)) {
        println!("{} Deleted task #{}", "✓".green(), id);
    }
    for (_, err) in &failures {
        eprintln!("{} {}", "✗".red(), err);
    }

    match failures.len() {
        0 => Ok(()),
        n => Err(Error::Other(format!("{} of {} deletions failed", n, ids.len()))),
    }
}
