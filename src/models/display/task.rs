//! Task display models

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use super::common::{format_api_datetime, truncate_string};
use crate::client::Task;

/// Longest title shown in table output
const TITLE_WIDTH: usize = 40;

/// Task row for table/JSON output
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct TaskDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "DUE")]
    pub due: String,

    #[tabled(rename = "OWNER")]
    pub owner: String,

    #[tabled(skip)]
    pub overdue: bool,
}

impl TaskDisplay {
    /// Build a row, judging overdue-ness against `now`
    pub fn at(task: &Task, now: DateTime<Utc>) -> Self {
        let overdue = task.is_overdue_at(now);
        let mut due = format_api_datetime(task.due_date.as_deref());
        if overdue {
            due.push_str(" (overdue)");
        }

        Self {
            id: task.id,
            title: truncate_string(&task.title, TITLE_WIDTH),
            status: task.status.clone(),
            due,
            owner: task.owner.clone(),
            overdue,
        }
    }
}

/// Multi-line colored rendering of one task
pub fn format_task_pretty(task: &Task, now: DateTime<Utc>) -> String {
    let status = if task.completed() {
        task.status.green()
    } else if task.is_pending() {
        task.status.yellow()
    } else {
        task.status.cyan()
    };

    let mut out = format!("{} {} [{}]", format!("#{}", task.id).dimmed(), task.title.bold(), status);

    if let Some(description) = task.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(&format!("\n    {}", description));
    }

    if task.due_date.is_some() {
        let due = format_api_datetime(task.due_date.as_deref());
        if task.is_overdue_at(now) {
            out.push_str(&format!("\n    Due: {} {}", due.red(), "(overdue)".red().bold()));
        } else {
            out.push_str(&format!("\n    Due: {}", due));
        }
    }

    if task.completed() {
        out.push_str(&format!(
            "\n    Completed: {}",
            format_api_datetime(task.completed_at.as_deref())
        ));
    }

    out.push_str(&format!("\n    Owner: {}", task.owner));
    out
}
