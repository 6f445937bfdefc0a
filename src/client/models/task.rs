//! Task models

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::string_or_number;

/// Status value of a finished task
pub const STATUS_COMPLETED: &str = "completed";

/// Status value of a task that has not been started
pub const STATUS_PENDING: &str = "pending";

/// Task resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub status: String,

    pub created_at: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,

    #[serde(deserialize_with = "string_or_number")]
    pub owner: String,
}

impl Task {
    pub fn completed(&self) -> bool {
        self.status == STATUS_COMPLETED
    }

    pub fn is_pending(&self) -> bool {
        self.status == STATUS_PENDING
    }

    /// Parsed due date, `None` when unset or unparseable
    pub fn due(&self) -> Option<DateTime<Utc>> {
        self.due_date.as_deref().and_then(parse_api_datetime)
    }

    /// Overdue when a due date is set, lies before `now`, and the task is not completed.
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        match self.due() {
            Some(due) => now > due && !self.completed(),
            None => false,
        }
    }

    /// Editable subset of this task, used as the base for a `PUT`
    pub fn to_edit(&self) -> TaskEdit {
        TaskEdit {
            title: self.title.clone(),
            description: self.description.clone(),
            owner: self.owner.clone(),
            due_date: self.due_date.clone(),
        }
    }
}

/// Body of `POST tasks/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskCreateData {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    pub owner: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Body of `PUT tasks/{id}/`.
///
/// Status and timestamps are server-managed and cannot be edited. Unset
/// optional fields are sent as `null` so a replacement can clear them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEdit {
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    pub owner: String,

    #[serde(default)]
    pub due_date: Option<String>,
}

/// Parse the timestamp formats the backend emits.
///
/// Accepts RFC 3339, naive date-times (read as UTC) and bare dates (midnight UTC).
pub fn parse_api_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
