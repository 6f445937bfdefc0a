//! Display model implementations for table and JSON output
//!
//! Display models transform API response types into CLI-friendly rows
//! with appropriate column names and serialization.

mod common;
mod task;
mod user;

pub use task::{TaskDisplay, format_task_pretty};
pub use user::UserDisplay;
