//! Task API data models
//!
//! Wire types exchanged with the backend, organized by resource.

mod auth;
mod task;
mod user;

pub use auth::{LoginRequest, LoginResponse, RefreshRequest, RefreshResponse};
pub use task::{Task, TaskCreateData, TaskEdit, parse_api_datetime};
pub use user::User;
