//! API trait definitions split by responsibility
//!
//! - [`AuthApi`] - Login, logout and token refresh
//! - [`TaskApi`] - Task CRUD operations

mod auth;
mod tasks;

pub use auth::AuthApi;
pub use tasks::TaskApi;
