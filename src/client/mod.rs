//! Task API client
//!
//! Layering, leaf to root:
//! - [`session::SessionClient`] - shared HTTP client, base URL, default auth header
//! - [`refresh::TokenRefresher`] - single-flight access-token refresh
//! - [`interceptor::AuthInterceptor`] - refresh-and-replay on 401
//! - [`LoginClient`] / [`TaskClient`] - endpoint shaping behind [`AuthApi`] / [`TaskApi`]

pub mod api;
pub mod interceptor;
pub mod login;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod refresh;
pub mod session;
pub mod tasks;

pub use api::{AuthApi, TaskApi};
pub use interceptor::AuthInterceptor;
pub use login::LoginClient;
#[cfg(test)]
pub use mock::MockTaskClient;
pub use models::{Task, TaskCreateData, User};
pub use refresh::TokenRefresher;
pub use session::SessionClient;
pub use tasks::TaskClient;

/// `POST` credentials, receive a token pair and the user
pub const LOGIN_PATH: &str = "login/";

/// `POST` to end the server-side session
pub const LOGOUT_PATH: &str = "logout/";

/// `GET` the user owning the access token
pub const ME_PATH: &str = "me/";

/// Task collection
pub const TASKS_PATH: &str = "tasks/";
