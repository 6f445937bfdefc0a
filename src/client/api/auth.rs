//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::User;
use crate::error::Result;

/// Authentication operations for the task API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Sign in, store both tokens and return the signed-in user
    async fn login(&self, username: &str, password: &str) -> Result<User>;

    /// Sign out on the server. Returns `false` instead of failing.
    async fn logout(&self) -> bool;

    /// Replace the access token using the stored refresh token
    async fn refresh_token(&self) -> Result<()>;
}
