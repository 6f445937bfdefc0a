//! Authentication models

use serde::{Deserialize, Serialize};

use super::User;
use crate::token::TokenPair;

/// Body of `POST login/`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response of `POST login/`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: User,
}

impl LoginResponse {
    pub fn token_pair(&self) -> TokenPair {
        TokenPair {
            access: self.access.clone(),
            refresh: self.refresh.clone(),
        }
    }
}

/// Body of `POST token/refresh/`
#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Response of `POST token/refresh/`
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}
