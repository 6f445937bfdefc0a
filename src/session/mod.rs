//! In-memory state of the signed-in user
//!
//! Populated by the navigation guard or a login; never persisted. Command
//! handlers receive it through the command context.

use serde::Serialize;

use crate::client::User;

/// Current user session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub id: String,
    pub username: String,
    /// "First Last"
    pub name: String,
    pub email: String,
}

/// Public view of the session user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub username: String,
    pub name: String,
    pub email: String,
}

impl SessionState {
    pub fn set_user(&mut self, user: &User) {
        self.id = user.id.clone();
        self.username = user.username.clone();
        self.name = format!("{} {}", user.first_name, user.last_name);
        self.email = user.email.clone();
    }

    pub fn logout(&mut self) {
        *self = Self::default();
    }

    pub fn is_authenticated(&self) -> bool {
        !self.username.is_empty()
    }

    pub fn user(&self) -> UserSummary {
        UserSummary {
            username: self.username.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}
