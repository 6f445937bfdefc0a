//! Session user display model

use serde::Serialize;
use tabled::Tabled;

use crate::session::SessionState;

/// Signed-in user for table/JSON output
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct UserDisplay {
    #[tabled(rename = "USERNAME")]
    pub username: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,
}

impl From<&SessionState> for UserDisplay {
    fn from(state: &SessionState) -> Self {
        let user = state.user();
        let name = user.name.trim();
        Self {
            username: user.username,
            name: if name.is_empty() {
                "--".to_string()
            } else {
                name.to_string()
            },
            email: if user.email.is_empty() {
                "--".to_string()
            } else {
                user.email
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_display_placeholders() {
        let state = SessionState {
            id: "1".to_string(),
            username: "bob".to_string(),
            name: " ".to_string(),
            email: String::new(),
        };
        let display = UserDisplay::from(&state);
        assert_eq!(display.username, "bob");
        assert_eq!(display.name, "--");
        assert_eq!(display.email, "--");
    }
}
