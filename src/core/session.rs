use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub name: String,
    pub email: String,
}

/// Authenticated-user state for the current application instance. Persisted
/// across restarts and restored without re-validating credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub is_authenticated: bool,
    pub user: Option<User>,
}

impl Session {
    pub fn logged_out() -> Self {
        Self {
            is_authenticated: false,
            user: None,
        }
    }

    pub fn logged_in(user: User) -> Self {
        Self {
            is_authenticated: true,
            user: Some(user),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::logged_out()
    }
}
