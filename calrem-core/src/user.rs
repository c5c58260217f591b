//! User records.

use serde::{Deserialize, Serialize};

/// A user document. The username doubles as the document id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
}

impl User {
    pub fn new(username: &str, password: &str) -> Self {
        User {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// Passwords are stored as entered, so this is a plain comparison.
    pub fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }
}
