//! Login, registration and the persisted session.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::CalRemConfig;
use crate::error::{CalRemError, CalRemResult};
use crate::store::UserStore;
use crate::user::User;

/// The logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
}

pub struct Auth<'a, S: UserStore + ?Sized> {
    users: &'a S,
}

impl<'a, S: UserStore + ?Sized> Auth<'a, S> {
    pub fn new(users: &'a S) -> Self {
        Auth { users }
    }

    /// Check the password against the stored user record.
    pub async fn login(&self, username: &str, password: &str) -> CalRemResult<Session> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(CalRemError::MissingCredentials);
        }

        match self.users.get_user(username).await? {
            Some(user) if user.password_matches(password) => {
                tracing::info!(username, "login succeeded");
                Ok(Session {
                    username: username.to_string(),
                })
            }
            Some(_) => {
                tracing::warn!(username, "login rejected: wrong password");
                Err(CalRemError::InvalidCredentials)
            }
            None => {
                tracing::warn!(username, "login rejected: unknown user");
                Err(CalRemError::InvalidCredentials)
            }
        }
    }

    pub async fn register(
        &self,
        username: &str,
        password: &str,
        confirm: &str,
    ) -> CalRemResult<Session> {
        let (username, password, confirm) = (username.trim(), password.trim(), confirm.trim());
        if username.is_empty() || password.is_empty() || confirm.is_empty() {
            return Err(CalRemError::MissingCredentials);
        }
        if password != confirm {
            return Err(CalRemError::PasswordMismatch);
        }
        if self.users.get_user(username).await?.is_some() {
            return Err(CalRemError::UserExists(username.to_string()));
        }

        self.users.put_user(&User::new(username, password)).await?;
        tracing::info!(username, "user registered");

        Ok(Session {
            username: username.to_string(),
        })
    }
}

/// `session.toml` beside the config file, holding the logged-in username
/// between invocations.
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn default_location() -> CalRemResult<Self> {
        Ok(Self::at(CalRemConfig::config_dir()?.join("session.toml")))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        SessionFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> CalRemResult<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let session: Session =
            toml::from_str(&content).map_err(|e| CalRemError::Config(e.to_string()))?;
        Ok(Some(session))
    }

    /// The current session, or `NotLoggedIn`.
    pub fn require(&self) -> CalRemResult<Session> {
        self.load()?.ok_or(CalRemError::NotLoggedIn)
    }

    pub fn save(&self, session: &Session) -> CalRemResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(session).map_err(|e| CalRemError::Config(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Forget the session. Returns false when nobody was logged in.
    pub fn clear(&self) -> CalRemResult<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&self.path)?;
        Ok(true)
    }
}
