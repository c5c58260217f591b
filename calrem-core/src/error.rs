//! Error types for calrem.

use thiserror::Error;

/// Errors that can occur in calrem operations.
#[derive(Error, Debug)]
pub enum CalRemError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Please enter username and password.")]
    MissingCredentials,

    #[error("Invalid username or password.")]
    InvalidCredentials,

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("User '{0}' already exists")]
    UserExists(String),

    #[error("Not logged in. Run `calrem login` first.")]
    NotLoggedIn,

    #[error("Reminder not found: {0}")]
    ReminderNotFound(String),

    #[error("Invalid time '{0}'. Expected h:mm AM/PM (e.g. 9:30 AM)")]
    InvalidTime(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid reminder: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for calrem operations.
pub type CalRemResult<T> = Result<T, CalRemError>;
