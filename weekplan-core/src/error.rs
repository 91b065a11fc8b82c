//! Error types for the weekplan ecosystem.

use thiserror::Error;

/// Errors that can occur in weekplan operations.
#[derive(Error, Debug)]
pub enum WeekplanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Generation(String),

    #[error("Schedule API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid phone number: {0}")]
    InvalidPhoneNumber(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl WeekplanError {
    /// The generic, user-visible generation failure. Callers offer
    /// regeneration as the recovery action.
    pub fn generation_failed() -> Self {
        WeekplanError::Generation("Failed to generate schedule. Please try again.".to_string())
    }
}

/// Result type alias for weekplan operations.
pub type WeekplanResult<T> = Result<T, WeekplanError>;
