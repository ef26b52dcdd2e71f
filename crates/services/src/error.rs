//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{GradeError, UserError};
use storage::json_file::JsonFileInitError;
use storage::repository::StorageError;

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error(transparent)]
    Invalid(#[from] UserError),
    #[error("Username already exists")]
    UsernameTaken,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Message safe to render back into the form, or `None` for internal failures.
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        match self {
            AuthError::Invalid(_) | AuthError::UsernameTaken | AuthError::InvalidCredentials => {
                Some(self.to_string())
            }
            AuthError::Hashing(_) | AuthError::Storage(_) => None,
        }
    }
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Grade(#[from] GradeError),
    #[error("user not found")]
    UnknownUser,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("user not found")]
    UnknownUser,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `Notifier` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NotifyError {
    #[error("email is not configured")]
    Disabled,
    #[error("no recipient address")]
    MissingRecipient,
    #[error("mail provider responded with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    JsonFile(#[from] JsonFileInitError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}
