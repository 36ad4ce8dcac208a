//! Session store error types

use crate::session::validation::ValidationErrors;
use crate::storage::StorageError;
use thiserror::Error;

/// Errors returned by sign-in, sign-up and sign-out
#[derive(Error, Debug)]
pub enum AuthError {
    /// Wrong identifier/secret pair
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Sign-up form failed one or more field rules
    #[error("Invalid sign-up form: {0}")]
    Validation(ValidationErrors),

    /// Persisting or removing the session blob failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Validation patterns failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        AuthError::Storage(err.into())
    }
}

impl From<ValidationErrors> for AuthError {
    fn from(errors: ValidationErrors) -> Self {
        AuthError::Validation(errors)
    }
}

/// Result type alias for session operations
pub type AuthResult<T> = Result<T, AuthError>;
