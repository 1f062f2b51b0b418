//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{AccountError, AuthError, RejectionReason, RevokeError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Revoke(#[from] RevokeError),

    #[error(transparent)]
    Account(#[from] AccountError),
}

pub type DomainResult<T> = Result<T, DomainError>;
