//! Error types for token handling, authentication and account operations
//!
//! Token decoding distinguishes several failure kinds, but those kinds are
//! for logs only. Anything that fails authentication surfaces to callers as
//! the single `AuthError::Invalid`, whose display text never varies.

use thiserror::Error;

/// Token decoding and issuance errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    MalformedToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Token validation failed")]
    ValidationFailed,

    #[error("Token identity must not be empty")]
    EmptyIdentity,

    #[error("Token generation failed")]
    GenerationFailed,
}

/// Why an authentication attempt was rejected
///
/// Internal detail carried by `AuthError::Invalid` for logging.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    #[error("token rejected: {0}")]
    Token(TokenError),

    #[error("token is missing its identity claim")]
    MissingIdentity,

    #[error("no user with the token's identity")]
    UnknownIdentity,

    #[error("token version {token} does not match current version {current}")]
    VersionMismatch { token: u64, current: u64 },

    #[error("user directory lookup failed")]
    DirectoryUnavailable,
}

/// Authentication failure as seen by callers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid token")]
    Invalid { reason: RejectionReason },
}

impl AuthError {
    /// Creates an invalid-token error for the given internal reason
    pub fn invalid(reason: RejectionReason) -> Self {
        AuthError::Invalid { reason }
    }

    /// Internal reason, for logging only
    pub fn reason(&self) -> &RejectionReason {
        match self {
            AuthError::Invalid { reason } => reason,
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        AuthError::invalid(RejectionReason::Token(err))
    }
}

/// Token revocation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RevokeError {
    #[error("User not found")]
    UserNotFound,

    #[error("Failed to persist token version: {0}")]
    PersistenceFailed(String),
}

/// Account registration and login errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Registration disabled")]
    RegistrationDisabled,

    #[error("Password hashing failed: {0}")]
    PasswordHashing(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display_is_uniform() {
        let reasons = [
            RejectionReason::Token(TokenError::Expired),
            RejectionReason::Token(TokenError::InvalidSignature),
            RejectionReason::MissingIdentity,
            RejectionReason::UnknownIdentity,
            RejectionReason::VersionMismatch { token: 0, current: 1 },
            RejectionReason::DirectoryUnavailable,
        ];

        for reason in reasons {
            assert_eq!(AuthError::invalid(reason).to_string(), "Invalid token");
        }
    }

    #[test]
    fn test_auth_error_keeps_reason_for_logs() {
        let error: AuthError = TokenError::MalformedToken.into();
        assert_eq!(error.reason(), &RejectionReason::Token(TokenError::MalformedToken));
        assert!(error.reason().to_string().contains("Malformed token"));
    }

    #[test]
    fn test_version_mismatch_reason_text() {
        let reason = RejectionReason::VersionMismatch { token: 1, current: 4 };
        assert_eq!(
            reason.to_string(),
            "token version 1 does not match current version 4"
        );
    }

    #[test]
    fn test_revoke_error_messages() {
        assert_eq!(RevokeError::UserNotFound.to_string(), "User not found");
        let error = RevokeError::PersistenceFailed("deadlock".to_string());
        assert!(error.to_string().contains("deadlock"));
    }
}
