use actix_web::{
    error::{InternalError, QueryPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};
use validator::ValidationErrors;

use crate::dto::{ErrorResponse, ErrorResponseExt};
use ev_core::errors::{AccountError, AuthError, DomainError, RevokeError};
use ev_shared::error_codes;

/// Message returned for every rejected token, whatever the cause
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token";

/// Uniform 401 for any authentication failure
pub fn unauthorized() -> HttpResponse {
    ErrorResponse::new(error_codes::TOKEN_INVALID, INVALID_TOKEN_MESSAGE)
        .to_response(StatusCode::UNAUTHORIZED)
}

/// Handle auth errors without revealing the internal reason
pub fn handle_auth_error(error: &AuthError) -> HttpResponse {
    log::debug!("Authentication rejected: {}", error.reason());
    unauthorized()
}

/// Convert request validation failures into a 400 with per-field details
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request parameters");

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field.to_string(), messages);
    }

    response.to_response(StatusCode::BAD_REQUEST)
}

/// Report query strings that fail to deserialize as a JSON 400
///
/// Registered through `web::QueryConfig`; covers missing and mistyped
/// parameters before the handler's own `validator` rules run.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected query string: {}", err);
    let response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request parameters")
        .add_detail("query", err.to_string())
        .to_response(StatusCode::BAD_REQUEST);
    InternalError::from_response(err, response).into()
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(auth_error) => handle_auth_error(auth_error),
        DomainError::Token(token_error) => {
            log::error!("Token error: {}", token_error);
            internal_error()
        }

        DomainError::Account(account_error) => match account_error {
            AccountError::EmailAlreadyRegistered => {
                ErrorResponse::new(error_codes::CONFLICT, "Email already registered")
                    .to_response(StatusCode::CONFLICT)
            }
            AccountError::InvalidCredentials => {
                ErrorResponse::new(error_codes::INVALID_CREDENTIALS, "Invalid email or password")
                    .to_response(StatusCode::UNAUTHORIZED)
            }
            AccountError::RegistrationDisabled => {
                ErrorResponse::new(error_codes::FORBIDDEN, "Registration is disabled")
                    .to_response(StatusCode::FORBIDDEN)
            }
            AccountError::PasswordHashing(_) => {
                log::error!("Account error: {}", account_error);
                internal_error()
            }
        },

        DomainError::Revoke(revoke_error) => match revoke_error {
            RevokeError::UserNotFound => {
                ErrorResponse::new(error_codes::NOT_FOUND, "User not found")
                    .to_response(StatusCode::NOT_FOUND)
            }
            RevokeError::PersistenceFailed(_) => {
                log::error!("Revoke error: {}", revoke_error);
                ErrorResponse::new(error_codes::DATABASE_ERROR, "Could not update token version")
                    .to_response(StatusCode::INTERNAL_SERVER_ERROR)
            }
        },

        DomainError::Validation { message } => {
            ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone())
                .to_response(StatusCode::BAD_REQUEST)
        }
        DomainError::NotFound { resource } => {
            ErrorResponse::new(error_codes::NOT_FOUND, format!("{} not found", resource))
                .to_response(StatusCode::NOT_FOUND)
        }
        DomainError::Database(_) | DomainError::Internal { .. } => {
            log::error!("Domain Error: {:?}", error);
            internal_error()
        }
    }
}

/// Generic 500 that reveals nothing about the cause
pub fn internal_error() -> HttpResponse {
    ErrorResponse::new(error_codes::INTERNAL_ERROR, "An internal error occurred")
        .to_response(StatusCode::INTERNAL_SERVER_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ev_core::errors::{RejectionReason, TokenError};

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                DomainError::Auth(AuthError::invalid(RejectionReason::UnknownIdentity)),
                StatusCode::UNAUTHORIZED,
            ),
            (AccountError::InvalidCredentials.into(), StatusCode::UNAUTHORIZED),
            (AccountError::EmailAlreadyRegistered.into(), StatusCode::CONFLICT),
            (AccountError::RegistrationDisabled.into(), StatusCode::FORBIDDEN),
            (RevokeError::UserNotFound.into(), StatusCode::NOT_FOUND),
            (
                RevokeError::PersistenceFailed("down".to_string()).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                DomainError::Token(TokenError::GenerationFailed),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                DomainError::Database("down".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(handle_domain_error(&error).status(), status, "{:?}", error);
        }
    }
}
