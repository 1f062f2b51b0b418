use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{MessageResponse, RegisterRequest, TokenData};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use ev_core::repositories::UserRepository;
use ev_core::services::auth::PasswordHasher;

use super::AppState;

/// Handler for POST /api/v1/auth/register
///
/// Creates an account and returns its first token.
///
/// # Query Parameters
///
/// `first_name`, `last_name` (optional, at most 100 chars), `email`
/// (3 to 200 chars), `password` (8 to 100 chars)
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "User registered successfully",
///     "data": { "access_token": "...", "token_type": "bearer", "expires_in": 86400 }
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid parameters
/// - 403 Forbidden: Registration disabled
/// - 409 Conflict: Email already registered
pub async fn register<U, H>(
    state: web::Data<AppState<U, H>>,
    query: web::Query<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    let request = query.into_inner();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state
        .auth_service
        .register(
            request.first_name,
            request.last_name,
            &request.email,
            &request.password,
        )
        .await
    {
        Ok(token) => HttpResponse::Ok().json(MessageResponse::with_data(
            "User registered successfully",
            TokenData::from(token),
        )),
        Err(error) => handle_domain_error(&error),
    }
}
