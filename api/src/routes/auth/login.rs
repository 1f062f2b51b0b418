use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{LoginRequest, MessageResponse, TokenData};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use ev_core::repositories::UserRepository;
use ev_core::services::auth::PasswordHasher;

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Checks credentials and returns a token bound to the user's current
/// token version.
///
/// ## Errors
/// - 400 Bad Request: Invalid parameters
/// - 401 Unauthorized: Unknown email or wrong password
pub async fn login<U, H>(
    state: web::Data<AppState<U, H>>,
    query: web::Query<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    let request = query.into_inner();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state.auth_service.login(&request.email, &request.password).await {
        Ok(token) => HttpResponse::Ok().json(MessageResponse::with_data(
            "Login successful",
            TokenData::from(token),
        )),
        Err(error) => handle_domain_error(&error),
    }
}
