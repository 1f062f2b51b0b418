use actix_web::{web, HttpResponse};

use crate::dto::auth::{LogoutData, MessageResponse};
use crate::handlers::error::handle_domain_error;
use ev_core::domain::entities::user::User;
use ev_core::repositories::UserRepository;
use ev_core::services::auth::PasswordHasher;

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Logs out a user by raising their token version, which voids every
/// token issued to them so far, including the one on this request.
/// Requires authentication via Bearer token in Authorization header.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {access_token}
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logout successful",
///     "data": { "token_version": 1 }
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid access token
/// - 404 Not Found: The user disappeared between authentication and logout
/// - 500 Internal Server Error: Token version could not be persisted
pub async fn logout<U, H>(
    state: web::Data<AppState<U, H>>,
    user: web::ReqData<User>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    match state.auth_service.logout(&user.email).await {
        Ok(token_version) => HttpResponse::Ok().json(MessageResponse::with_data(
            "Logout successful",
            LogoutData { token_version },
        )),
        Err(error) => handle_domain_error(&error),
    }
}
