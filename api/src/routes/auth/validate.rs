use actix_web::{web, HttpResponse};

use crate::dto::auth::{MessageResponse, UserData};

use ev_core::domain::entities::user::User;

/// Handler for POST /api/v1/auth/validate
///
/// The `JwtAuth` middleware has already authenticated the token by the
/// time this runs; the handler only reports who it belongs to.
pub async fn validate(user: web::ReqData<User>) -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse::with_data(
        "Valid token",
        UserData::from(user.into_inner()),
    ))
}
