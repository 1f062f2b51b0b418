//! Application state and factory
//!
//! This module provides the factory for creating the Actix-web application
//! from already-constructed services.

use std::sync::Arc;

use actix_web::{web, App, HttpResponse};

use crate::dto::ErrorResponse;
use crate::handlers::error::query_error_handler;
use crate::middleware::auth::JwtAuth;
use crate::routes::auth::{
    login::login, logout::logout, register::register, validate::validate, AppState,
};

use ev_core::repositories::UserRepository;
use ev_core::services::auth::{AuthService, PasswordHasher};
use ev_core::services::token::Authenticator;
use ev_shared::error_codes;

/// Create and configure the application with all dependencies
///
/// Request logging is added by the caller so tests can build the same app
/// without it.
pub fn create_app<U, H>(
    auth_service: Arc<AuthService<U, H>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    let authenticator: Arc<dyn Authenticator> = auth_service.token_service().clone();
    let app_state = web::Data::new(AppState::new(auth_service));

    App::new()
        .app_data(app_state)
        .app_data(web::Data::from(authenticator))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/register", web::post().to(register::<U, H>))
                    .route("/login", web::post().to(login::<U, H>))
                    .route(
                        "/logout",
                        web::post().to(logout::<U, H>).wrap(JwtAuth::new()),
                    )
                    .route("/validate", web::post().to(validate).wrap(JwtAuth::new())),
            ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "eventide-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
