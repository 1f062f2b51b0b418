//! Shared fixtures for the HTTP tests

use std::sync::Arc;

use ev_core::repositories::InMemoryUserRepository;
use ev_core::services::auth::{AuthService, AuthServiceConfig};
use ev_core::services::token::{TokenService, TokenServiceConfig};
use ev_infra::security::BcryptPasswordHasher;

pub type TestAuthService = AuthService<InMemoryUserRepository, BcryptPasswordHasher>;

pub const SECRET: &str = "http-test-secret";

pub fn create_auth_service(
    config: AuthServiceConfig,
) -> (Arc<TestAuthService>, Arc<InMemoryUserRepository>) {
    let users = Arc::new(InMemoryUserRepository::new());
    let tokens = Arc::new(
        TokenService::new(users.clone(), TokenServiceConfig::new(SECRET)).unwrap(),
    );
    let service = AuthService::new(
        users.clone(),
        tokens,
        Arc::new(BcryptPasswordHasher::new(4)),
        config,
    );
    (Arc::new(service), users)
}

pub fn register_uri(email: &str, password: &str) -> String {
    format!(
        "/api/v1/auth/register?first_name=Ada&last_name=Lovelace&email={}&password={}",
        email, password
    )
}

pub fn login_uri(email: &str, password: &str) -> String {
    format!("/api/v1/auth/login?email={}&password={}", email, password)
}
