//! Authentication route handlers
//!
//! This module contains all authentication-related endpoints:
//! - Registration and login (query parameters)
//! - Logout, which revokes every outstanding token for the caller
//! - Token validation

pub mod login;
pub mod logout;
pub mod register;
pub mod validate;

use std::sync::Arc;

use ev_core::repositories::UserRepository;
use ev_core::services::auth::{AuthService, PasswordHasher};

/// Application state that holds shared services
pub struct AppState<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    pub auth_service: Arc<AuthService<U, H>>,
}

impl<U, H> AppState<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    pub fn new(auth_service: Arc<AuthService<U, H>>) -> Self {
        Self { auth_service }
    }
}
