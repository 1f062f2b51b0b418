//! Authentication service module
//!
//! This module provides the account flows built on the token authority:
//! - User registration with hashed passwords
//! - Login with credential checks
//! - Logout by revoking every outstanding token
//! - Token validation against the user directory

mod config;
mod password;
mod service;


pub use config::AuthServiceConfig;
pub use password::PasswordHasher;
pub use service::AuthService;
