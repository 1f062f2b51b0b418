//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - JWT issuance bound to an identity and a token version
//! - Signature, expiry and algorithm verification
//! - Version-based revocation of every outstanding token for a user
//! - Bearer credential extraction from `Authorization` header values

mod bearer;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use bearer::extract_bearer;
pub use config::{TokenServiceConfig, MAX_TOKEN_TTL_DAYS};
pub use service::{Authenticator, TokenService};
