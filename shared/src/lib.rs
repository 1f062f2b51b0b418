//! Shared configuration and common types for the Eventide server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the process environment
//! - The JSON error envelope returned by every endpoint

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment,
    DatabaseConfig, JwtConfig, ServerConfig, AuthConfig,
};
pub use errors::{ErrorResponse, error_codes};
