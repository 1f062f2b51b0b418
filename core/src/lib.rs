//! # Eventide Core
//!
//! Core business logic and domain layer for the Eventide backend.
//! This crate contains the domain entities, the token authority that issues
//! and checks bearer tokens, the user directory interface, and the error
//! types shared by every layer above it.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use repositories::*;
pub use errors::*;
