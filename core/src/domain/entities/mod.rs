//! Domain entities representing core business objects.

pub mod token;
pub mod user;

// Re-export commonly used types
pub use token::{Claims, IssuedToken, TOKEN_TYPE};
pub use user::User;
