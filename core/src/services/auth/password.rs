//! Password hashing abstraction

use crate::errors::DomainError;

/// Hashes and checks user passwords
///
/// The core crate only depends on this trait; the bcrypt implementation
/// lives in the infrastructure crate. Both methods may be CPU-heavy and are
/// called from tokio's blocking pool, never on an async worker.
pub trait PasswordHasher: Send + Sync + 'static {
    /// Hash a plaintext password for storage
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Check a plaintext password against a stored hash
    ///
    /// A malformed hash never verifies.
    fn verify(&self, password: &str, hash: &str) -> bool;
}
