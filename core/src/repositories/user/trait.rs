//! User repository trait defining the interface for user data persistence.
//!
//! This is the user directory consumed by the token authority: a point
//! lookup by email, and an atomic bump of a user's token version. The trait
//! is async-first and uses Result types for proper error handling.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Implementations must make `increment_token_version` atomic per user:
/// N concurrent calls for the same email must raise the stored version by
/// exactly N.
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use ev_core::repositories::UserRepository;
/// use ev_core::domain::entities::user::User;
/// use ev_core::errors::DomainError;
///
/// struct MySqlUserRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for MySqlUserRepository {
///     async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
///
///     // ... other methods
/// #   async fn exists_by_email(&self, _: &str) -> Result<bool, DomainError> { Ok(false) }
/// #   async fn create(&self, user: User) -> Result<User, DomainError> { Ok(user) }
/// #   async fn increment_token_version(&self, _: &str) -> Result<Option<u64>, DomainError> { Ok(None) }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email
    ///
    /// # Arguments
    /// * `email` - The user's unique email address
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given email
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Check if a user exists with the given email
    ///
    /// # Returns
    /// * `Ok(true)` - User exists
    /// * `Ok(false)` - User does not exist
    /// * `Err(DomainError)` - Database error occurred
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Create a new user in the repository
    ///
    /// # Arguments
    /// * `user` - The User entity to persist
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError)` - Creation failed (e.g., duplicate email)
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Atomically raise a user's token version by one
    ///
    /// # Arguments
    /// * `email` - The user's unique email address
    ///
    /// # Returns
    /// * `Ok(Some(version))` - The version after the increment was committed
    /// * `Ok(None)` - No user found with given email
    /// * `Err(DomainError)` - The increment was not committed
    ///
    /// # Example
    /// ```no_run
    /// # use ev_core::repositories::UserRepository;
    /// # async fn example(repo: &impl UserRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// if let Some(version) = repo.increment_token_version("a@example.com").await? {
    ///     println!("Tokens older than version {} are void", version);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn increment_token_version(&self, email: &str) -> Result<Option<u64>, DomainError>;
}
