//! Main authentication service implementation

use std::sync::Arc;

use crate::domain::entities::token::IssuedToken;
use crate::domain::entities::user::User;
use crate::errors::{AccountError, AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::password::PasswordHasher;

/// Authentication service for the account lifecycle
pub struct AuthService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Token service for JWT management
    token_service: Arc<TokenService<U>>,
    /// Password hashing strategy
    password_hasher: Arc<H>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, H> AuthService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `token_service` - Service for JWT token management
    /// * `password_hasher` - Strategy for hashing and checking passwords
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<U>>,
        password_hasher: Arc<H>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            password_hasher,
            config,
        }
    }

    /// The token authority backing this service
    pub fn token_service(&self) -> &Arc<TokenService<U>> {
        &self.token_service
    }

    /// Register a new account and issue its first token
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedToken)` - Token at token version 0
    /// * `Err(DomainError)` - Registration disabled, duplicate email, or storage failure
    pub async fn register(
        &self,
        first_name: Option<String>,
        last_name: Option<String>,
        email: &str,
        password: &str,
    ) -> DomainResult<IssuedToken> {
        if !self.config.allow_registration {
            return Err(AccountError::RegistrationDisabled.into());
        }

        if self.user_repository.exists_by_email(email).await? {
            tracing::debug!("Registration rejected for existing email");
            return Err(AccountError::EmailAlreadyRegistered.into());
        }

        let password_hash = self.hash_password(password).await?;
        let user = User::new(email, first_name, last_name, password_hash);

        // A concurrent registration can still win the race to the insert
        let user = self.user_repository.create(user).await.map_err(|e| match e {
            DomainError::Validation { .. } => AccountError::EmailAlreadyRegistered.into(),
            other => other,
        })?;

        tracing::info!("New user registered");
        Ok(self.token_service.issue(&user.email, user.token_version)?)
    }

    /// Check credentials and issue a token at the user's current version
    ///
    /// Unknown emails and wrong passwords fail identically.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<IssuedToken> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !self.verify_password(password, &user.password_hash).await? {
            tracing::debug!("Login rejected: password mismatch");
            return Err(AccountError::InvalidCredentials.into());
        }

        Ok(self.token_service.issue(&user.email, user.token_version)?)
    }

    /// Revoke every token issued to `email` and return the new token version
    pub async fn logout(&self, email: &str) -> DomainResult<u64> {
        Ok(self.token_service.revoke(email).await?)
    }

    /// Authenticate a bearer token
    pub async fn validate(&self, token: &str) -> Result<User, AuthError> {
        self.token_service.authenticate(token).await
    }

    async fn hash_password(&self, password: &str) -> DomainResult<String> {
        let hasher = Arc::clone(&self.password_hasher);
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing task failed: {}", e),
            })?
    }

    async fn verify_password(&self, password: &str, hash: &str) -> DomainResult<bool> {
        let hasher = Arc::clone(&self.password_hasher);
        let password = password.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password check task failed: {}", e),
            })
    }
}
