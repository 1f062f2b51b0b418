//! Main token service implementation

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{Claims, IssuedToken};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, RejectionReason, RevokeError, TokenError};
use crate::repositories::UserRepository;

use super::config::TokenServiceConfig;

/// Anything that can turn a bearer token into an authenticated user
///
/// Object-safe so the transport layer can hold it as `dyn Authenticator`
/// without knowing the repository type.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Authenticates a token, returning the user it was issued to
    async fn authenticate(&self, token: &str) -> Result<User, AuthError>;
}

/// Token authority: issues, verifies and revokes JWTs
///
/// Each token carries the holder's token version at issuance. A token is
/// only accepted while that version still equals the one stored in the
/// user directory, so bumping the stored version voids every outstanding
/// token for that user.
pub struct TokenService<U: UserRepository> {
    users: Arc<U>,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<U: UserRepository> TokenService<U> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `users` - User directory used for authentication and revocation
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService` instance or a validation error if the
    /// configuration names a non-HMAC algorithm or an empty secret
    pub fn new(users: Arc<U>, config: TokenServiceConfig) -> Result<Self, DomainError> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.algorithms = vec![config.algorithm];
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_aud = false;

        Ok(Self {
            users,
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Issues a token for `identity` at `epoch` with the default lifetime
    pub fn issue(&self, identity: &str, epoch: u64) -> Result<IssuedToken, TokenError> {
        self.issue_with_ttl(identity, epoch, self.config.token_ttl)
    }

    /// Issues a token with an explicit lifetime
    ///
    /// A negative `ttl` produces a token that is already expired.
    pub fn issue_with_ttl(
        &self,
        identity: &str,
        epoch: u64,
        ttl: Duration,
    ) -> Result<IssuedToken, TokenError> {
        if identity.is_empty() {
            return Err(TokenError::EmptyIdentity);
        }

        let expiry = Utc::now().checked_add_signed(ttl).ok_or_else(|| {
            tracing::error!(ttl_seconds = ttl.num_seconds(), "Token expiry out of range");
            TokenError::GenerationFailed
        })?;
        let claims = Claims::new(identity, epoch, expiry);
        let access_token = encode(&Header::new(self.config.algorithm), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to sign token");
                TokenError::GenerationFailed
            })?;

        Ok(IssuedToken::new(access_token, ttl.num_seconds()))
    }

    /// Decodes a token and verifies its signature, algorithm and expiry
    ///
    /// Performs no directory lookup, so a revoked but otherwise valid token
    /// still decodes successfully here.
    pub fn decode_and_verify(&self, token: &str) -> Result<Claims, TokenError> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 || segments.iter().any(|segment| segment.is_empty()) {
            return Err(TokenError::MalformedToken);
        }

        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::ValidationFailed,
            })?;

        Ok(token_data.claims)
    }

    /// Authenticates a token against the user directory
    ///
    /// Every failure collapses to `AuthError::Invalid`; the concrete reason
    /// is only logged.
    pub async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let result = self.check_token(token).await;
        if let Err(ref err) = result {
            tracing::debug!(reason = %err.reason(), "Token rejected");
        }
        result
    }

    async fn check_token(&self, token: &str) -> Result<User, AuthError> {
        let claims = self.decode_and_verify(token)?;

        if claims.identity.is_empty() {
            return Err(AuthError::invalid(RejectionReason::MissingIdentity));
        }

        let user = self
            .users
            .find_by_email(&claims.identity)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "User lookup failed during authentication");
                AuthError::invalid(RejectionReason::DirectoryUnavailable)
            })?
            .ok_or_else(|| AuthError::invalid(RejectionReason::UnknownIdentity))?;

        if !user.accepts_token_version(claims.epoch) {
            return Err(AuthError::invalid(RejectionReason::VersionMismatch {
                token: claims.epoch,
                current: user.token_version,
            }));
        }

        Ok(user)
    }

    /// Revokes every outstanding token for `identity`
    ///
    /// Atomically raises the user's token version and returns the new
    /// value. Tokens issued before the call stop authenticating once it
    /// returns; tokens issued afterwards carry the new version.
    pub async fn revoke(&self, identity: &str) -> Result<u64, RevokeError> {
        let exists = self.users.exists_by_email(identity).await.map_err(|e| {
            tracing::error!(error = %e, "User lookup failed during revocation");
            RevokeError::PersistenceFailed(e.to_string())
        })?;
        if !exists {
            return Err(RevokeError::UserNotFound);
        }

        let version = self
            .users
            .increment_token_version(identity)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to persist token version");
                RevokeError::PersistenceFailed(e.to_string())
            })?
            .ok_or(RevokeError::UserNotFound)?;

        tracing::info!(token_version = version, "Tokens revoked");
        Ok(version)
    }
}

#[async_trait]
impl<U: UserRepository> Authenticator for TokenService<U> {
    async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        TokenService::authenticate(self, token).await
    }
}
