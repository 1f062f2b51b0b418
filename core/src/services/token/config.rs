//! Configuration for the token service

use chrono::Duration;
use ev_shared::config::auth::DEFAULT_JWT_SECRET;
use ev_shared::config::JwtConfig;
use jsonwebtoken::Algorithm;

use crate::errors::DomainError;

/// Longest token lifetime the service accepts
pub const MAX_TOKEN_TTL_DAYS: i64 = 3650;

/// Configuration for the token service
///
/// Built once at startup and passed into `TokenService::new`; the secret is
/// never read from ambient state afterwards.
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    /// Default token lifetime
    pub token_ttl: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            algorithm: Algorithm::HS256,
            token_ttl: Duration::days(1),
        }
    }
}

impl TokenServiceConfig {
    /// Creates a config with the given secret and default algorithm and lifetime
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Default::default()
        }
    }

    /// Rejects configurations the service cannot honour
    pub fn validate(&self) -> Result<(), DomainError> {
        if !matches!(
            self.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(DomainError::Validation {
                message: format!(
                    "JWT algorithm {:?} is not a symmetric HMAC algorithm",
                    self.algorithm
                ),
            });
        }
        if self.jwt_secret.is_empty() {
            return Err(DomainError::Validation {
                message: "JWT secret must not be empty".to_string(),
            });
        }
        if self.token_ttl <= Duration::zero()
            || self.token_ttl > Duration::days(MAX_TOKEN_TTL_DAYS)
        {
            return Err(ttl_out_of_range(self.token_ttl.num_seconds()));
        }
        Ok(())
    }
}

impl TryFrom<&JwtConfig> for TokenServiceConfig {
    type Error = DomainError;

    fn try_from(config: &JwtConfig) -> Result<Self, Self::Error> {
        let algorithm: Algorithm = config.algorithm.parse().map_err(|_| DomainError::Validation {
            message: format!("Unknown JWT algorithm: {}", config.algorithm),
        })?;

        // Bounds are checked before building the Duration, which panics out of range
        if config.token_expiry <= 0 || config.token_expiry > MAX_TOKEN_TTL_DAYS * 86_400 {
            return Err(ttl_out_of_range(config.token_expiry));
        }

        let service_config = Self {
            jwt_secret: config.secret.clone(),
            algorithm,
            token_ttl: Duration::seconds(config.token_expiry),
        };
        service_config.validate()?;
        Ok(service_config)
    }
}

fn ttl_out_of_range(seconds: i64) -> DomainError {
    DomainError::Validation {
        message: format!(
            "Token lifetime must be between 1 second and {} days, got {} seconds",
            MAX_TOKEN_TTL_DAYS, seconds
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_shared_jwt_config() {
        let shared = JwtConfig::new("secret").with_expiry_seconds(3600);
        let config = TokenServiceConfig::try_from(&shared).unwrap();

        assert_eq!(config.algorithm, Algorithm::HS256);
        assert_eq!(config.token_ttl, Duration::hours(1));
        assert_eq!(config.jwt_secret, "secret");
    }

    #[test]
    fn test_rejects_asymmetric_algorithm() {
        let shared = JwtConfig::new("secret").with_algorithm("RS256");
        assert!(TokenServiceConfig::try_from(&shared).is_err());
    }

    #[test]
    fn test_rejects_unknown_algorithm() {
        let shared = JwtConfig::new("secret").with_algorithm("none");
        assert!(TokenServiceConfig::try_from(&shared).is_err());
    }

    #[test]
    fn test_accepts_hs512() {
        let shared = JwtConfig::new("secret").with_algorithm("HS512");
        let config = TokenServiceConfig::try_from(&shared).unwrap();
        assert_eq!(config.algorithm, Algorithm::HS512);
    }

    #[test]
    fn test_rejects_non_positive_lifetime() {
        for days in [0.0, -1.0] {
            let shared = JwtConfig::new("secret").with_expiry_days(days);
            assert!(TokenServiceConfig::try_from(&shared).is_err(), "days {}", days);
        }

        let config = TokenServiceConfig {
            token_ttl: Duration::seconds(-86_400),
            ..TokenServiceConfig::new("secret")
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_lifetime() {
        // Large enough to saturate the seconds conversion
        for days in [1e9, 1e20] {
            let shared = JwtConfig::new("secret").with_expiry_days(days);
            assert!(TokenServiceConfig::try_from(&shared).is_err(), "days {}", days);
        }

        let config = TokenServiceConfig {
            token_ttl: Duration::days(MAX_TOKEN_TTL_DAYS + 1),
            ..TokenServiceConfig::new("secret")
        };
        assert!(config.validate().is_err());

        let longest = JwtConfig::new("secret").with_expiry_days(MAX_TOKEN_TTL_DAYS as f64);
        assert!(TokenServiceConfig::try_from(&longest).is_ok());
    }
}
