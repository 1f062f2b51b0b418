//! Authentication configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Secret used when `JWT_SECRET_KEY` is absent
pub const DEFAULT_JWT_SECRET: &str = "not very secret";

/// Algorithm used when `JWT_ALGORITHM` is absent
pub const DEFAULT_JWT_ALGORITHM: &str = "HS256";

/// Token lifetime used when `DAYS_LOGGED_IN` is absent
pub const DEFAULT_DAYS_LOGGED_IN: f64 = 1.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric secret key for signing tokens
    pub secret: String,

    /// Algorithm name for JWT signing (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Token lifetime in seconds
    pub token_expiry: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            algorithm: default_algorithm(),
            token_expiry: days_to_seconds(DEFAULT_DAYS_LOGGED_IN),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET_KEY")
            .unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string());
        let algorithm = std::env::var("JWT_ALGORITHM")
            .unwrap_or_else(|_| default_algorithm());
        let days = env_or("DAYS_LOGGED_IN", DEFAULT_DAYS_LOGGED_IN);

        Self {
            secret,
            algorithm,
            token_expiry: days_to_seconds(days),
        }
    }

    /// Set token lifetime in (possibly fractional) days
    pub fn with_expiry_days(mut self, days: f64) -> Self {
        self.token_expiry = days_to_seconds(days);
        self
    }

    /// Set token lifetime in seconds
    pub fn with_expiry_seconds(mut self, seconds: i64) -> Self {
        self.token_expiry = seconds;
        self
    }

    /// Set the signing algorithm name
    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Whether new accounts may be registered
    #[serde(default = "default_allow_registration")]
    pub allow_registration: bool,

    /// bcrypt work factor for password hashes
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            allow_registration: env_or("ALLOW_REGISTRATION", default_allow_registration()),
            bcrypt_cost: env_or("BCRYPT_COST", default_bcrypt_cost()),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            allow_registration: default_allow_registration(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

fn days_to_seconds(days: f64) -> i64 {
    (days * SECONDS_PER_DAY).round() as i64
}

fn default_algorithm() -> String {
    String::from(DEFAULT_JWT_ALGORITHM)
}

fn default_allow_registration() -> bool {
    true
}

fn default_bcrypt_cost() -> u32 {
    12
}
