//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token signing and account configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection
//! - `server` - HTTP server configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
///
/// Built once at process start and handed to the components that need it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
        }
    }

    /// Configuration problems worth surfacing at startup
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.auth.jwt.is_using_default_secret() {
            let message = if self.environment.is_production() {
                "JWT_SECRET_KEY is not set; production is signing tokens with the default secret"
            } else {
                "JWT_SECRET_KEY is not set; using the development default secret"
            };
            warnings.push(message.to_string());
        }
        warnings
    }
}

/// Reads an environment variable and parses it, falling back on absence or parse failure
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_warns_about_secret() {
        let config = AppConfig::default();
        let warnings = config.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("JWT_SECRET_KEY"));
    }

    #[test]
    fn test_custom_secret_has_no_warnings() {
        let mut config = AppConfig::default();
        config.auth.jwt = JwtConfig::new("a-much-better-secret");
        assert!(config.warnings().is_empty());
    }

    #[test]
    fn test_env_or_falls_back_on_missing_key() {
        let value: u16 = env_or("EVENTIDE_TEST_SURELY_UNSET_KEY", 4242);
        assert_eq!(value, 4242);
    }
}
