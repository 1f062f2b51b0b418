//! Token entities for JWT-based authentication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Token type reported to clients alongside an issued token
pub const TOKEN_TYPE: &str = "bearer";

/// Claims structure for JWT payload
///
/// The payload is exactly `{"email", "token_version", "exp"}`. Unknown keys
/// are rejected during decoding so attacker-supplied extras never reach
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    /// Identity of the token holder
    #[serde(rename = "email")]
    pub identity: String,

    /// Snapshot of the holder's token version at issuance
    #[serde(rename = "token_version")]
    pub epoch: u64,

    /// Expiration timestamp (seconds since the Unix epoch)
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl Claims {
    /// Creates claims expiring at `expiry`
    ///
    /// # Arguments
    ///
    /// * `identity` - The user's email
    /// * `epoch` - The user's current token version
    /// * `expiry` - Instant after which the token is rejected
    pub fn new(identity: impl Into<String>, epoch: u64, expiry: DateTime<Utc>) -> Self {
        Self {
            identity: identity.into(),
            epoch,
            expires_at: expiry.timestamp(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.expires_at
    }
}

/// Token returned to the client after register or login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Signed JWT
    pub access_token: String,

    /// Always `"bearer"`
    pub token_type: String,

    /// Lifetime in seconds at issuance
    pub expires_in: i64,
}

impl IssuedToken {
    /// Wraps a signed token
    pub fn new(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_claims_wire_names() {
        let claims = Claims::new("a@example.com", 2, Utc::now() + Duration::hours(1));
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["email"], "a@example.com");
        assert_eq!(json["token_version"], 2);
        assert!(json["exp"].is_i64());
        assert_eq!(json.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_claims_reject_unknown_fields() {
        let payload = r#"{"email":"a@example.com","token_version":0,"exp":4102444800,"admin":true}"#;
        assert!(serde_json::from_str::<Claims>(payload).is_err());
    }

    #[test]
    fn test_claims_require_every_field() {
        let payload = r#"{"email":"a@example.com","exp":4102444800}"#;
        assert!(serde_json::from_str::<Claims>(payload).is_err());
    }

    #[test]
    fn test_claims_expiration() {
        let live = Claims::new("a@example.com", 0, Utc::now() + Duration::days(1));
        let dead = Claims::new("a@example.com", 0, Utc::now() - Duration::seconds(5));

        assert!(!live.is_expired());
        assert!(dead.is_expired());
    }

    #[test]
    fn test_issued_token_is_bearer() {
        let token = IssuedToken::new("a.b.c".to_string(), 86_400);
        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.expires_in, 86_400);
    }
}
