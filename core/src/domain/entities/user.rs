//! User entity representing a registered account in the Eventide system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity representing a registered account
///
/// The email is the stable identity embedded in every issued token.
/// `token_version` is the revocation epoch: it starts at 0, only ever
/// increases, and a token is honoured only while the version it carries
/// equals this value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique email address (primary key)
    pub email: String,

    /// Given name, if provided at registration
    pub first_name: Option<String>,

    /// Family name, if provided at registration
    pub last_name: Option<String>,

    /// Password hash produced by the configured hasher
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Revocation epoch
    pub token_version: u64,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User at token version 0
    pub fn new(
        email: impl Into<String>,
        first_name: Option<String>,
        last_name: Option<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            email: email.into(),
            first_name,
            last_name,
            password_hash: password_hash.into(),
            token_version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether a token carrying `version` is still current for this user
    pub fn accepts_token_version(&self, version: u64) -> bool {
        self.token_version == version
    }
}
