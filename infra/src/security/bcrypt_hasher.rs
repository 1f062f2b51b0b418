//! bcrypt implementation of PasswordHasher

use ev_core::errors::{AccountError, DomainError};
use ev_core::services::auth::PasswordHasher;

/// Password hasher backed by bcrypt
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with the given bcrypt cost factor
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        bcrypt::hash(password, self.cost).map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            AccountError::PasswordHashing(e.to_string()).into()
        })
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        match bcrypt::verify(password, hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash could not be parsed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> BcryptPasswordHasher {
        // Lowest cost bcrypt accepts
        BcryptPasswordHasher::new(4)
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let hash = hasher.hash("correct horse").unwrap();

        assert_ne!(hash, "correct horse");
        assert!(hasher.verify("correct horse", &hash));
        assert!(!hasher.verify("wrong horse", &hash));
    }

    #[test]
    fn test_malformed_hash_does_not_verify() {
        assert!(!hasher().verify("correct horse", "not-a-bcrypt-hash"));
    }

    #[test]
    fn test_invalid_cost_is_an_error() {
        let result = BcryptPasswordHasher::new(2).hash("correct horse");
        assert!(matches!(
            result,
            Err(DomainError::Account(AccountError::PasswordHashing(_)))
        ));
    }

    #[test]
    fn test_default_cost() {
        assert_eq!(BcryptPasswordHasher::default().cost(), 12);
    }
}
