//! Unit tests for token issuance and verification

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;

use crate::domain::entities::token::TOKEN_TYPE;
use crate::domain::entities::user::User;
use crate::errors::{RejectionReason, TokenError};
use crate::repositories::user::{InMemoryUserRepository, UserRepository};
use crate::services::token::{Authenticator, TokenService, TokenServiceConfig};

const SECRET: &str = "test-secret";

fn create_service() -> (TokenService<InMemoryUserRepository>, Arc<InMemoryUserRepository>) {
    let users = Arc::new(InMemoryUserRepository::new());
    let service = TokenService::new(users.clone(), TokenServiceConfig::new(SECRET)).unwrap();
    (service, users)
}

async fn seed_user(users: &InMemoryUserRepository, email: &str) {
    users
        .create(User::new(email, None, None, "hash"))
        .await
        .unwrap();
}

fn sign(payload: serde_json::Value, algorithm: Algorithm, secret: &str) -> String {
    encode(
        &Header::new(algorithm),
        &payload,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn future_exp() -> i64 {
    (chrono::Utc::now() + Duration::hours(1)).timestamp()
}

#[test]
fn test_issue_then_decode_preserves_claims() {
    let (service, _) = create_service();

    let issued = service.issue("a@example.com", 3).unwrap();
    assert_eq!(issued.token_type, TOKEN_TYPE);
    assert_eq!(issued.expires_in, Duration::days(1).num_seconds());
    assert_eq!(issued.access_token.split('.').count(), 3);

    let claims = service.decode_and_verify(&issued.access_token).unwrap();
    assert_eq!(claims.identity, "a@example.com");
    assert_eq!(claims.epoch, 3);
    assert!(!claims.is_expired());
}

#[test]
fn test_payload_uses_wire_claim_names() {
    let (service, _) = create_service();
    let issued = service.issue("a@example.com", 0).unwrap();

    let exp = future_exp();
    let foreign = sign(
        json!({ "email": "a@example.com", "token_version": 0, "exp": exp }),
        Algorithm::HS256,
        SECRET,
    );
    let claims = service.decode_and_verify(&foreign).unwrap();
    assert_eq!(claims.identity, "a@example.com");
    assert_eq!(claims.expires_at, exp);

    // Same header as any standard HS256 JWT
    let header = issued.access_token.split('.').next().unwrap().to_string();
    assert_eq!(header, foreign.split('.').next().unwrap());
}

#[test]
fn test_issue_rejects_empty_identity() {
    let (service, _) = create_service();
    assert_eq!(service.issue("", 0).unwrap_err(), TokenError::EmptyIdentity);
}

#[test]
fn test_negative_ttl_yields_expired_token() {
    let (service, _) = create_service();

    let issued = service
        .issue_with_ttl("a@example.com", 0, Duration::seconds(-1))
        .unwrap();

    assert_eq!(
        service.decode_and_verify(&issued.access_token).unwrap_err(),
        TokenError::Expired
    );
}

#[test]
fn test_out_of_range_ttl_fails_without_panicking() {
    let (service, _) = create_service();

    for days in [1_000_000_000, -1_000_000_000] {
        assert_eq!(
            service
                .issue_with_ttl("a@example.com", 0, Duration::days(days))
                .unwrap_err(),
            TokenError::GenerationFailed
        );
    }
}

#[test]
fn test_malformed_tokens() {
    let (service, _) = create_service();

    for token in ["", "abc", "a.b", "a.b.c.d", "..", "a..c", ".b.c", "a.b."] {
        assert_eq!(
            service.decode_and_verify(token).unwrap_err(),
            TokenError::MalformedToken,
            "token {:?}",
            token
        );
    }
}

#[test]
fn test_garbage_segments_fail_validation() {
    let (service, _) = create_service();
    assert_eq!(
        service.decode_and_verify("a.b.c").unwrap_err(),
        TokenError::ValidationFailed
    );
}

#[test]
fn test_wrong_secret_is_invalid_signature() {
    let (service, _) = create_service();
    let token = sign(
        json!({ "email": "a@example.com", "token_version": 0, "exp": future_exp() }),
        Algorithm::HS256,
        "some-other-secret",
    );

    assert_eq!(
        service.decode_and_verify(&token).unwrap_err(),
        TokenError::InvalidSignature
    );
}

#[test]
fn test_tampered_signature_is_rejected() {
    let (service, _) = create_service();
    let token = service.issue("a@example.com", 0).unwrap().access_token;
    let signature_start = token.rfind('.').unwrap() + 1;

    for index in signature_start..token.len() {
        let mut bytes = token.clone().into_bytes();
        bytes[index] = if bytes[index] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert_eq!(
            service.decode_and_verify(&tampered).unwrap_err(),
            TokenError::InvalidSignature,
            "flipping signature byte {} went unnoticed",
            index
        );
    }
}

#[test]
fn test_other_algorithm_is_rejected() {
    let (service, _) = create_service();
    let token = sign(
        json!({ "email": "a@example.com", "token_version": 0, "exp": future_exp() }),
        Algorithm::HS512,
        SECRET,
    );

    assert_eq!(
        service.decode_and_verify(&token).unwrap_err(),
        TokenError::ValidationFailed
    );
}

#[test]
fn test_unsigned_token_is_rejected() {
    let (service, _) = create_service();
    // {"alg":"none","typ":"JWT"} with an empty signature segment
    let token = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.eyJlbWFpbCI6ImFAZXhhbXBsZS5jb20ifQ.";

    assert_eq!(
        service.decode_and_verify(token).unwrap_err(),
        TokenError::MalformedToken
    );
}

#[test]
fn test_unknown_claim_is_rejected() {
    let (service, _) = create_service();
    let token = sign(
        json!({
            "email": "a@example.com",
            "token_version": 0,
            "exp": future_exp(),
            "role": "admin"
        }),
        Algorithm::HS256,
        SECRET,
    );

    assert_eq!(
        service.decode_and_verify(&token).unwrap_err(),
        TokenError::ValidationFailed
    );
}

#[test]
fn test_missing_claim_is_rejected() {
    let (service, _) = create_service();
    let token = sign(
        json!({ "email": "a@example.com", "exp": future_exp() }),
        Algorithm::HS256,
        SECRET,
    );

    assert_eq!(
        service.decode_and_verify(&token).unwrap_err(),
        TokenError::ValidationFailed
    );
}

#[test]
fn test_service_rejects_asymmetric_algorithm() {
    let users = Arc::new(InMemoryUserRepository::new());
    let config = TokenServiceConfig {
        algorithm: Algorithm::RS256,
        ..TokenServiceConfig::new(SECRET)
    };

    assert!(TokenService::new(users, config).is_err());
}

#[tokio::test]
async fn test_authenticate_returns_user() {
    let (service, users) = create_service();
    seed_user(&users, "a@example.com").await;

    let token = service.issue("a@example.com", 0).unwrap().access_token;
    let user = service.authenticate(&token).await.unwrap();

    assert_eq!(user.email, "a@example.com");
    assert_eq!(user.token_version, 0);
}

#[tokio::test]
async fn test_authenticate_unknown_user() {
    let (service, _) = create_service();
    let token = service.issue("ghost@example.com", 0).unwrap().access_token;

    let err = service.authenticate(&token).await.unwrap_err();
    assert_eq!(err.reason(), &RejectionReason::UnknownIdentity);
    assert_eq!(err.to_string(), "Invalid token");
}

#[tokio::test]
async fn test_authenticate_empty_identity_claim() {
    let (service, _) = create_service();
    let token = sign(
        json!({ "email": "", "token_version": 0, "exp": future_exp() }),
        Algorithm::HS256,
        SECRET,
    );

    let err = service.authenticate(&token).await.unwrap_err();
    assert_eq!(err.reason(), &RejectionReason::MissingIdentity);
}

#[tokio::test]
async fn test_authenticate_expired_token() {
    let (service, users) = create_service();
    seed_user(&users, "a@example.com").await;

    let token = service
        .issue_with_ttl("a@example.com", 0, Duration::seconds(-1))
        .unwrap()
        .access_token;

    let err = service.authenticate(&token).await.unwrap_err();
    assert_eq!(err.reason(), &RejectionReason::Token(TokenError::Expired));
}

#[tokio::test]
async fn test_authenticate_through_trait_object() {
    let (service, users) = create_service();
    seed_user(&users, "a@example.com").await;
    let token = service.issue("a@example.com", 0).unwrap().access_token;

    let authenticator: Arc<dyn Authenticator> = Arc::new(service);
    let user = authenticator.authenticate(&token).await.unwrap();
    assert_eq!(user.email, "a@example.com");
    assert!(authenticator.authenticate("nope").await.is_err());
}
