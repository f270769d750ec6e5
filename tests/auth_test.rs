//! Integration test for token issue/validation and password hashing.
//!
//! Tokens are minted locally with the same HS256 secret the server
//! would use; no running server or database is needed.
//!
//! Run with: `cargo test --test auth_test`
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

use studio_backend::auth::jwt::{Claims, create_access_token, validate_token};
use studio_backend::auth::password::{DUMMY_HASH, hash_password, verify_password};

/// A fake secret for testing — never use the real one in tests committed to git.
const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

#[test]
fn test_issued_token_round_trips() {
    let token = create_access_token("alice@example.com", TEST_SECRET, 30)
        .expect("Failed to mint token");

    let claims = validate_token(&token, TEST_SECRET).expect("Token should be valid");

    assert_eq!(claims.sub, "alice@example.com");
    // Expiry lands 30 minutes out, give or take scheduling slop.
    let lifetime = claims.exp - Utc::now().timestamp();
    assert!((29 * 60..=30 * 60).contains(&lifetime), "lifetime was {lifetime}s");
}

#[test]
fn test_expired_token_is_rejected() {
    let claims = Claims {
        sub: "expired@example.com".to_string(),
        exp: Utc::now().timestamp() - 300, // 5 minutes ago, past the 60s default leeway
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let result = validate_token(&token, TEST_SECRET);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("ExpiredSignature"));
}

#[test]
fn test_wrong_secret_is_rejected() {
    let token = create_access_token("bob@example.com", TEST_SECRET, 30).unwrap();

    let result = validate_token(&token, "completely-wrong-secret-xxxxxxxxxxxxxxxxxxx");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("InvalidSignature"));
}

#[test]
fn test_garbage_token_is_rejected() {
    let result = validate_token("not.a.valid.jwt", TEST_SECRET);
    assert!(result.is_err());
}

#[test]
fn test_password_hash_round_trips() {
    let hashed = hash_password("hunter2-but-longer").expect("Failed to hash");

    assert!(verify_password("hunter2-but-longer", &hashed));
    assert!(!verify_password("wrong-password", &hashed));
}

#[test]
fn test_dummy_hash_never_verifies() {
    // The login path burns a verification against this hash for unknown
    // emails; it must behave like a normal failed match.
    assert!(!verify_password("anything at all", DUMMY_HASH));
    assert!(!verify_password("", DUMMY_HASH));
}

#[test]
fn test_malformed_stored_hash_fails_closed() {
    assert!(!verify_password("password", "not-a-bcrypt-hash"));
}
