use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Bearer-token claims. The `sub` field carries the account email.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    /// Token expiration (Unix timestamp).
    pub exp: i64,
}

/// Issue a signed access token for `email`, valid for `expire_minutes`.
pub fn create_access_token(
    email: &str,
    secret: &str,
    expire_minutes: i64,
) -> Result<String, String> {
    let expiration = Utc::now() + Duration::minutes(expire_minutes);
    let claims = Claims {
        sub: email.to_string(),
        exp: expiration.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| e.to_string())
}

/// Validate a token's signature and expiry and return the decoded claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, String> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}
