use bcrypt::{DEFAULT_COST, hash, verify};

/// Bcrypt hash of a throwaway password nobody uses. The login path
/// verifies against it when the account does not exist, so the response
/// takes the same time either way.
pub const DUMMY_HASH: &str = "$2b$12$LQv3c1yqBWVHxkd0LHAkCOYz6TtxMQJqhN8/LewY5jtRfCx0aLXN.";

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, DEFAULT_COST)
}

/// Check a password against a stored bcrypt hash. A malformed hash
/// counts as a failed match.
pub fn verify_password(password: &str, hashed: &str) -> bool {
    verify(password, hashed).unwrap_or(false)
}
