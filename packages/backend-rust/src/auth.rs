//! Password hashing and opaque session tokens for flat-file accounts.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rand::Rng;

use crate::response::AppError;

pub fn hash_password(raw: &str) -> Result<String, AppError> {
    bcrypt::hash(raw, bcrypt::DEFAULT_COST)
        .map_err(|err| AppError::internal(format!("password hashing failed: {err}")))
}

pub fn verify_password(raw: &str, hash: &str) -> bool {
    bcrypt::verify(raw, hash).unwrap_or(false)
}

/// Opaque bearer token: base64 of user id, issue time, and a random nonce.
/// Nothing server-side validates these beyond shape; the flat-file API is
/// deliberately unauthenticated past login.
pub fn generate_token(user_id: &str) -> String {
    let mut nonce = [0u8; 6];
    rand::rng().fill(&mut nonce);
    let nonce_hex: String = nonce.iter().map(|byte| format!("{byte:02x}")).collect();
    let millis = chrono::Utc::now().timestamp_millis();
    BASE64.encode(format!("{user_id}:{millis}:{nonce_hex}"))
}
