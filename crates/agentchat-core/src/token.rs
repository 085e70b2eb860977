//! Bearer token validation.
//!
//! The backend issues JWTs; the only claim the client cares about is `exp`.
//! Decoding is deliberately lenient — any malformed input is simply an
//! invalid token, never an error.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

#[derive(Deserialize)]
struct Claims {
    exp: i64,
}

/// Whether the token's expiry claim lies in the future.
pub fn is_valid(token: &str) -> bool {
    is_valid_at(token, chrono::Utc::now().timestamp())
}

/// Clock-injected variant of [`is_valid`].
pub fn is_valid_at(token: &str, now_secs: i64) -> bool {
    decode_expiry(token).map(|exp| exp > now_secs).unwrap_or(false)
}

fn decode_expiry(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    // Tolerate padded base64url; real JWTs are unpadded.
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    Some(claims.exp)
}
