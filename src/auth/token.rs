//! Access token inspection.
//!
//! The authentication service issues opaque signed tokens (JWT-shaped)
//! whose payload carries the expiry as seconds since the epoch. The
//! client never verifies the signature - it only needs the expiry to
//! decide when a stored token is no longer worth presenting.

use anyhow::{Context, Result};
use base64ct::{Base64UrlUnpadded, Encoding};
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

/// The only claim the client reads from the token payload
#[derive(Debug, Deserialize)]
struct Claims {
    exp: i64,
}

/// Decode the expiry instant embedded in a token.
///
/// Fails on anything that is not a decodable token: wrong segment count,
/// non-base64url payload, malformed JSON, or a missing/unrepresentable
/// `exp` claim.
pub fn decode_expiry(token: &str) -> Result<DateTime<Utc>> {
    let mut segments = token.split('.');
    let payload = segments
        .nth(1)
        .filter(|s| !s.is_empty())
        .context("Token has no payload segment")?;

    let bytes = Base64UrlUnpadded::decode_vec(payload)
        .map_err(|e| anyhow::anyhow!("Token payload is not base64url: {}", e))?;

    let claims: Claims =
        serde_json::from_slice(&bytes).context("Token payload is not valid claims JSON")?;

    Utc.timestamp_opt(claims.exp, 0)
        .single()
        .context("Token expiry is out of range")
}

/// Check whether a token decodes and has not yet expired.
///
/// Any decode failure reads as "invalid" - callers treat malformed,
/// tampered, and expired tokens the same way and never see the error.
pub fn is_valid(token: &str) -> bool {
    match decode_expiry(token) {
        Ok(expires_at) => expires_at > Utc::now(),
        Err(_) => false,
    }
}
