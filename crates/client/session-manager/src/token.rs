//! Bearer token reader.
//!
//! Reads the `exp` claim out of a compact `header.payload.signature` token.
//! This is an expiry reader, not a verifier: the signature is never checked
//! and the header is never decoded.

use base64::{
    alphabet,
    engine::{general_purpose::GeneralPurpose, DecodePaddingMode, GeneralPurposeConfig},
    Engine,
};
use domain::TOKEN_SEGMENT_COUNT;

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::Indifferent)
    .with_decode_allow_trailing_bits(true);

/// JWT-style tokens: URL-safe alphabet, usually unpadded.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Tokens assembled with a standard encoder (`btoa` and friends).
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

/// Claims read from the token payload. Other claims are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenClaims {
    /// Expiry as Unix seconds. JSON numbers may be fractional.
    pub exp: f64,
}

impl TokenClaims {
    /// Check if the token is still valid at `now` (Unix seconds).
    pub fn is_unexpired_at(&self, now: i64) -> bool {
        self.exp > now as f64
    }
}

/// Decode the payload claims of a token.
///
/// Returns `None` for anything that is not exactly three dot-separated
/// segments whose middle segment is base64 of a JSON object with a numeric
/// `exp`.
pub fn read_claims(token: &str) -> Option<TokenClaims> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != TOKEN_SEGMENT_COUNT {
        return None;
    }

    let payload = decode_segment(segments[1])?;
    let value: serde_json::Value = serde_json::from_slice(&payload).ok()?;
    let exp = value.as_object()?.get("exp")?.as_f64()?;

    Some(TokenClaims { exp })
}

/// Check if a token carries an `exp` strictly after `now` (Unix seconds).
///
/// Malformed tokens are never valid.
pub fn is_unexpired_at(token: &str, now: i64) -> bool {
    read_claims(token).is_some_and(|claims| claims.is_unexpired_at(now))
}

fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    if segment.is_empty() {
        return None;
    }

    URL_SAFE_LENIENT
        .decode(segment)
        .or_else(|_| STANDARD_LENIENT.decode(segment))
        .ok()
}
