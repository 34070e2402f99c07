//! Pure decoding of the JWT claims segment.
//!
//! Only the middle (claims) segment is read. The signature is never checked because the token
//! endpoint is the trusted issuer; reading `exp` says nothing about cryptographic validity.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
// self
use crate::_prelude::*;

/// Failures raised while reading the expiry claim of a bearer token.
#[derive(Debug, ThisError)]
pub enum ClaimsError {
	/// Token has no claims segment after the header.
	#[error("Token is not a JWT: expected at least 2 segments, found {segments}.")]
	NotJwt {
		/// Number of `.`-separated segments found.
		segments: usize,
	},
	/// Claims segment is not valid base64url.
	#[error("Claims segment is not valid base64url.")]
	Base64(#[from] base64::DecodeError),
	/// Claims segment is not a JSON object with a numeric `exp`.
	#[error("Claims segment does not carry a numeric exp claim.")]
	Json(#[from] serde_json::Error),
	/// `exp` lies outside the representable range.
	#[error("The exp claim {exp} is out of range.")]
	ExpiryOutOfRange {
		/// Raw claim value.
		exp: f64,
	},
}

#[derive(Deserialize)]
struct ExpiryClaim {
	exp: f64,
}

/// Decodes the `exp` claim of `token` into an instant.
///
/// Only the second segment is read, so unsigned `header.claims` tokens decode as well.
pub fn decode_expiry(token: &str) -> Result<OffsetDateTime, ClaimsError> {
	let segments = token.split('.').collect::<Vec<_>>();

	if segments.len() < 2 {
		return Err(ClaimsError::NotJwt { segments: segments.len() });
	}

	let claims = URL_SAFE_NO_PAD.decode(segments[1].trim_end_matches('='))?;
	let ExpiryClaim { exp } = serde_json::from_slice(&claims)?;

	if !exp.is_finite() {
		return Err(ClaimsError::ExpiryOutOfRange { exp });
	}

	OffsetDateTime::from_unix_timestamp(exp.floor() as i64)
		.map_err(|_| ClaimsError::ExpiryOutOfRange { exp })
}
