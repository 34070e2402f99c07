//! Short-lived bearer tokens and their expiry bookkeeping.

// self
use crate::{
	_prelude::*,
	auth::{decode_expiry, token::secret::TokenSecret},
};

/// Lifecycle status for an access token at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenStatus {
	/// Token remains usable beyond the safety margin.
	Valid,
	/// Token is still unexpired but falls inside the safety margin.
	Expiring,
	/// Token exceeded its expiry instant.
	Expired,
}

/// Bearer token plus the expiry read from its own `exp` claim.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
	secret: TokenSecret,
	expires_at: OffsetDateTime,
}
impl AccessToken {
	/// Wraps a token whose expiry is already known.
	pub fn new(secret: impl Into<TokenSecret>, expires_at: OffsetDateTime) -> Self {
		Self { secret: secret.into(), expires_at }
	}

	/// Builds a token by decoding the expiry from its claims segment.
	///
	/// Tokens without a readable `exp` are accepted but stamped as expired at the Unix epoch, so
	/// they serve the call in hand and are refreshed on the next one.
	pub fn from_jwt(secret: impl Into<TokenSecret>) -> Self {
		let secret = secret.into();
		let expires_at = match decode_expiry(secret.expose()) {
			Ok(instant) => instant,
			Err(_err) => {
				crate::obs::event!(
					warn,
					error = %_err,
					"Access token has no readable expiry claim; treating it as expired."
				);

				OffsetDateTime::UNIX_EPOCH
			},
		};

		Self { secret, expires_at }
	}

	/// Bearer secret attached to outbound requests.
	pub fn secret(&self) -> &TokenSecret {
		&self.secret
	}

	/// Instant decoded from the `exp` claim.
	pub fn expires_at(&self) -> OffsetDateTime {
		self.expires_at
	}

	/// Computes the lifecycle status at `now` with the provided safety margin.
	pub fn status_at(&self, now: OffsetDateTime, margin: Duration) -> TokenStatus {
		if now >= self.expires_at {
			return TokenStatus::Expired;
		}
		if now >= self.expires_at - margin {
			return TokenStatus::Expiring;
		}

		TokenStatus::Valid
	}

	/// Returns `true` only if `now` is strictly before `expires_at - margin`.
	pub fn is_valid_at(&self, now: OffsetDateTime, margin: Duration) -> bool {
		matches!(self.status_at(now, margin), TokenStatus::Valid)
	}

	/// Same as [`is_valid_at`](Self::is_valid_at) against the current UTC clock.
	pub fn is_valid(&self, margin: Duration) -> bool {
		self.is_valid_at(OffsetDateTime::now_utc(), margin)
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("secret", &"<redacted>")
			.field("expires_at", &self.expires_at)
			.finish()
	}
}
