//! Per-client token slot with lazy refresh, coalescing, and cancellation safety.
//!
//! The slot sits behind an async mutex. A caller that finds the token stale refreshes while
//! holding the lock, so racing callers queue behind it and reuse the installed token instead of
//! issuing their own exchange. The slot is only written after a refresh fully succeeds: dropping
//! the future mid-exchange releases the lock and leaves the previous token in place.

mod metrics;

pub use metrics::SessionMetrics;

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, TokenRefresher},
	error::AuthenticationError,
	http::HttpTransport,
	obs::{self, CallKind, CallOutcome, CallSpan},
};

/// Refresh credential plus the current access token, if any.
#[derive(Debug)]
pub struct Session {
	refresher: TokenRefresher,
	safety_margin: Duration,
	slot: AsyncMutex<Option<AccessToken>>,
	metrics: Arc<SessionMetrics>,
}
impl Session {
	/// Creates an empty session; the first authenticated call fills it.
	pub fn new(refresher: TokenRefresher, safety_margin: Duration) -> Self {
		Self {
			refresher,
			safety_margin,
			slot: AsyncMutex::new(None),
			metrics: Default::default(),
		}
	}

	/// Seeds the slot with a previously issued token.
	pub fn with_access_token(mut self, token: AccessToken) -> Self {
		self.seed(token);

		self
	}

	/// Replaces the held token without contacting the token endpoint.
	pub fn seed(&mut self, token: AccessToken) {
		*self.slot.get_mut() = Some(token);
	}

	/// Refresher bound to this session.
	pub fn refresher(&self) -> &TokenRefresher {
		&self.refresher
	}

	/// Margin subtracted from the token expiry before it counts as stale.
	pub fn safety_margin(&self) -> Duration {
		self.safety_margin
	}

	/// Shared counters for refreshes and retries.
	pub fn metrics(&self) -> &Arc<SessionMetrics> {
		&self.metrics
	}

	/// Snapshot of the held token.
	pub async fn current(&self) -> Option<AccessToken> {
		self.slot.lock().await.clone()
	}

	/// Returns the held token when it is still valid, otherwise performs one refresh.
	pub async fn ensure_valid_token<C>(
		&self,
		transport: &C,
	) -> Result<AccessToken, AuthenticationError>
	where
		C: ?Sized + HttpTransport,
	{
		let mut slot = self.slot.lock().await;

		if let Some(token) = slot.as_ref().filter(|token| token.is_valid(self.safety_margin)) {
			return Ok(token.clone());
		}

		self.refresh_into(transport, &mut slot).await
	}

	/// Refreshes regardless of local expiry math, unless `stale` was already replaced.
	///
	/// Callers pass the token the server just rejected. When a concurrent caller has installed a
	/// different token in the meantime, that token is returned without another exchange.
	pub async fn force_refresh<C>(
		&self,
		transport: &C,
		stale: &AccessToken,
	) -> Result<AccessToken, AuthenticationError>
	where
		C: ?Sized + HttpTransport,
	{
		let mut slot = self.slot.lock().await;

		if let Some(token) = slot.as_ref().filter(|token| *token != stale) {
			obs::event!(debug, "Access token already rotated by a concurrent caller.");

			return Ok(token.clone());
		}

		self.refresh_into(transport, &mut slot).await
	}

	/// Drops the held token. Exclusive access makes this lock-free.
	pub fn clear(&mut self) {
		*self.slot.get_mut() = None;
	}

	async fn refresh_into<C>(
		&self,
		transport: &C,
		slot: &mut Option<AccessToken>,
	) -> Result<AccessToken, AuthenticationError>
	where
		C: ?Sized + HttpTransport,
	{
		const KIND: CallKind = CallKind::TokenRefresh;

		let span = CallSpan::new(KIND, "refresh");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);
		self.metrics.record_refresh_attempt();

		match span.instrument(self.refresher.refresh(transport)).await {
			Ok(token) => {
				obs::record_call_outcome(KIND, CallOutcome::Success);
				self.metrics.record_refresh_success();
				obs::event!(debug, expires_at = %token.expires_at(), "Access token refreshed.");

				*slot = Some(token.clone());

				Ok(token)
			},
			Err(e) => {
				obs::record_call_outcome(KIND, CallOutcome::Failure);
				self.metrics.record_refresh_failure();
				obs::event!(warn, error = %e, "Access token refresh failed.");

				Err(e)
			},
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{_preludet::*, http::Method};

	fn session() -> Session {
		let endpoint = Url::parse("https://api.eloverblik.dk/customerapi/api/token")
			.expect("Token URL should parse.");

		Session::new(
			TokenRefresher::new(TEST_REFRESH_TOKEN, endpoint, Method::Get),
			Duration::seconds(60),
		)
	}

	#[tokio::test]
	async fn valid_token_is_returned_without_refresh() {
		let held = AccessToken::from_jwt(jwt_expiring_in(Duration::hours(1)));
		let session = session().with_access_token(held.clone());
		let transport = ScriptedTransport::default();
		let token = session.ensure_valid_token(&transport).await.expect("Token should be reused.");

		assert_eq!(token, held);
		assert!(transport.requests().is_empty());
		assert_eq!(session.metrics().refresh_attempts(), 0);
	}

	#[tokio::test]
	async fn token_inside_margin_or_expired_is_refreshed_once() {
		for ttl in [Duration::seconds(30), Duration::seconds(60), Duration::minutes(-5)] {
			let stale = AccessToken::from_jwt(jwt_expiring_in(ttl));
			let fresh = jwt_expiring_in(Duration::hours(1));
			let session = session().with_access_token(stale.clone());
			let transport = ScriptedTransport::new([ScriptedReply::Respond(token_response(&fresh))]);
			let token =
				session.ensure_valid_token(&transport).await.expect("Stale token should refresh.");

			assert_eq!(token.secret().expose(), fresh);
			assert_eq!(transport.requests().len(), 1);
			assert_eq!(session.current().await, Some(token));
		}
	}

	#[tokio::test]
	async fn empty_session_refreshes_lazily() {
		let fresh = jwt_expiring_in(Duration::hours(1));
		let session = session();
		let transport = ScriptedTransport::new([ScriptedReply::Respond(token_response(&fresh))]);

		assert!(session.current().await.is_none());

		session.ensure_valid_token(&transport).await.expect("First call should refresh.");
		session.ensure_valid_token(&transport).await.expect("Second call should reuse.");

		assert_eq!(transport.requests().len(), 1);
		assert_eq!(session.metrics().refresh_successes(), 1);
	}

	#[tokio::test]
	async fn force_refresh_skips_exchange_when_already_rotated() {
		let rotated = AccessToken::from_jwt(jwt_expiring_in(Duration::hours(1)));
		let stale = AccessToken::new("revoked", OffsetDateTime::now_utc() + Duration::hours(1));
		let session = session().with_access_token(rotated.clone());
		let transport = ScriptedTransport::default();
		let token =
			session.force_refresh(&transport, &stale).await.expect("Rotated token should win.");

		assert_eq!(token, rotated);
		assert!(transport.requests().is_empty());
	}

	#[tokio::test]
	async fn failed_refresh_keeps_previous_token() {
		let stale = AccessToken::from_jwt(jwt_expiring_in(Duration::minutes(-1)));
		let session = session().with_access_token(stale.clone());
		let transport = ScriptedTransport::new([ScriptedReply::Respond(json_response(
			500,
			serde_json::json!({ "error": "down" }),
		))]);
		let err = session.ensure_valid_token(&transport).await.expect_err("Refresh should fail.");

		assert_eq!(err.status(), Some(500));
		assert_eq!(session.current().await, Some(stale));
		assert_eq!(session.metrics().refresh_failures(), 1);
	}

	#[tokio::test]
	async fn abandoned_refresh_leaves_slot_untouched() {
		let stale = AccessToken::from_jwt(jwt_expiring_in(Duration::minutes(-1)));
		let session = session().with_access_token(stale.clone());
		let transport = ScriptedTransport::new([ScriptedReply::Hang]);
		let outcome = tokio::time::timeout(
			std::time::Duration::from_millis(50),
			session.ensure_valid_token(&transport),
		)
		.await;

		assert!(outcome.is_err());
		assert_eq!(session.current().await, Some(stale));
	}

	#[tokio::test]
	async fn clear_drops_the_token() {
		let mut session =
			session().with_access_token(AccessToken::new("t", OffsetDateTime::now_utc()));

		session.clear();

		assert!(session.current().await.is_none());
	}
}
