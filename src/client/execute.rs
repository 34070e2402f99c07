//! Authenticated request execution with a single optimistic retry on `401`.

// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest},
	error::ApiError,
	http::{HttpRequest, HttpTransport, RawResponse},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

/// Position of a call in the retry state machine.
///
/// `First --401--> Retried --401--> (terminal)`. No other status moves the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attempt {
	/// Initial send with the token from the session.
	First,
	/// Resend after a forced refresh.
	Retried,
}
impl Attempt {
	/// Next state after the server rejected the token, or `None` when the retry is spent.
	pub const fn on_unauthorized(self) -> Option<Self> {
		match self {
			Self::First => Some(Self::Retried),
			Self::Retried => None,
		}
	}
}

impl<C> ApiClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Sends `request` with a valid bearer token and returns the `2xx` response.
	///
	/// A `401` forces one token refresh and one resend. A second `401`, or any other non-success
	/// status, fails with [`ApiError::Status`].
	pub async fn execute(&self, request: ApiRequest) -> Result<RawResponse> {
		const KIND: CallKind = CallKind::Request;

		let span = CallSpan::new(KIND, request.operation);

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.send_with_retry(request)).await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	async fn send_with_retry(&self, request: ApiRequest) -> Result<RawResponse> {
		let url = request.url(&self.config, self.surface)?;
		let mut token = self.session.ensure_valid_token(&*self.transport).await?;
		let mut attempt = Attempt::First;

		loop {
			let response = self
				.transport
				.send(HttpRequest {
					method: request.method,
					url: url.clone(),
					bearer: token.secret().clone(),
					body: request.body.clone(),
				})
				.await?;

			if response.is_success() {
				return Ok(response);
			}

			let retry = if response.status == 401 { attempt.on_unauthorized() } else { None };

			if let Some(next) = retry {
				obs::event!(debug, "Access token rejected; refreshing and retrying once.");
				obs::record_call_outcome(CallKind::Request, CallOutcome::Retry);
				self.session.metrics().record_unauthorized_retry();

				token = self.session.force_refresh(&*self.transport, &token).await?;
				attempt = next;

				continue;
			}

			obs::event!(
				debug,
				status = response.status,
				attempt = ?attempt,
				"API call failed."
			);

			return Err(ApiError::Status {
				status: response.status,
				body: response.text().into_owned(),
				retry_after: response.retry_after,
			}
			.into());
		}
	}
}
