//! Refresh-credential exchange against a surface's token endpoint.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, TokenSecret},
	decode,
	error::AuthenticationError,
	http::{HttpRequest, HttpTransport, Method},
};

#[derive(Deserialize)]
struct TokenEnvelope {
	result: TokenSecret,
}

/// Exchanges the long-lived refresh credential for short-lived access tokens.
///
/// The credential travels as a bearer header; the issued JWT comes back in the `result` field of
/// the response envelope and its expiry is read from the token itself.
#[derive(Clone, Debug)]
pub struct TokenRefresher {
	credential: TokenSecret,
	endpoint: Url,
	method: Method,
}
impl TokenRefresher {
	/// Creates a refresher bound to one token endpoint.
	pub fn new(credential: impl Into<TokenSecret>, endpoint: Url, method: Method) -> Self {
		Self { credential: credential.into(), endpoint, method }
	}

	/// Absolute token endpoint URL.
	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}

	/// HTTP verb used for the exchange.
	pub fn method(&self) -> Method {
		self.method
	}

	/// Performs exactly one exchange and returns the issued token.
	///
	/// Nothing is cached here; installing the token is the caller's job.
	pub async fn refresh<C>(&self, transport: &C) -> Result<AccessToken, AuthenticationError>
	where
		C: ?Sized + HttpTransport,
	{
		let request = HttpRequest {
			method: self.method,
			url: self.endpoint.clone(),
			bearer: self.credential.clone(),
			body: None,
		};
		let response = transport.send(request).await.map_err(AuthenticationError::Transport)?;

		if !response.is_success() {
			return Err(AuthenticationError::Rejected {
				status: response.status,
				body: response.text().into_owned(),
			});
		}

		let TokenEnvelope { result } =
			decode::decode(&response.body).map_err(AuthenticationError::MalformedResponse)?;

		if result.is_blank() {
			return Err(AuthenticationError::EmptyToken);
		}

		Ok(AccessToken::from_jwt(result))
	}
}
