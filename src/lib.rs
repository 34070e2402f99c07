//! Async, strongly typed client for the Eloverblik customer and third-party metering APIs, with
//! JWT-aware token refresh, a single optimistic retry on `401`, and strict response decoding.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod http;
pub mod models;
pub mod obs;

#[cfg(any(test, feature = "test"))]
#[doc(hidden)]
pub mod _preludet {
	//! Convenience re-exports and fixtures for integration tests and demos; enabled via
	//! `cfg(test)` or the `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::collections::VecDeque;
	// crates.io
	use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
	use parking_lot::Mutex;
	// self
	use crate::{
		client::{CustomerClient, ThirdPartyClient},
		config::ClientConfig,
		error::TransportError,
		http::{HttpRequest, HttpTransport, RawResponse, TransportFuture},
	};

	/// Refresh credential used by test clients.
	pub const TEST_REFRESH_TOKEN: &str = "test-refresh-token";

	/// Builds an unsigned JWT whose claims segment carries the provided `exp` timestamp.
	pub fn jwt_expiring_at(exp: i64) -> String {
		let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
		let claims = URL_SAFE_NO_PAD.encode(format!("{{\"exp\":{exp},\"sub\":\"test\"}}"));

		format!("{header}.{claims}.signature")
	}

	/// Builds an unsigned JWT that expires `ttl` from now.
	pub fn jwt_expiring_in(ttl: Duration) -> String {
		jwt_expiring_at((OffsetDateTime::now_utc() + ttl).unix_timestamp())
	}

	/// Returns a [`ClientConfig`] pointed at a local mock server.
	pub fn test_config(base_url: &str) -> ClientConfig {
		ClientConfig::builder()
			.base_url(Url::parse(base_url).expect("Mock server URL should parse."))
			.build()
			.expect("Mock server configuration should be valid.")
	}

	/// Customer client backed by reqwest and pointed at a local mock server.
	pub fn test_customer_client(base_url: &str) -> CustomerClient {
		CustomerClient::with_config(TEST_REFRESH_TOKEN, test_config(base_url))
			.expect("Failed to build customer client for tests.")
	}

	/// Third-party client backed by reqwest and pointed at a local mock server.
	pub fn test_third_party_client(base_url: &str) -> ThirdPartyClient {
		ThirdPartyClient::with_config(TEST_REFRESH_TOKEN, test_config(base_url))
			.expect("Failed to build third-party client for tests.")
	}

	/// Scripted reply served by [`ScriptedTransport`].
	pub enum ScriptedReply {
		/// Respond immediately with the given response.
		Respond(RawResponse),
		/// Never resolve; used to simulate abandoned in-flight calls.
		Hang,
		/// Fail with a transport error.
		Fail,
	}

	/// In-process transport that replays scripted replies in order and records every request.
	#[derive(Default)]
	pub struct ScriptedTransport {
		replies: Mutex<VecDeque<ScriptedReply>>,
		requests: Mutex<Vec<HttpRequest>>,
	}
	impl ScriptedTransport {
		/// Creates a transport that serves `replies` in order.
		pub fn new(replies: impl IntoIterator<Item = ScriptedReply>) -> Self {
			Self { replies: Mutex::new(replies.into_iter().collect()), requests: Default::default() }
		}

		/// Appends another reply to the script.
		pub fn push(&self, reply: ScriptedReply) {
			self.replies.lock().push_back(reply);
		}

		/// Returns every request observed so far.
		pub fn requests(&self) -> Vec<HttpRequest> {
			self.requests.lock().clone()
		}

		/// Returns the URL paths of every request observed so far.
		pub fn paths(&self) -> Vec<String> {
			self.requests.lock().iter().map(|request| request.url.path().to_owned()).collect()
		}
	}
	impl HttpTransport for ScriptedTransport {
		fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
			self.requests.lock().push(request);

			let reply = self.replies.lock().pop_front();

			Box::pin(async move {
				match reply {
					Some(ScriptedReply::Respond(response)) => Ok(response),
					Some(ScriptedReply::Hang) => std::future::pending().await,
					Some(ScriptedReply::Fail) | None =>
						Err(TransportError::network(ScriptExhausted)),
				}
			})
		}
	}

	#[derive(Debug, ThisError)]
	#[error("Scripted transport has no reply for this request.")]
	struct ScriptExhausted;

	/// JSON response with the given status.
	pub fn json_response(status: u16, body: serde_json::Value) -> RawResponse {
		RawResponse {
			status,
			content_type: Some("application/json; charset=utf-8".into()),
			retry_after: None,
			body: body.to_string().into_bytes(),
		}
	}

	/// Token endpoint envelope carrying `token`.
	pub fn token_response(token: &str) -> RawResponse {
		json_response(200, serde_json::json!({ "result": token, "success": true, "errorCode": 0 }))
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
		time::Duration as StdDuration,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Date, Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use client::{CustomerClient, ThirdPartyClient};
pub use error::{Error, Result};
pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
