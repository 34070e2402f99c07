//! Client-level error types shared across the session, executor, decoder, and facades.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The token exchange failed; the call never reached the API.
	#[error(transparent)]
	Authentication(#[from] AuthenticationError),
	/// An authenticated call returned a non-recoverable status or a failed envelope.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// The response body does not match the declared schema.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// Transport failure (DNS, TCP, TLS, timeout) on an authenticated call.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Local configuration or request input problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
}
impl Error {
	/// Returns the HTTP status carried by the error, when one exists.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Authentication(err) => err.status(),
			Self::Api(err) => Some(err.status()),
			_ => None,
		}
	}
}

/// Failures of the refresh-credential exchange.
#[derive(Debug, ThisError)]
pub enum AuthenticationError {
	/// Token endpoint answered with a non-success status.
	#[error("Token endpoint rejected the refresh credential with HTTP {status}.")]
	Rejected {
		/// HTTP status code returned by the token endpoint.
		status: u16,
		/// Raw response body for diagnostics.
		body: String,
	},
	/// Token endpoint could not be reached.
	#[error("Network error occurred while calling the token endpoint.")]
	Transport(#[source] TransportError),
	/// Token endpoint answered with a body that does not carry a token.
	#[error("Token endpoint returned a malformed response.")]
	MalformedResponse(#[source] ValidationError),
	/// Token endpoint answered with an empty token.
	#[error("Token endpoint returned an empty token.")]
	EmptyToken,
}
impl AuthenticationError {
	/// Returns the upstream HTTP status, if the endpoint answered.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Rejected { status, .. } => Some(*status),
			_ => None,
		}
	}
}

/// Failures reported by the API for an authenticated call.
#[derive(Debug, ThisError)]
pub enum ApiError {
	/// Non-success HTTP status (including a second `401`).
	#[error("API returned HTTP {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Raw response body.
		body: String,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// Success status, but the response envelope reported `success: false`.
	#[error("API reported error {}: {}.", .error_code.unwrap_or_default(), .error_text.as_deref().unwrap_or("unknown error"))]
	Rejected {
		/// HTTP status code of the carrying response.
		status: u16,
		/// Upstream `errorCode`.
		error_code: Option<i64>,
		/// Upstream `errorText`.
		error_text: Option<String>,
		/// Raw response body.
		body: String,
	},
}
impl ApiError {
	/// HTTP status code of the failing response.
	pub fn status(&self) -> u16 {
		match self {
			Self::Status { status, .. } | Self::Rejected { status, .. } => *status,
		}
	}

	/// Raw body of the failing response.
	pub fn body(&self) -> &str {
		match self {
			Self::Status { body, .. } | Self::Rejected { body, .. } => body,
		}
	}

	/// Returns `true` for `401 Unauthorized`.
	pub fn is_unauthorized(&self) -> bool {
		matches!(self, Self::Status { status: 401, .. })
	}

	/// Returns `true` for `429 Too Many Requests`.
	pub fn is_rate_limited(&self) -> bool {
		matches!(self, Self::Status { status: 429, .. })
	}

	/// Returns `true` for any `5xx` status.
	pub fn is_server_error(&self) -> bool {
		matches!(self, Self::Status { status: 500..=599, .. })
	}
}

/// Strict decode failure of a response body.
#[derive(Debug, ThisError)]
#[error("Response does not match the `{target}` schema at `{}`.", .source.path())]
pub struct ValidationError {
	/// Rust type the body was decoded into.
	pub target: &'static str,
	/// Leading slice of the offending payload.
	pub preview: String,
	/// Structured parsing failure, including the JSON path.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
}
impl ValidationError {
	/// JSON path where decoding failed (`.` for the document root).
	pub fn path(&self) -> String {
		self.source.path().to_string()
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Configuration and request input failures raised before any network I/O.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL must use HTTPS unless it points at a loopback host.
	#[error("The base URL must use HTTPS: {url}.")]
	InsecureBaseUrl {
		/// Offending URL.
		url: String,
	},
	/// Base URL cannot carry path segments (e.g. `mailto:`).
	#[error("The base URL cannot be used as a base: {url}.")]
	BaseUrlCannotBeBase {
		/// Offending URL.
		url: String,
	},
	/// Transport timeout must be positive.
	#[error("The transport timeout must be greater than zero.")]
	ZeroTimeout,
	/// Token safety margin must not be negative.
	#[error("The token safety margin must not be negative.")]
	NegativeSafetyMargin,
	/// Request body could not be serialized.
	#[error("Request body could not be encoded.")]
	RequestEncode(#[from] serde_json::Error),
	/// A batch call was issued without metering point identifiers.
	#[error("At least one metering point identifier is required.")]
	EmptyMeteringPoints,
	/// A single identifier placed in a request path is blank.
	#[error("The `{field}` identifier must not be blank.")]
	EmptyIdentifier {
		/// Name of the offending argument.
		field: &'static str,
	},
	/// A date range ends before it starts.
	#[error("Date range is inverted: {from} is after {to}.")]
	InvalidDateRange {
		/// Requested start date.
		from: Date,
		/// Requested end date.
		to: Date,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn api_error_classifies_statuses() {
		let status = |status| ApiError::Status { status, body: String::new(), retry_after: None };

		assert!(status(401).is_unauthorized());
		assert!(status(429).is_rate_limited());
		assert!(status(503).is_server_error());
		assert!(!status(404).is_server_error());

		let rejected = ApiError::Rejected {
			status: 200,
			error_code: Some(20000),
			error_text: Some("WrongNumberOfMeteringPoints".into()),
			body: "{}".into(),
		};

		assert_eq!(rejected.status(), 200);
		assert!(!rejected.is_unauthorized());
		assert_eq!(rejected.to_string(), "API reported error 20000: WrongNumberOfMeteringPoints.");
	}

	#[test]
	fn error_status_only_for_upstream_failures() {
		let auth = Error::from(AuthenticationError::Rejected { status: 401, body: String::new() });
		let config = Error::from(ConfigError::EmptyMeteringPoints);

		assert_eq!(auth.status(), Some(401));
		assert_eq!(config.status(), None);
	}
}
