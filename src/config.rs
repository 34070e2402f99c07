//! Client configuration: API surfaces, endpoint assembly, and transport construction.

pub mod builder;

pub use builder::*;

// crates.io
use url::Host;
// self
use crate::{
	_prelude::*,
	error::ConfigError,
	http::{Method, ReqwestHttpClient},
};

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.eloverblik.dk";
/// Transport timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(120);
/// Margin subtracted from a token's expiry before it is treated as stale.
pub const DEFAULT_SAFETY_MARGIN: Duration = Duration::seconds(60);

/// The two API surfaces exposed by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiSurface {
	/// `/customerapi/api`: a user reading their own data.
	Customer,
	/// `/thirdpartyapi/api`: an application acting under granted authorizations.
	ThirdParty,
}
impl ApiSurface {
	/// Path segments every endpoint of the surface lives under.
	pub const fn segments(self) -> [&'static str; 2] {
		match self {
			Self::Customer => ["customerapi", "api"],
			Self::ThirdParty => ["thirdpartyapi", "api"],
		}
	}

	/// Stable label for logs.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Customer => "customer",
			Self::ThirdParty => "third_party",
		}
	}
}
impl Display for ApiSurface {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Validated client settings shared by both surfaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	/// Scheme + host (and optional path prefix) every surface hangs off.
	pub base_url: Url,
	/// Transport timeout per HTTP exchange.
	pub timeout: StdDuration,
	/// Margin subtracted from the token expiry before refreshing.
	pub safety_margin: Duration,
	/// Verb used for the token exchange.
	pub token_method: Method,
	/// `User-Agent` header sent by the default transport.
	pub user_agent: String,
}
impl ClientConfig {
	/// Starts a builder seeded with production defaults.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::new()
	}

	/// Resolves `segments` under the surface prefix, percent-encoding each segment.
	pub fn endpoint<'a, I>(&self, surface: ApiSurface, segments: I) -> Result<Url, ConfigError>
	where
		I: IntoIterator<Item = &'a str>,
	{
		let mut url = self.base_url.clone();

		url.path_segments_mut()
			.map_err(|_| ConfigError::BaseUrlCannotBeBase { url: self.base_url.to_string() })?
			.pop_if_empty()
			.extend(surface.segments())
			.extend(segments);

		Ok(url)
	}

	/// Token endpoint of `surface`.
	pub fn token_endpoint(&self, surface: ApiSurface) -> Result<Url, ConfigError> {
		self.endpoint(surface, ["token"])
	}

	/// Builds the default reqwest transport with the configured timeout and user agent.
	pub fn http_client(&self) -> Result<ReqwestHttpClient, ConfigError> {
		let client =
			ReqwestClient::builder().timeout(self.timeout).user_agent(&self.user_agent).build()?;

		Ok(ReqwestHttpClient::with_client(client))
	}

	pub(crate) fn validate(&self) -> Result<(), ConfigError> {
		if self.base_url.cannot_be_a_base() {
			return Err(ConfigError::BaseUrlCannotBeBase { url: self.base_url.to_string() });
		}
		if self.base_url.scheme() != "https" && !is_loopback(&self.base_url) {
			return Err(ConfigError::InsecureBaseUrl { url: self.base_url.to_string() });
		}
		if self.timeout.is_zero() {
			return Err(ConfigError::ZeroTimeout);
		}
		if self.safety_margin.is_negative() {
			return Err(ConfigError::NegativeSafetyMargin);
		}

		Ok(())
	}
}
impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			base_url: default_base_url(),
			timeout: DEFAULT_TIMEOUT,
			safety_margin: DEFAULT_SAFETY_MARGIN,
			token_method: Method::Get,
			user_agent: default_user_agent(),
		}
	}
}

fn default_base_url() -> Url {
	Url::parse(DEFAULT_BASE_URL).unwrap_or_else(|_| unreachable!("Default base URL is valid."))
}

fn default_user_agent() -> String {
	concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).into()
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(Host::Ipv4(ip)) => ip.is_loopback(),
		Some(Host::Ipv6(ip)) => ip.is_loopback(),
		None => false,
	}
}
