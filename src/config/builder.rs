//! Builder for [`ClientConfig`] values.

// self
use crate::{_prelude::*, config::ClientConfig, error::ConfigError, http::Method};

/// Builder for [`ClientConfig`] values, seeded with production defaults.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	config: ClientConfig,
}
impl ClientConfigBuilder {
	/// Creates a builder seeded with [`ClientConfig::default`].
	pub fn new() -> Self {
		Self { config: ClientConfig::default() }
	}

	/// Overrides the base URL (HTTPS, or HTTP on a loopback host).
	pub fn base_url(mut self, url: Url) -> Self {
		self.config.base_url = url;

		self
	}

	/// Overrides the transport timeout.
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.config.timeout = timeout;

		self
	}

	/// Overrides the token safety margin.
	pub fn safety_margin(mut self, margin: Duration) -> Self {
		self.config.safety_margin = margin;

		self
	}

	/// Overrides the verb used for the token exchange.
	pub fn token_method(mut self, method: Method) -> Self {
		self.config.token_method = method;

		self
	}

	/// Overrides the `User-Agent` header.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.config.user_agent = user_agent.into();

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		self.config.validate()?;

		Ok(self.config)
	}
}
impl Default for ClientConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}
