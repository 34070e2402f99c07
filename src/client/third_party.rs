//! Third-party surface: an application reading customer data under granted authorizations.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, SessionMetrics, TokenSecret},
	client::{self, ApiClient, ApiRequest},
	config::{ApiSurface, ClientConfig},
	decode,
	error::ConfigError,
	http::{HttpTransport, Method, ReqwestHttpClient},
	models::{
		Aggregation, Authorization, AuthorizationScope, DateRange, MarketDocument,
		MeteringPointCharges, MeteringPointDetail, MeteringPointIds, MeteringPointThirdParty,
	},
};

/// Typed client for `/thirdpartyapi/api`.
pub struct ThirdPartyClient<C = ReqwestHttpClient>
where
	C: ?Sized + HttpTransport,
{
	api: ApiClient<C>,
}
impl<C> Debug for ThirdPartyClient<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ThirdPartyClient").field("api", &self.api).finish()
	}
}
impl ThirdPartyClient<ReqwestHttpClient> {
	/// Creates a production client from a third-party refresh token.
	pub fn new(refresh_token: impl Into<TokenSecret>) -> Result<Self, ConfigError> {
		Self::with_config(refresh_token, ClientConfig::default())
	}

	/// Creates a client with custom settings and its own reqwest transport.
	pub fn with_config(
		refresh_token: impl Into<TokenSecret>,
		config: ClientConfig,
	) -> Result<Self, ConfigError> {
		let transport = config.http_client()?;

		Self::with_transport(refresh_token, config, transport)
	}
}
impl<C> ThirdPartyClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates a client on a caller-provided transport.
	pub fn with_transport(
		refresh_token: impl Into<TokenSecret>,
		config: ClientConfig,
		transport: impl Into<Arc<C>>,
	) -> Result<Self, ConfigError> {
		Ok(Self { api: ApiClient::new(ApiSurface::ThirdParty, refresh_token, config, transport)? })
	}

	/// Seeds the session with a previously issued access token.
	pub fn with_access_token(self, token: AccessToken) -> Self {
		Self { api: self.api.with_access_token(token) }
	}

	/// Generic client underneath this facade.
	pub fn api(&self) -> &ApiClient<C> {
		&self.api
	}

	/// Refresh and retry counters.
	pub fn metrics(&self) -> &Arc<SessionMetrics> {
		self.api.metrics()
	}

	/// Clears the session and releases the transport.
	pub fn close(self) {
		self.api.close();
	}

	/// Returns `true` when the API reports itself healthy.
	pub async fn is_alive(&self) -> Result<bool> {
		self.api.is_alive().await
	}

	/// Lists active authorizations; expired or deleted ones are not returned.
	pub async fn get_authorizations(&self) -> Result<Vec<Authorization>> {
		let request = ApiRequest::new("get_authorizations", Method::Get, [
			"authorization",
			"authorizations",
		]);
		let response = self.api.execute(request).await?;

		decode::decode_envelope(&response)
	}

	/// Lists metering points reachable under `scope` = `identifier`.
	pub async fn get_metering_points(
		&self,
		scope: AuthorizationScope,
		identifier: &str,
	) -> Result<Vec<MeteringPointThirdParty>> {
		let identifier = client::path_identifier("identifier", identifier)?;
		let request = ApiRequest::new("get_metering_points", Method::Get, [
			"authorization",
			"authorization",
			"meteringpoints",
			scope.as_str(),
			identifier,
		]);
		let response = self.api.execute(request).await?;

		decode::decode_envelope(&response)
	}

	/// Lists only the GSRN identifiers reachable under `scope` = `identifier`.
	pub async fn get_metering_point_ids(
		&self,
		scope: AuthorizationScope,
		identifier: &str,
	) -> Result<Vec<String>> {
		let identifier = client::path_identifier("identifier", identifier)?;
		let request = ApiRequest::new("get_metering_point_ids", Method::Get, [
			"authorization",
			"authorization",
			"meteringpointids",
			scope.as_str(),
			identifier,
		]);
		let response = self.api.execute(request).await?;

		decode::decode_envelope(&response)
	}

	/// Fetches full details for the given metering points.
	pub async fn get_details<I, S>(&self, ids: I) -> Result<Vec<MeteringPointDetail>>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let ids = MeteringPointIds::new(ids)?;

		self.api.details(&["meteringpoint", "getdetails"], ids).await
	}

	/// Fetches subscriptions, tariffs, and fees linked to the given metering points.
	pub async fn get_charges<I, S>(&self, ids: I) -> Result<Vec<MeteringPointCharges>>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let ids = MeteringPointIds::new(ids)?;

		self.api.charges(&["meteringpoint", "getcharges"], ids).await
	}

	/// Fetches readings for `ids` between `from` and `to` (inclusive) at `aggregation`.
	pub async fn get_time_series<I, S>(
		&self,
		ids: I,
		from: Date,
		to: Date,
		aggregation: Aggregation,
	) -> Result<Vec<MarketDocument>>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let ids = MeteringPointIds::new(ids)?;
		let range = DateRange::new(from, to)?;

		self.api.time_series(ids, range, aggregation).await
	}
}
