//! Generic authenticated client plus the two surface facades built on it.
//!
//! [`ApiClient`] owns the transport, the session, and the configuration for one surface and runs
//! every call through [`ApiClient::execute`]. [`CustomerClient`] and [`ThirdPartyClient`] are thin
//! typed facades: each operation builds an [`ApiRequest`], executes it, and decodes the result.

pub mod customer;
pub mod third_party;

mod execute;

pub use customer::CustomerClient;
pub use execute::Attempt;
pub use third_party::ThirdPartyClient;

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, Session, SessionMetrics, TokenRefresher, TokenSecret},
	config::{ApiSurface, ClientConfig},
	decode,
	error::ConfigError,
	http::{HttpTransport, Method, ReqwestHttpClient},
	models::{
		Aggregation, AliveResponse, ApiResponse, DateRange, MarketDocument, MeteringPointCharges,
		MeteringPointDetail, MeteringPointIds, TimeSeriesItem,
	},
	obs,
};

/// Relative request against one API surface.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
	/// Operation label used for spans; never contains caller data.
	pub operation: &'static str,
	/// HTTP verb.
	pub method: Method,
	/// Path segments below the surface prefix, unencoded.
	pub segments: Vec<String>,
	/// Query pairs, unencoded.
	pub query: Vec<(String, String)>,
	/// Optional JSON body.
	pub body: Option<serde_json::Value>,
}
impl ApiRequest {
	/// Creates a request without query or body.
	pub fn new<I, S>(operation: &'static str, method: Method, segments: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			operation,
			method,
			segments: segments.into_iter().map(Into::into).collect(),
			query: Vec::new(),
			body: None,
		}
	}

	/// Appends a query pair.
	pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((key.into(), value.into()));

		self
	}

	/// Attaches a JSON body.
	pub fn json<B>(mut self, body: &B) -> Result<Self, ConfigError>
	where
		B: ?Sized + Serialize,
	{
		self.body = Some(serde_json::to_value(body)?);

		Ok(self)
	}

	/// Resolves the absolute URL under `surface`.
	pub fn url(&self, config: &ClientConfig, surface: ApiSurface) -> Result<Url, ConfigError> {
		let mut url = config.endpoint(surface, self.segments.iter().map(String::as_str))?;

		if !self.query.is_empty() {
			url.query_pairs_mut().extend_pairs(&self.query);
		}

		Ok(url)
	}
}

/// Rejects a blank identifier before it becomes a path segment.
///
/// An empty segment would silently address a different endpoint (`relation/` instead of
/// `relation/{id}`).
pub(crate) fn path_identifier<'a>(
	field: &'static str,
	value: &'a str,
) -> Result<&'a str, ConfigError> {
	if value.trim().is_empty() {
		return Err(ConfigError::EmptyIdentifier { field });
	}

	Ok(value)
}

/// Authenticated client bound to one API surface.
///
/// Owns its transport: dropping the client (or calling [`close`](Self::close)) clears the session
/// and releases the transport handle.
pub struct ApiClient<C = ReqwestHttpClient>
where
	C: ?Sized + HttpTransport,
{
	transport: Arc<C>,
	session: Session,
	config: ClientConfig,
	surface: ApiSurface,
}
impl<C> ApiClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates a client with an empty session; no I/O happens until the first call.
	pub fn new(
		surface: ApiSurface,
		refresh_token: impl Into<TokenSecret>,
		config: ClientConfig,
		transport: impl Into<Arc<C>>,
	) -> Result<Self, ConfigError> {
		config.validate()?;

		let refresher =
			TokenRefresher::new(refresh_token, config.token_endpoint(surface)?, config.token_method);
		let session = Session::new(refresher, config.safety_margin);

		Ok(Self { transport: transport.into(), session, config, surface })
	}

	/// Seeds the session with a previously issued access token.
	pub fn with_access_token(mut self, token: AccessToken) -> Self {
		self.session.seed(token);

		self
	}

	/// Surface this client talks to.
	pub fn surface(&self) -> ApiSurface {
		self.surface
	}

	/// Active configuration.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Token session.
	pub fn session(&self) -> &Session {
		&self.session
	}

	/// Underlying transport.
	pub fn transport(&self) -> &Arc<C> {
		&self.transport
	}

	/// Refresh and retry counters.
	pub fn metrics(&self) -> &Arc<SessionMetrics> {
		self.session.metrics()
	}

	/// Clears the session and releases the transport.
	pub fn close(mut self) {
		self.session.clear();

		obs::event!(debug, surface = %self.surface, "Client closed.");
	}

	pub(crate) async fn is_alive(&self) -> Result<bool> {
		let response =
			self.execute(ApiRequest::new("is_alive", Method::Get, ["isalive"])).await?;

		decode::ensure_accepted(&response)?;

		Ok(decode::decode::<AliveResponse>(&response.body)?.is_alive())
	}

	pub(crate) async fn details(
		&self,
		segments: &[&str],
		ids: MeteringPointIds,
	) -> Result<Vec<MeteringPointDetail>> {
		let request =
			ApiRequest::new("get_details", Method::Post, segments.iter().copied()).json(&ids)?;
		let response = self.execute(request).await?;

		decode::decode_batch::<ApiResponse<MeteringPointDetail>>(&response)
	}

	pub(crate) async fn charges(
		&self,
		segments: &[&str],
		ids: MeteringPointIds,
	) -> Result<Vec<MeteringPointCharges>> {
		let request =
			ApiRequest::new("get_charges", Method::Post, segments.iter().copied()).json(&ids)?;
		let response = self.execute(request).await?;

		decode::decode_batch::<ApiResponse<MeteringPointCharges>>(&response)
	}

	pub(crate) async fn time_series(
		&self,
		ids: MeteringPointIds,
		range: DateRange,
		aggregation: Aggregation,
	) -> Result<Vec<MarketDocument>> {
		let [from, to] = range.segments();
		let request = ApiRequest::new("get_time_series", Method::Post, [
			"meterdata",
			"gettimeseries",
			from.as_str(),
			to.as_str(),
			aggregation.as_str(),
		])
		.json(&ids)?;
		let response = self.execute(request).await?;

		decode::decode_batch::<TimeSeriesItem>(&response)
	}

	pub(crate) async fn export(&self, request: ApiRequest) -> Result<String> {
		let response = self.execute(request).await?;

		decode::ensure_accepted(&response)?;

		Ok(response.text().into_owned())
	}
}
impl<C> Drop for ApiClient<C>
where
	C: ?Sized + HttpTransport,
{
	fn drop(&mut self) {
		self.session.clear();
	}
}
impl<C> Debug for ApiClient<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("surface", &self.surface)
			.field("config", &self.config)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::*;

	#[test]
	fn request_url_encodes_segments_and_query() {
		let config = ClientConfig::default();
		let request = ApiRequest::new(
			"get_metering_points",
			Method::Get,
			["meteringpoints", "meteringpoints"],
		)
		.query("includeAll", "true");

		assert_eq!(
			request.url(&config, ApiSurface::Customer).expect("URL should build.").as_str(),
			"https://api.eloverblik.dk/customerapi/api/meteringpoints/meteringpoints?includeAll=true"
		);
	}

	#[test]
	fn json_body_is_attached() {
		let ids = MeteringPointIds::new(["mp-1"]).expect("Batch should build.");
		let request = ApiRequest::new("get_details", Method::Post, ["meteringpoint", "getdetails"])
			.json(&ids)
			.expect("Body should encode.");

		assert_eq!(
			request.body,
			Some(serde_json::json!({ "meteringPoints": { "meteringPoint": ["mp-1"] } }))
		);
	}

	#[test]
	fn blank_path_identifiers_are_rejected() {
		assert_eq!(path_identifier("metering_point_id", "571313").ok(), Some("571313"));
		assert!(matches!(
			path_identifier("metering_point_id", " "),
			Err(ConfigError::EmptyIdentifier { field: "metering_point_id" })
		));
	}

	#[tokio::test]
	async fn close_clears_the_session() {
		let transport = Arc::new(ScriptedTransport::default());
		let client = ApiClient::<ScriptedTransport>::new(
			ApiSurface::Customer,
			TEST_REFRESH_TOKEN,
			ClientConfig::default(),
			transport.clone(),
		)
		.expect("Client should build.")
		.with_access_token(AccessToken::from_jwt(jwt_expiring_in(Duration::hours(1))));

		assert!(client.session().current().await.is_some());
		assert_eq!(Arc::strong_count(&transport), 2);

		client.close();

		assert_eq!(Arc::strong_count(&transport), 1);
		assert!(transport.requests().is_empty());
	}
}
