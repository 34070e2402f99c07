//! Customer surface: a user reading and managing their own metering points.

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
		Aggregation, ApiResponse, DateRange, DeleteRelationResponse, MarketDocument, MeteringPoint,
		MeteringPointCharges, MeteringPointDetail, MeteringPointIds,
	},
};

/// Typed client for `/customerapi/api`.
pub struct CustomerClient<C = ReqwestHttpClient>
where
	C: ?Sized + HttpTransport,
{
	api: ApiClient<C>,
}
impl<C> Debug for CustomerClient<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CustomerClient").field("api", &self.api).finish()
	}
}
impl CustomerClient<ReqwestHttpClient> {
	/// Creates a production client from a refresh token issued on the portal.
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
impl<C> CustomerClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates a client on a caller-provided transport.
	pub fn with_transport(
		refresh_token: impl Into<TokenSecret>,
		config: ClientConfig,
		transport: impl Into<Arc<C>>,
	) -> Result<Self, ConfigError> {
		Ok(Self { api: ApiClient::new(ApiSurface::Customer, refresh_token, config, transport)? })
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

	/// Lists the caller's metering points.
	///
	/// With `include_all`, points registered to the caller's CPR/CVR but not yet linked are
	/// included as well.
	pub async fn get_metering_points(&self, include_all: bool) -> Result<Vec<MeteringPoint>> {
		let request = ApiRequest::new(
			"get_metering_points",
			Method::Get,
			["meteringpoints", "meteringpoints"],
		)
		.query("includeAll", include_all.to_string());
		let response = self.api.execute(request).await?;

		decode::decode_envelope(&response)
	}

	/// Links a metering point using the web access code supplied by its owner.
	///
	/// The returned response reports the outcome in `success` and `result`.
	pub async fn add_relation(
		&self,
		metering_point_id: &str,
		web_access_code: &str,
	) -> Result<ApiResponse<String>> {
		let metering_point_id = client::path_identifier("metering_point_id", metering_point_id)?;
		let web_access_code = client::path_identifier("web_access_code", web_access_code)?;
		let request = ApiRequest::new("add_relation", Method::Put, [
			"meteringpoints",
			"meteringpoint",
			"relation",
			"add",
			metering_point_id,
			web_access_code,
		]);
		let response = self.api.execute(request).await?;

		Ok(decode::decode(&response.body)?)
	}

	/// Links metering points registered to the caller's CPR/CVR; one response per id.
	pub async fn add_relations_by_cvr<I, S>(&self, ids: I) -> Result<Vec<ApiResponse<String>>>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let ids = MeteringPointIds::new(ids)?;
		let request = ApiRequest::new("add_relations_by_cvr", Method::Post, [
			"meteringpoints",
			"meteringpoint",
			"relation",
			"add",
		])
		.json(&ids)?;
		let response = self.api.execute(request).await?;

		decode::decode_envelope(&response)
	}

	/// Removes the relation to a metering point; branch on
	/// [`DeleteRelationResponse::is_deleted`].
	pub async fn delete_relation(&self, metering_point_id: &str) -> Result<DeleteRelationResponse> {
		let metering_point_id = client::path_identifier("metering_point_id", metering_point_id)?;
		let request = ApiRequest::new("delete_relation", Method::Delete, [
			"meteringpoints",
			"meteringpoint",
			"relation",
			metering_point_id,
		]);
		let response = self.api.execute(request).await?;

		Ok(decode::decode(&response.body)?)
	}

	/// Fetches full details for the given metering points.
	pub async fn get_details<I, S>(&self, ids: I) -> Result<Vec<MeteringPointDetail>>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let ids = MeteringPointIds::new(ids)?;

		self.api.details(&["meteringpoints", "meteringpoint", "getdetails"], ids).await
	}

	/// Fetches subscriptions, tariffs, and fees currently or prospectively linked to the points.
	pub async fn get_charges<I, S>(&self, ids: I) -> Result<Vec<MeteringPointCharges>>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let ids = MeteringPointIds::new(ids)?;

		self.api.charges(&["meteringpoints", "meteringpoint", "getcharges"], ids).await
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

	/// Exports master data for the given points as CSV.
	pub async fn export_metering_points<I, S>(&self, ids: I) -> Result<String>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let ids = MeteringPointIds::new(ids)?;
		let request = ApiRequest::new("export_metering_points", Method::Post, [
			"meteringpoints",
			"masterdata",
			"export",
		])
		.json(&ids)?;

		self.api.export(request).await
	}

	/// Exports charges for the given points as CSV.
	pub async fn export_charges<I, S>(&self, ids: I) -> Result<String>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let ids = MeteringPointIds::new(ids)?;
		let request = ApiRequest::new("export_charges", Method::Post, [
			"meteringpoints",
			"charges",
			"export",
		])
		.json(&ids)?;

		self.api.export(request).await
	}

	/// Exports readings as CSV.
	pub async fn export_time_series<I, S>(
		&self,
		ids: I,
		from: Date,
		to: Date,
		aggregation: Aggregation,
	) -> Result<String>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let ids = MeteringPointIds::new(ids)?;
		let [from, to] = DateRange::new(from, to)?.segments();
		let request = ApiRequest::new("export_time_series", Method::Post, [
			"meterdata",
			"timeseries",
			"export",
			from.as_str(),
			to.as_str(),
			aggregation.as_str(),
		])
		.json(&ids)?;

		self.api.export(request).await
	}
}
