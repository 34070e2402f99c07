//! Lists the caller's metering points and pulls a day of hourly readings through the customer
//! surface.
//!
//! Set `ELOVERBLIK_REFRESH_TOKEN` to talk to the live API; otherwise a local mock server stands in.

// std
use std::env;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
use time::macros;
// self
use eloverblik::{
	CustomerClient,
	_preludet::{Duration, jwt_expiring_in},
	config::ClientConfig,
	models::Aggregation,
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let client = match env::var("ELOVERBLIK_REFRESH_TOKEN") {
		Ok(refresh_token) => CustomerClient::new(refresh_token)?,
		Err(_) => {
			mock_customer_api(&server).await;

			CustomerClient::with_config(
				"demo-refresh-token",
				ClientConfig::builder().base_url(Url::parse(&server.base_url())?).build()?,
			)?
		},
	};

	println!("API alive: {}.", client.is_alive().await?);

	let points = client.get_metering_points(true).await?;
	let ids = points
		.iter()
		.map(|point| point.master_data.metering_point_id.clone())
		.collect::<Vec<_>>();

	println!("Linked metering points: {ids:?}.");

	if ids.is_empty() {
		return Ok(());
	}

	let documents = client
		.get_time_series(
			ids,
			macros::date!(2026 - 01 - 01),
			macros::date!(2026 - 01 - 02),
			Aggregation::Hour,
		)
		.await?;

	for series in documents.iter().flat_map(|document| &document.time_series) {
		let unit = series.measurement_unit.as_deref().unwrap_or("?");

		for point in series.periods.iter().flat_map(|period| &period.points) {
			println!("{} #{}: {} {unit}", series.mrid, point.position, point.quantity);
		}
	}

	println!("Refreshes performed: {}.", client.metrics().refresh_successes());

	client.close();

	Ok(())
}

async fn mock_customer_api(server: &MockServer) {
	let jwt = jwt_expiring_in(Duration::hours(24));

	server
		.mock_async(|when, then| {
			when.method(GET).path("/customerapi/api/token");
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "result": jwt }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/customerapi/api/isalive");
			then.status(200).header("content-type", "application/json").body("true");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/customerapi/api/meteringpoints/meteringpoints");
			then.status(200).header("content-type", "application/json").json_body(json!({
				"result": [{ "meteringPointId": "571313174115776424", "typeOfMP": "E17" }]
			}));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/customerapi/api/meterdata/gettimeseries/2026-01-01/2026-01-02/Hour");
			then.status(200).header("content-type", "application/json").json_body(json!({
				"result": [{
					"MyEnergyData_MarketDocument": {
						"mRID": "demo-document",
						"TimeSeries": [{
							"mRID": "571313174115776424",
							"measurement_Unit.name": "KWH",
							"Period": [{
								"resolution": "PT1H",
								"Point": [
									{ "position": "1", "out_Quantity.quantity": "0.42", "out_Quantity.quality": "A04" },
									{ "position": "2", "out_Quantity.quantity": "0.38", "out_Quantity.quality": "A04" }
								]
							}]
						}]
					},
					"success": true,
					"errorCode": 10000
				}]
			}));
		})
		.await;
}
