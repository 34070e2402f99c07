//! Walks a third-party application's authorizations and fetches details for every metering point
//! each one grants, using a seeded access token to skip the first token exchange.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use eloverblik::{
	ThirdPartyClient,
	_preludet::{Duration, jwt_expiring_in},
	auth::AccessToken,
	config::ClientConfig,
	models::AuthorizationScope,
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let jwt = jwt_expiring_in(Duration::hours(24));
	let token_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/thirdpartyapi/api/token");
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "result": jwt_expiring_in(Duration::hours(24)) }));
		})
		.await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/thirdpartyapi/api/authorization/authorizations");
			then.status(200).header("content-type", "application/json").json_body(json!({
				"result": [{ "id": "demo-authorization", "customerName": "Demo Customer" }]
			}));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path(
				"/thirdpartyapi/api/authorization/authorization/meteringpointids/authorizationId/demo-authorization",
			);
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "result": ["571313174115776424"] }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/thirdpartyapi/api/meteringpoint/getdetails");
			then.status(200).header("content-type", "application/json").json_body(json!({
				"result": [{
					"success": true,
					"errorCode": 10000,
					"result": {
						"meteringPointId": "571313174115776424",
						"typeOfMP": "E17",
						"gridOperatorName": "Demo Net A/S"
					}
				}]
			}));
		})
		.await;

	let client = ThirdPartyClient::with_config(
		"demo-refresh-token",
		ClientConfig::builder().base_url(Url::parse(&server.base_url())?).build()?,
	)?
	.with_access_token(AccessToken::from_jwt(jwt));

	for authorization in client.get_authorizations().await? {
		let ids = client
			.get_metering_point_ids(AuthorizationScope::AuthorizationId, &authorization.id)
			.await?;

		if ids.is_empty() {
			continue;
		}

		for detail in client.get_details(ids).await? {
			println!(
				"{} ({}): {} operated by {}.",
				authorization.customer_name.as_deref().unwrap_or("unknown customer"),
				authorization.id,
				detail.master_data.metering_point_id,
				detail.grid_operator_name.as_deref().unwrap_or("unknown operator"),
			);
		}
	}

	token_mock.assert_calls_async(0).await;
	client.close();

	Ok(())
}
