// crates.io
use httpmock::prelude::*;
use serde_json::json;
use time::macros;
// self
use eloverblik::{
	_preludet::*,
	error::{ApiError, ConfigError},
	models::Aggregation,
};

const TOKEN_PATH: &str = "/customerapi/api/token";

async fn mock_token<'a>(server: &'a MockServer, jwt: &str) -> httpmock::Mock<'a> {
	server
		.mock_async(|when, then| {
			when.method(GET)
				.path(TOKEN_PATH)
				.header("authorization", format!("Bearer {TEST_REFRESH_TOKEN}"));
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "result": jwt, "success": true, "errorCode": 10000 }));
		})
		.await
}

#[tokio::test]
async fn metering_points_use_lazy_token_and_query_flag() {
	let server = MockServer::start_async().await;
	let jwt = jwt_expiring_in(Duration::hours(1));
	let token = mock_token(&server, &jwt).await;
	let points = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/customerapi/api/meteringpoints/meteringpoints")
				.query_param("includeAll", "true")
				.header("authorization", format!("Bearer {jwt}"))
				.header("accept", "application/json");
			then.status(200).header("content-type", "application/json").json_body(json!({
				"result": [
					{ "meteringPointId": "571313174115776424", "typeOfMP": "E17", "hasRelation": true },
					{ "meteringPointId": "571313174115776431", "streetName": "Vestergade" }
				]
			}));
		})
		.await;
	let client = test_customer_client(&server.base_url());
	let first = client.get_metering_points(true).await.expect("Listing should succeed.");
	let second = client.get_metering_points(true).await.expect("Listing should succeed.");

	token.assert_calls_async(1).await;
	points.assert_calls_async(2).await;

	assert_eq!(first, second);
	assert_eq!(first.len(), 2);
	assert!(first[0].has_relation);
	assert!(!first[1].has_relation);
	assert_eq!(first[1].master_data.street_name.as_deref(), Some("Vestergade"));
}

#[tokio::test]
async fn time_series_round_trip_preserves_readings() {
	let server = MockServer::start_async().await;
	let jwt = jwt_expiring_in(Duration::hours(1));
	let _token = mock_token(&server, &jwt).await;
	let series = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/customerapi/api/meterdata/gettimeseries/2026-01-01/2026-01-04/Hour")
				.json_body(json!({ "meteringPoints": { "meteringPoint": ["mp-1"] } }));
			then.status(200).header("content-type", "application/json").json_body(json!({
				"result": [{
					"MyEnergyData_MarketDocument": {
						"mRID": "doc-1",
						"createdDateTime": "2026-01-05T08:00:00Z",
						"TimeSeries": [{
							"mRID": "mp-1",
							"measurement_Unit.name": "KWH",
							"Period": [{
								"resolution": "PT1H",
								"timeInterval": {
									"start": "2025-12-31T23:00:00Z",
									"end": "2026-01-01T23:00:00Z"
								},
								"Point": [
									{ "position": "1", "out_Quantity.quantity": "0.250", "out_Quantity.quality": "A04" },
									{ "position": "2", "out_Quantity.quantity": "1.070", "out_Quantity.quality": "A04" }
								]
							}]
						}]
					},
					"success": true,
					"errorCode": 10000,
					"id": "mp-1"
				}]
			}));
		})
		.await;
	let client = test_customer_client(&server.base_url());
	let documents = client
		.get_time_series(
			["mp-1"],
			macros::date!(2026 - 01 - 01),
			macros::date!(2026 - 01 - 04),
			Aggregation::Hour,
		)
		.await
		.expect("Time series should decode.");

	series.assert_async().await;

	let series = &documents[0].time_series[0];
	let points = &series.periods[0].points;

	assert_eq!(documents.len(), 1);
	assert_eq!(series.mrid, "mp-1");
	assert_eq!(series.measurement_unit.as_deref(), Some("KWH"));
	assert_eq!(
		points.iter().map(|p| (p.position.as_str(), p.quantity.as_str())).collect::<Vec<_>>(),
		[("1", "0.250"), ("2", "1.070")]
	);
}

#[tokio::test]
async fn delete_relation_branches_on_result() {
	let server = MockServer::start_async().await;
	let jwt = jwt_expiring_in(Duration::hours(1));
	let _token = mock_token(&server, &jwt).await;
	let deleted = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/customerapi/api/meteringpoints/meteringpoint/relation/mp-1");
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "result": true, "success": false }));
		})
		.await;
	let kept = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/customerapi/api/meteringpoints/meteringpoint/relation/mp-2");
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "result": false, "success": true, "errorCode": 10000 }));
		})
		.await;
	let client = test_customer_client(&server.base_url());

	assert!(client.delete_relation("mp-1").await.expect("Delete should decode.").is_deleted());
	assert!(!client.delete_relation("mp-2").await.expect("Delete should decode.").is_deleted());

	deleted.assert_async().await;
	kept.assert_async().await;
}

#[tokio::test]
async fn relations_return_structured_responses() {
	let server = MockServer::start_async().await;
	let jwt = jwt_expiring_in(Duration::hours(1));
	let _token = mock_token(&server, &jwt).await;
	let by_cvr = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/customerapi/api/meteringpoints/meteringpoint/relation/add")
				.json_body(json!({ "meteringPoints": { "meteringPoint": ["mp-1", "mp-2"] } }));
			then.status(200).header("content-type", "application/json").json_body(json!({
				"result": [
					{ "success": true, "errorCode": 10000, "id": "mp-1", "result": "Success" },
					{ "success": false, "errorCode": 20012, "errorText": "NoValidRelation", "id": "mp-2" }
				]
			}));
		})
		.await;
	let by_code = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path("/customerapi/api/meteringpoints/meteringpoint/relation/add/mp-3/web-code");
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "success": true, "errorCode": 10000, "result": "Success" }));
		})
		.await;
	let client = test_customer_client(&server.base_url());
	let responses =
		client.add_relations_by_cvr(["mp-1", "mp-2"]).await.expect("Relations should decode.");
	let single = client.add_relation("mp-3", "web-code").await.expect("Relation should decode.");

	by_cvr.assert_async().await;
	by_code.assert_async().await;

	assert_eq!(responses.len(), 2);
	assert!(responses[0].success);
	assert_eq!(responses[0].result.as_deref(), Some("Success"));
	assert!(!responses[1].success);
	assert_eq!(responses[1].error_text.as_deref(), Some("NoValidRelation"));
	assert_eq!(single.result.as_deref(), Some("Success"));
}

#[tokio::test]
async fn details_and_charges_skip_empty_items() {
	let server = MockServer::start_async().await;
	let jwt = jwt_expiring_in(Duration::hours(1));
	let _token = mock_token(&server, &jwt).await;
	let _details = server
		.mock_async(|when, then| {
			when.method(POST).path("/customerapi/api/meteringpoints/meteringpoint/getdetails");
			then.status(200).header("content-type", "application/json").json_body(json!({
				"result": [
					{ "success": true, "errorCode": 10000, "id": "mp-1", "result": {
						"meteringPointId": "mp-1",
						"gridOperatorName": "Radius Elnet A/S",
						"powerLimitKWDecimal": 25.0
					}},
					{ "success": true, "errorCode": 10000, "id": "mp-2", "result": null }
				]
			}));
		})
		.await;
	let _charges = server
		.mock_async(|when, then| {
			when.method(POST).path("/customerapi/api/meteringpoints/meteringpoint/getcharges");
			then.status(200).header("content-type", "application/json").json_body(json!({
				"result": [
					{ "success": true, "errorCode": 10000, "id": "mp-1", "result": {
						"meteringPointId": "mp-1",
						"tariffs": [{ "name": "Nettarif C", "prices": [{ "position": "1", "price": 0.21 }] }]
					}}
				]
			}));
		})
		.await;
	let client = test_customer_client(&server.base_url());
	let details = client.get_details(["mp-1", "mp-2"]).await.expect("Details should decode.");
	let charges = client.get_charges(vec!["mp-1".to_owned()]).await.expect("Charges should decode.");

	assert_eq!(details.len(), 1);
	assert_eq!(details[0].grid_operator_name.as_deref(), Some("Radius Elnet A/S"));
	assert_eq!(details[0].power_limit_kw_decimal, Some(25.0));
	assert_eq!(charges[0].tariffs[0].prices[0].price, Some(0.21));
}

#[tokio::test]
async fn exports_return_raw_csv() {
	let server = MockServer::start_async().await;
	let jwt = jwt_expiring_in(Duration::hours(1));
	let _token = mock_token(&server, &jwt).await;
	let export = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/customerapi/api/meterdata/timeseries/export/2026-01-01/2026-01-31/Day");
			then.status(200)
				.header("content-type", "text/csv")
				.body("Målepunkt id;Fra dato;Mængde\nmp-1;2026-01-01;12,5\n");
		})
		.await;
	let client = test_customer_client(&server.base_url());
	let csv = client
		.export_time_series(
			["mp-1"],
			macros::date!(2026 - 01 - 01),
			macros::date!(2026 - 01 - 31),
			Aggregation::Day,
		)
		.await
		.expect("Export should succeed.");

	export.assert_async().await;

	assert!(csv.starts_with("Målepunkt id;"));
	assert!(csv.contains("12,5"));
}

#[tokio::test]
async fn malformed_payload_is_a_validation_error() {
	let server = MockServer::start_async().await;
	let jwt = jwt_expiring_in(Duration::hours(1));
	let _token = mock_token(&server, &jwt).await;
	let _points = server
		.mock_async(|when, then| {
			when.method(GET).path("/customerapi/api/meteringpoints/meteringpoints");
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "result": [{ "typeOfMP": "E17" }] }));
		})
		.await;
	let client = test_customer_client(&server.base_url());
	let err = client.get_metering_points(false).await.expect_err("Missing id should fail.");

	match err {
		Error::Validation(err) => {
			assert!(err.path().starts_with("result[0]"));
			assert!(err.preview.contains("E17"));
		},
		other => panic!("Unexpected error: {other:?}"),
	}
}

#[tokio::test]
async fn rejected_envelope_surfaces_upstream_code() {
	let server = MockServer::start_async().await;
	let jwt = jwt_expiring_in(Duration::hours(1));
	let _token = mock_token(&server, &jwt).await;
	let _points = server
		.mock_async(|when, then| {
			when.method(GET).path("/customerapi/api/meteringpoints/meteringpoints");
			then.status(200).header("content-type", "application/json").json_body(json!({
				"success": false,
				"errorCode": 30000,
				"errorText": "InternalServerError",
				"result": null
			}));
		})
		.await;
	let client = test_customer_client(&server.base_url());
	let err = client.get_metering_points(false).await.expect_err("Rejected envelope should fail.");

	assert!(matches!(
		err,
		Error::Api(ApiError::Rejected { status: 200, error_code: Some(30000), .. })
	));
}

#[tokio::test]
async fn invalid_input_fails_before_any_request() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server, &jwt_expiring_in(Duration::hours(1))).await;
	let client = test_customer_client(&server.base_url());

	assert!(matches!(
		client.get_charges(Vec::<String>::new()).await,
		Err(Error::Config(ConfigError::EmptyMeteringPoints))
	));
	assert!(matches!(
		client
			.get_time_series(
				["mp-1"],
				macros::date!(2026 - 01 - 04),
				macros::date!(2026 - 01 - 01),
				Aggregation::Hour
			)
			.await,
		Err(Error::Config(ConfigError::InvalidDateRange { .. }))
	));

	token.assert_calls_async(0).await;
}

#[tokio::test]
async fn blank_relation_ids_fail_before_any_request() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server, &jwt_expiring_in(Duration::hours(1))).await;
	let delete = server
		.mock_async(|when, then| {
			when.method(DELETE);
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "result": true }));
		})
		.await;
	let client = test_customer_client(&server.base_url());

	assert!(matches!(
		client.delete_relation("").await,
		Err(Error::Config(ConfigError::EmptyIdentifier { field: "metering_point_id" }))
	));
	assert!(matches!(
		client.add_relation("571313174115776424", " ").await,
		Err(Error::Config(ConfigError::EmptyIdentifier { field: "web_access_code" }))
	));

	token.assert_calls_async(0).await;
	delete.assert_calls_async(0).await;
}

#[tokio::test]
async fn is_alive_reads_bare_flag() {
	let server = MockServer::start_async().await;
	let jwt = jwt_expiring_in(Duration::hours(1));
	let _token = mock_token(&server, &jwt).await;
	let _alive = server
		.mock_async(|when, then| {
			when.method(GET).path("/customerapi/api/isalive");
			then.status(200).header("content-type", "application/json").body("true");
		})
		.await;
	let client = test_customer_client(&server.base_url());

	assert!(client.is_alive().await.expect("Health check should succeed."));
}
