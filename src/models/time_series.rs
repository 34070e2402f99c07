//! Market documents carrying metered readings.

// self
use crate::{
	_prelude::*,
	models::{BatchItem, ItemFailure},
};

/// One reading inside a period.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Point {
	/// Position inside the period (1-based), as sent.
	pub position: String,
	/// Metered quantity, as sent; never reformatted.
	#[serde(rename = "out_Quantity.quantity")]
	pub quantity: String,
	/// Quality code (`A04` measured, `A03` estimated, ...).
	#[serde(rename = "out_Quantity.quality")]
	pub quality: Option<String>,
}

/// Start and end of a period.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TimeInterval {
	/// Inclusive start.
	pub start: Option<String>,
	/// Exclusive end.
	pub end: Option<String>,
}

/// Contiguous run of readings at one resolution.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
	/// ISO 8601 resolution (`PT1H`, `P1D`, ...).
	pub resolution: Option<String>,
	/// Covered interval.
	pub time_interval: Option<TimeInterval>,
	/// Readings.
	#[serde(rename = "Point", default, deserialize_with = "crate::models::null_as_default")]
	pub points: Vec<Point>,
}

/// Metering point reference inside a time series.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketEvaluationPointId {
	/// Coding scheme of the identifier.
	pub coding_scheme: Option<String>,
	/// GSRN.
	pub name: Option<String>,
}

/// Wrapper around the metering point reference.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MarketEvaluationPoint {
	/// Identifier block.
	#[serde(rename = "mRID")]
	pub mrid: Option<MarketEvaluationPointId>,
}

/// Series of periods for one metering point.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
	/// Series identifier (the GSRN).
	#[serde(rename = "mRID")]
	pub mrid: String,
	/// Business type code.
	pub business_type: Option<String>,
	/// Curve type code.
	pub curve_type: Option<String>,
	/// Unit of every quantity in the series (`KWH`, ...).
	#[serde(rename = "measurement_Unit.name")]
	pub measurement_unit: Option<String>,
	/// Periods.
	#[serde(rename = "Period", default, deserialize_with = "crate::models::null_as_default")]
	pub periods: Vec<Period>,
	/// Metering point reference.
	#[serde(rename = "MarketEvaluationPoint")]
	pub market_evaluation_point: Option<MarketEvaluationPoint>,
}

/// Market document returned per requested metering point.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketDocument {
	/// Document identifier.
	#[serde(rename = "mRID")]
	pub mrid: String,
	/// Creation timestamp, as sent.
	pub created_date_time: Option<String>,
	/// Sending market participant.
	#[serde(rename = "sender_MarketParticipant.name")]
	pub sender_name: Option<String>,
	/// Series contained in the document.
	#[serde(rename = "TimeSeries", default, deserialize_with = "crate::models::null_as_default")]
	pub time_series: Vec<TimeSeries>,
}

/// Batch item of a time-series response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesItem {
	/// Document for the requested metering point.
	#[serde(rename = "MyEnergyData_MarketDocument")]
	pub document: Option<MarketDocument>,
	/// Item status; absent on older responses.
	pub success: Option<bool>,
	/// Upstream error code.
	pub error_code: Option<i64>,
	/// Upstream error description.
	pub error_text: Option<String>,
	/// Requested metering point.
	pub id: Option<String>,
}
impl BatchItem for TimeSeriesItem {
	type Output = MarketDocument;

	fn failure(&self) -> Option<ItemFailure> {
		(self.success == Some(false)).then(|| ItemFailure {
			error_code: self.error_code,
			error_text: self.error_text.clone(),
		})
	}

	fn into_output(self) -> Option<MarketDocument> {
		self.document
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn document_preserves_readings_verbatim() {
		let item: TimeSeriesItem = serde_json::from_value(serde_json::json!({
			"MyEnergyData_MarketDocument": {
				"mRID": "doc-1",
				"createdDateTime": "2026-01-05T08:00:00Z",
				"sender_MarketParticipant.name": "",
				"TimeSeries": [{
					"mRID": "mp-1",
					"businessType": "A04",
					"curveType": "A01",
					"measurement_Unit.name": "KWH",
					"MarketEvaluationPoint": { "mRID": { "codingScheme": "A10", "name": "mp-1" } },
					"Period": [{
						"resolution": "PT1H",
						"timeInterval": { "start": "2025-12-31T23:00:00Z", "end": "2026-01-01T23:00:00Z" },
						"Point": [
							{ "position": "1", "out_Quantity.quantity": "0.250", "out_Quantity.quality": "A04" }
						]
					}]
				}]
			},
			"success": true,
			"errorCode": 10000,
			"id": "mp-1"
		}))
		.expect("Time series item should decode.");

		assert_eq!(item.failure(), None);

		let document = item.into_output().expect("Document should be present.");
		let series = &document.time_series[0];
		let point = &series.periods[0].points[0];

		assert_eq!(series.measurement_unit.as_deref(), Some("KWH"));
		assert_eq!(point.position, "1");
		assert_eq!(point.quantity, "0.250");
		assert_eq!(point.quality.as_deref(), Some("A04"));
		assert_eq!(
			series
				.market_evaluation_point
				.as_ref()
				.and_then(|point| point.mrid.as_ref())
				.and_then(|mrid| mrid.name.as_deref()),
			Some("mp-1")
		);
	}

	#[test]
	fn point_without_quantity_is_rejected() {
		let result = serde_json::from_value::<Point>(serde_json::json!({ "position": "1" }));

		assert!(result.is_err());
	}
}
