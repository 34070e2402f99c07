//! Request-side shapes: aggregation levels, authorization scopes, and id batches.

// self
use crate::{_prelude::*, error::ConfigError};

/// Granularity of time-series readings, used verbatim in the request path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Aggregation {
	/// Readings at the meter's native resolution.
	Actual,
	/// 15-minute buckets.
	Quarter,
	#[default]
	/// Hourly buckets.
	Hour,
	/// Daily buckets.
	Day,
	/// Monthly buckets.
	Month,
	/// Yearly buckets.
	Year,
}
impl Aggregation {
	/// Path segment for this aggregation.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Actual => "Actual",
			Self::Quarter => "Quarter",
			Self::Hour => "Hour",
			Self::Day => "Day",
			Self::Month => "Month",
			Self::Year => "Year",
		}
	}
}
impl Display for Aggregation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Aggregation {
	type Err = UnknownAggregation;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		[Self::Actual, Self::Quarter, Self::Hour, Self::Day, Self::Month, Self::Year]
			.into_iter()
			.find(|aggregation| aggregation.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| UnknownAggregation(s.to_owned()))
	}
}

/// Error returned when parsing an unknown aggregation name.
#[derive(Debug, PartialEq, Eq, ThisError)]
#[error("Unknown aggregation `{0}`; expected Actual, Quarter, Hour, Day, Month, or Year.")]
pub struct UnknownAggregation(pub String);

/// How a third party addresses the customer whose metering points it reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthorizationScope {
	/// By authorization identifier.
	#[serde(rename = "authorizationId")]
	AuthorizationId,
	/// By the customer's CVR number.
	#[serde(rename = "customerCVR")]
	CustomerCvr,
	/// By the opaque customer key.
	#[serde(rename = "customerKey")]
	CustomerKey,
}
impl AuthorizationScope {
	/// Path segment for this scope.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::AuthorizationId => "authorizationId",
			Self::CustomerCvr => "customerCVR",
			Self::CustomerKey => "customerKey",
		}
	}
}
impl Display for AuthorizationScope {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Request body naming a batch of metering points.
///
/// Serializes as `{"meteringPoints":{"meteringPoint":[...]}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeteringPointIds {
	metering_points: MeteringPointList,
}
impl MeteringPointIds {
	/// Collects ids into a batch; an empty batch is rejected before any I/O.
	pub fn new<I, S>(ids: I) -> Result<Self, ConfigError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let metering_point = ids.into_iter().map(Into::into).collect::<Vec<_>>();

		if metering_point.is_empty() {
			return Err(ConfigError::EmptyMeteringPoints);
		}

		Ok(Self { metering_points: MeteringPointList { metering_point } })
	}

	/// Ids in request order.
	pub fn ids(&self) -> &[String] {
		&self.metering_points.metering_point
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct MeteringPointList {
	metering_point: Vec<String>,
}

/// Inclusive date range for time-series queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
	from: Date,
	to: Date,
}
impl DateRange {
	/// Builds a range, rejecting one that ends before it starts.
	pub fn new(from: Date, to: Date) -> Result<Self, ConfigError> {
		if from > to {
			return Err(ConfigError::InvalidDateRange { from, to });
		}

		Ok(Self { from, to })
	}

	/// First day.
	pub fn start(&self) -> Date {
		self.from
	}

	/// Last day.
	pub fn end(&self) -> Date {
		self.to
	}

	/// `YYYY-MM-DD` path segments for both ends.
	pub fn segments(&self) -> [String; 2] {
		[self.from.to_string(), self.to.to_string()]
	}
}
