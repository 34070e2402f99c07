//! Subscriptions, tariffs, and fees linked to a metering point.

// self
use crate::_prelude::*;

/// Terms common to every charge kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeTerms {
	/// Charge name.
	pub name: Option<String>,
	/// Charge description.
	pub description: Option<String>,
	/// Charge owner (usually the grid operator).
	pub owner: Option<String>,
	/// First day the charge applies.
	pub valid_from_date: Option<String>,
	/// Last day the charge applies, if bounded.
	pub valid_to_date: Option<String>,
	/// Billing period (`P1M`, `P1D`, ...).
	pub period_type: Option<String>,
}

/// Subscription or fee with a flat price.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Charge {
	/// Common terms.
	#[serde(flatten)]
	pub terms: ChargeTerms,
	/// Price per period.
	pub price: Option<f64>,
	/// Number of units charged.
	pub quantity: Option<i64>,
}

/// One position of a tariff's price curve.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TariffPrice {
	/// Position inside the period, as sent.
	pub position: Option<String>,
	/// Price at this position.
	pub price: Option<f64>,
}

/// Tariff with a positional price curve.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Tariff {
	/// Common terms.
	#[serde(flatten)]
	pub terms: ChargeTerms,
	/// Price curve.
	#[serde(default, deserialize_with = "crate::models::null_as_default")]
	pub prices: Vec<TariffPrice>,
}

/// All charges for one metering point.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeteringPointCharges {
	/// GSRN the charges belong to.
	pub metering_point_id: String,
	/// Subscriptions.
	#[serde(default, deserialize_with = "crate::models::null_as_default")]
	pub subscriptions: Vec<Charge>,
	/// Tariffs.
	#[serde(default, deserialize_with = "crate::models::null_as_default")]
	pub tariffs: Vec<Tariff>,
	/// Fees.
	#[serde(default, deserialize_with = "crate::models::null_as_default")]
	pub fees: Vec<Charge>,
}
