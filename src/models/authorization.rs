//! Authorizations (powers of attorney) granted to a third party.

// self
use crate::_prelude::*;

/// One active authorization.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorization {
	/// Authorization identifier, usable as an [`AuthorizationScope::AuthorizationId`] value.
	///
	/// [`AuthorizationScope::AuthorizationId`]: crate::models::AuthorizationScope::AuthorizationId
	pub id: String,
	/// Name of the authorized third party.
	pub third_party_name: Option<String>,
	/// Start of the authorization.
	pub valid_from: Option<String>,
	/// End of the authorization.
	pub valid_to: Option<String>,
	/// Granting customer.
	pub customer_name: Option<String>,
	/// Granting customer's CVR.
	#[serde(rename = "customerCVR")]
	pub customer_cvr: Option<String>,
	/// Opaque customer key.
	pub customer_key: Option<String>,
	/// Whether metering points added later are covered.
	#[serde(default)]
	pub include_future_metering_points: bool,
	/// Timestamp of the grant.
	pub time_stamp: Option<String>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn authorization_decodes_with_defaults() {
		let authorization: Authorization = serde_json::from_value(serde_json::json!({
			"id": "b7c2f7e4-0000-4000-8000-000000000001",
			"thirdPartyName": "Meter Insights ApS",
			"customerCVR": "12345678",
			"timeStamp": "2026-01-02T10:00:00"
		}))
		.expect("Authorization should decode.");

		assert_eq!(authorization.customer_cvr.as_deref(), Some("12345678"));
		assert!(!authorization.include_future_metering_points);
		assert!(
			serde_json::from_value::<Authorization>(serde_json::json!({ "id": 42 })).is_err()
		);
	}
}
