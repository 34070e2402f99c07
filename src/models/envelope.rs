//! Response envelopes wrapping most payloads.

// self
use crate::_prelude::*;

/// Status block shared by every envelope.
///
/// Fields are optional so the block can be probed on any JSON body before the full decode.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeStatus {
	/// `false` when the API rejected the call despite a `2xx` status.
	pub success: Option<bool>,
	/// Upstream error code; `0` or absent on success.
	pub error_code: Option<i64>,
	/// Upstream error description.
	pub error_text: Option<String>,
}
impl EnvelopeStatus {
	/// Returns `true` only when the body explicitly reports `success: false`.
	pub fn is_rejected(&self) -> bool {
		self.success == Some(false)
	}
}

/// Top-level envelope whose `result` must be present.
#[derive(Clone, Debug, Deserialize)]
pub struct Envelope<T> {
	/// Wrapped payload.
	pub result: T,
}

/// Per-item response used by batch endpoints and relation management.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
	/// Whether this item succeeded.
	pub success: bool,
	/// Upstream error code (`10000` means no error).
	pub error_code: i64,
	/// Upstream error description.
	pub error_text: Option<String>,
	/// Identifier the item refers to, usually a metering point.
	pub id: Option<String>,
	/// Server-side stack trace, occasionally present on failures.
	pub stack_trace: Option<String>,
	/// Item payload; absent or `null` on failures.
	pub result: Option<T>,
}

/// Outcome of deleting a metering point relation.
///
/// The API reports the outcome in `result`, not `success`; use [`is_deleted`](Self::is_deleted).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRelationResponse {
	/// `true` when the relation was removed.
	pub result: bool,
	/// Upstream error code.
	pub error_code: Option<i64>,
	/// Upstream error description.
	pub error_text: Option<String>,
	/// Identifier the response refers to.
	pub id: Option<String>,
}
impl DeleteRelationResponse {
	/// Returns the decoded `result` flag.
	pub fn is_deleted(&self) -> bool {
		self.result
	}
}

/// Health check body: either a bare boolean or an envelope around one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AliveResponse {
	/// `true` / `false`.
	Bare(bool),
	/// `{"result": true}`.
	Wrapped {
		/// Health flag.
		result: bool,
	},
}
impl AliveResponse {
	/// Health flag regardless of shape.
	pub fn is_alive(self) -> bool {
		match self {
			Self::Bare(alive) | Self::Wrapped { result: alive } => alive,
		}
	}
}

/// Failure reported by one item of a batch response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemFailure {
	/// Upstream error code.
	pub error_code: Option<i64>,
	/// Upstream error description.
	pub error_text: Option<String>,
}

/// Item of a batch response that either fails, carries a payload, or carries nothing.
pub trait BatchItem {
	/// Payload extracted from a successful item.
	type Output;

	/// Returns the failure this item reports, if any.
	fn failure(&self) -> Option<ItemFailure>;

	/// Consumes the item, yielding its payload when present.
	fn into_output(self) -> Option<Self::Output>;
}
impl<T> BatchItem for ApiResponse<T> {
	type Output = T;

	fn failure(&self) -> Option<ItemFailure> {
		(!self.success).then(|| ItemFailure {
			error_code: Some(self.error_code),
			error_text: self.error_text.clone(),
		})
	}

	fn into_output(self) -> Option<T> {
		self.result
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn delete_relation_reads_result_not_success() {
		let deleted: DeleteRelationResponse = serde_json::from_value(serde_json::json!({
			"result": true,
			"success": false,
			"errorCode": 10000
		}))
		.expect("Body should decode.");
		let kept: DeleteRelationResponse =
			serde_json::from_value(serde_json::json!({ "result": false }))
				.expect("Body should decode.");

		assert!(deleted.is_deleted());
		assert!(!kept.is_deleted());
		assert!(
			serde_json::from_value::<DeleteRelationResponse>(serde_json::json!({ "success": true }))
				.is_err()
		);
	}

	#[test]
	fn alive_accepts_both_shapes() {
		let bare: AliveResponse = serde_json::from_str("true").expect("Bare flag should decode.");
		let wrapped: AliveResponse =
			serde_json::from_str(r#"{"result":false}"#).expect("Envelope should decode.");

		assert!(bare.is_alive());
		assert!(!wrapped.is_alive());
	}

	#[test]
	fn api_response_reports_item_failures() {
		let failed: ApiResponse<String> = serde_json::from_value(serde_json::json!({
			"success": false,
			"errorCode": 20013,
			"errorText": "NoCprConsent",
			"id": "571313100000000000",
			"result": null
		}))
		.expect("Item should decode.");

		assert_eq!(
			failed.failure(),
			Some(ItemFailure { error_code: Some(20013), error_text: Some("NoCprConsent".into()) })
		);
		assert_eq!(failed.into_output(), None);
	}
}
