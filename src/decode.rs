//! Strict decoding of raw response bodies into typed models.
//!
//! Every function here is a pure transform: either the whole payload matches the target shape or
//! the call fails. Validation failures carry the JSON path of the first mismatch plus a bounded
//! preview of the payload.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	error::{ApiError, ValidationError},
	http::RawResponse,
	models::{BatchItem, Envelope, EnvelopeStatus},
};

const PREVIEW_CHARS: usize = 512;

/// Decodes `body` into `T`, reporting the failing path on mismatch.
pub fn decode<T>(body: &[u8]) -> Result<T, ValidationError>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer).map_err(|source| ValidationError {
		target: std::any::type_name::<T>(),
		preview: preview(body),
		source,
	})
}

/// Fails with [`ApiError::Rejected`] when a `2xx` body reports `success: false`.
///
/// Bodies that are not envelopes (bare booleans, arrays, CSV) pass through untouched.
pub fn ensure_accepted(response: &RawResponse) -> Result<(), ApiError> {
	let Ok(status) = serde_json::from_slice::<EnvelopeStatus>(&response.body) else {
		return Ok(());
	};

	if status.is_rejected() {
		return Err(ApiError::Rejected {
			status: response.status,
			error_code: status.error_code,
			error_text: status.error_text,
			body: response.text().into_owned(),
		});
	}

	Ok(())
}

/// Checks the envelope status, then decodes its mandatory `result`.
pub fn decode_envelope<T>(response: &RawResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	ensure_accepted(response)?;

	let Envelope { result } = decode::<Envelope<T>>(&response.body)?;

	Ok(result)
}

/// Decodes a batch envelope and keeps the payload of every item.
///
/// A failing item fails the whole call; successful items without a payload are skipped.
pub fn decode_batch<I>(response: &RawResponse) -> Result<Vec<I::Output>>
where
	I: BatchItem + DeserializeOwned,
{
	let items = decode_envelope::<Vec<I>>(response)?;
	let mut outputs = Vec::with_capacity(items.len());

	for item in items {
		if let Some(failure) = item.failure() {
			return Err(ApiError::Rejected {
				status: response.status,
				error_code: failure.error_code,
				error_text: failure.error_text,
				body: response.text().into_owned(),
			}
			.into());
		}
		if let Some(output) = item.into_output() {
			outputs.push(output);
		}
	}

	Ok(outputs)
}

fn preview(body: &[u8]) -> String {
	let text = String::from_utf8_lossy(body);

	match text.char_indices().nth(PREVIEW_CHARS) {
		Some((cut, _)) => format!("{}…", &text[..cut]),
		None => text.into_owned(),
	}
}
