//! Typed response and request shapes.
//!
//! Decoding is strict about the fields each shape requires (identifiers, reading positions, and
//! quantities) and about field types everywhere; unknown fields are ignored so additive upstream
//! changes do not break callers. Lists that upstream sends as `null` decode as empty.

pub mod authorization;
pub mod charge;
pub mod envelope;
pub mod metering_point;
pub mod query;
pub mod time_series;

pub use authorization::*;
pub use charge::*;
pub use envelope::*;
pub use metering_point::*;
pub use query::*;
pub use time_series::*;

// crates.io
use serde::Deserializer;
// self
use crate::_prelude::*;

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
