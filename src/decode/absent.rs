//! The API writes `[]` instead of `null` for some missing object facets (the VLL block of a VXC
//! is the known case). Every such facet goes through the helpers below so that `[]`, `null`, and
//! empty input all mean "absent" and never a zero-valued struct.

// serde
use serde::{Deserializer, de::Error as _};
// self
use crate::{_prelude::*, decode, error::DecodeError};

/// Returns `true` for the values the API uses to mean "no such facet".
pub fn is_absent(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::Array(items) => items.is_empty(),
		_ => false,
	}
}

/// Decodes a facet from raw bytes, mapping the absent sentinels to `None`.
pub fn decode_facet<T>(raw: &[u8]) -> Result<Option<T>, DecodeError>
where
	T: DeserializeOwned,
{
	if raw.trim_ascii().is_empty() {
		return Ok(None);
	}

	decode_facet_value(decode::decode_json::<Value>(raw)?)
}

/// Decodes a facet from an already parsed value, mapping the absent sentinels to `None`.
pub fn decode_facet_value<T>(value: Value) -> Result<Option<T>, DecodeError>
where
	T: DeserializeOwned,
{
	if is_absent(&value) {
		return Ok(None);
	}

	Ok(Some(serde_path_to_error::deserialize(value)?))
}

/// `deserialize_with` adapter for `Option<T>` fields that may arrive as `[]`.
///
/// Pair it with `#[serde(default)]` so a missing key is also absent.
pub fn deserialize_absent<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
	D: Deserializer<'de>,
	T: DeserializeOwned,
{
	let value = Value::deserialize(deserializer)?;

	decode_facet_value(value).map_err(D::Error::custom)
}
