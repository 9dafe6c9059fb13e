//! Forward-compatible decoding of discriminated JSON payloads.
//!
//! CSP connections and MVE vendor configs arrive as JSON objects whose shape is chosen by a
//! string discriminator (`connectType`, `vendor`). [`decode_variants`] accepts a single object, an
//! array of objects, or nothing at all, and dispatches every object on its discriminator:
//!
//! - a known tag decodes into its concrete variant; mistyped fields abort the whole decode with
//!   [`DecodeError::Variant`];
//! - an unknown, missing, or non-string tag keeps the object verbatim in the opaque variant, so
//!   providers added to the API after this crate's release never break decoding;
//! - array elements that are not objects abort with [`DecodeError::UnexpectedShape`].

pub mod absent;
pub mod csp;
pub mod resources;
pub mod vendor;

pub use absent::*;
pub use csp::*;
pub use resources::*;
pub use vendor::*;

// self
use crate::{
	_prelude::*,
	error::{DecodeError, PathError},
	obs,
};

/// Sum type selected at runtime by a string discriminator field.
pub trait TaggedVariant: Sized {
	/// Known discriminator vocabulary.
	type Kind: Copy;

	/// Name of the discriminator field (for example `connectType`).
	const DISCRIMINATOR: &'static str;

	/// Resolves a discriminator value; matching is exact and case-sensitive.
	fn kind(tag: &str) -> Option<Self::Kind>;

	/// Decodes `object` as the variant of `kind`.
	fn decode_kind(kind: Self::Kind, object: Map<String, Value>) -> Result<Self, PathError>;

	/// Wraps an object whose discriminator is not recognized.
	fn opaque(object: Map<String, Value>) -> Self;
}

/// Decodes raw bytes into an ordered sequence of variants.
///
/// Empty input and `null` both yield an empty sequence.
pub fn decode_variants<T>(raw: &[u8]) -> Result<Vec<T>, DecodeError>
where
	T: TaggedVariant,
{
	if raw.trim_ascii().is_empty() {
		return Ok(Vec::new());
	}

	decode_variant_value(decode_json::<Value>(raw)?)
}

/// Decodes an already parsed JSON value into an ordered sequence of variants.
pub fn decode_variant_value<T>(value: Value) -> Result<Vec<T>, DecodeError>
where
	T: TaggedVariant,
{
	match value {
		Value::Null => Ok(Vec::new()),
		Value::Object(object) => Ok(vec![decode_object(object, None)?]),
		Value::Array(items) => items
			.into_iter()
			.enumerate()
			.map(|(index, item)| match item {
				Value::Object(object) => decode_object(object, Some(index)),
				other => Err(DecodeError::UnexpectedShape {
					index: Some(index),
					found: json_type(&other),
				}),
			})
			.collect(),
		other => Err(DecodeError::UnexpectedShape { index: None, found: json_type(&other) }),
	}
}

/// Decodes a single JSON object, dispatching on its discriminator.
pub fn decode_object<T>(object: Map<String, Value>, index: Option<usize>) -> Result<T, DecodeError>
where
	T: TaggedVariant,
{
	let tag = object.get(T::DISCRIMINATOR).and_then(Value::as_str);

	match tag.and_then(T::kind) {
		Some(kind) => {
			let tag = tag.unwrap_or_default().to_owned();

			T::decode_kind(kind, object).map_err(|source| DecodeError::Variant { tag, index, source })
		},
		None => {
			obs::trace_decode_fallback(T::DISCRIMINATOR, tag);
			obs::record_decode_fallback(T::DISCRIMINATOR);

			Ok(T::opaque(object))
		},
	}
}

/// Decodes `raw` into `T`, reporting the JSON path of any mismatch.
pub fn decode_json<T>(raw: &[u8]) -> Result<T, DecodeError>
where
	T: DeserializeOwned,
{
	let mut de = serde_json::Deserializer::from_slice(raw);
	let value = serde_path_to_error::deserialize(&mut de)?;

	de.end().map_err(DecodeError::Syntax)?;

	Ok(value)
}

/// Decodes a variant's fields from its object.
pub(crate) fn decode_fields<V>(object: Map<String, Value>) -> Result<V, PathError>
where
	V: DeserializeOwned,
{
	serde_path_to_error::deserialize(Value::Object(object))
}

/// Serializes `fields` and places `tag` under `discriminator` as the first key.
pub(crate) fn tagged_object<V>(
	discriminator: &'static str,
	tag: &'static str,
	fields: &V,
) -> Result<Map<String, Value>, serde_json::Error>
where
	V: Serialize,
{
	let mut object = Map::new();

	object.insert(discriminator.into(), Value::String(tag.into()));

	if let Value::Object(rest) = serde_json::to_value(fields)? {
		for (key, value) in rest {
			if key != discriminator {
				object.insert(key, value);
			}
		}
	}

	Ok(object)
}

pub(crate) const fn json_type(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}
