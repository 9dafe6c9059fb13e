//! Typed fragments of VXC resource payloads and the response envelope.

// self
use crate::{
	_prelude::*,
	decode::{CspConnections, absent},
};

/// Standard Megaport response wrapper.
///
/// `data` is required; use `Option<T>` for endpoints that may omit it.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ApiEnvelope<T> {
	/// Human-readable status message.
	#[serde(default)]
	pub message: String,
	/// Terms-of-service notice attached by the API.
	#[serde(default)]
	pub terms: String,
	/// Response payload.
	pub data: T,
}

/// The `resources` block of a VXC.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VxcResources {
	/// Attached CSP connections, in API order.
	pub csp_connection: CspConnections,
	/// VLL settings; the API reports a missing block as `[]`.
	#[serde(deserialize_with = "absent::deserialize_absent", skip_serializing_if = "Option::is_none")]
	pub vll: Option<VllConfig>,
}

/// Point-to-point VLL settings of a VXC.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct VllConfig {
	/// VLAN on the A end.
	pub a_vlan: i32,
	/// VLAN on the B end.
	pub b_vlan: i32,
	/// Free-form description.
	pub description: String,
	/// VLL ID.
	pub id: u64,
	/// VLL name.
	pub name: String,
	/// Rate limit in Mbps.
	pub rate_limit_mbps: u32,
	/// Resource name assigned by Megaport.
	pub resource_name: String,
	/// Resource type assigned by Megaport.
	pub resource_type: String,
	/// Whether the VLL is administratively down.
	pub shutdown: bool,
}
