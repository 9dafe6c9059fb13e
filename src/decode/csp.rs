//! CSP connection payloads discriminated by `connectType`.

// serde
use serde::{Deserializer, Serializer, de::Error as _, ser::Error as _};
// self
use crate::{
	_prelude::*,
	decode::{self, TaggedVariant},
	error::{DecodeError, PathError},
};

/// Known `connectType` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectType {
	/// `AWS` (hosted VIF).
	Aws,
	/// `AWSHC` (hosted connection).
	AwsHosted,
	/// `AZURE` (ExpressRoute).
	Azure,
	/// `GOOGLE` (Partner Interconnect).
	Google,
	/// `ORACLE` (FastConnect).
	Oracle,
	/// `VROUTER`, also reported as `VIRTUAL_ROUTER`.
	VirtualRouter,
	/// `TRANSIT` (internet transit).
	Transit,
	/// `IBM` (Direct Link).
	Ibm,
}
impl ConnectType {
	/// Every known connect type.
	pub const ALL: [Self; 8] = [
		Self::Aws,
		Self::AwsHosted,
		Self::Azure,
		Self::Google,
		Self::Oracle,
		Self::VirtualRouter,
		Self::Transit,
		Self::Ibm,
	];

	/// Canonical tag written when serializing.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Aws => "AWS",
			Self::AwsHosted => "AWSHC",
			Self::Azure => "AZURE",
			Self::Google => "GOOGLE",
			Self::Oracle => "ORACLE",
			Self::VirtualRouter => "VROUTER",
			Self::Transit => "TRANSIT",
			Self::Ibm => "IBM",
		}
	}

	/// Resolves a tag exactly as the API spells it.
	pub fn from_tag(tag: &str) -> Option<Self> {
		match tag {
			"AWS" => Some(Self::Aws),
			"AWSHC" => Some(Self::AwsHosted),
			"AZURE" => Some(Self::Azure),
			"GOOGLE" => Some(Self::Google),
			"ORACLE" => Some(Self::Oracle),
			"VROUTER" | "VIRTUAL_ROUTER" => Some(Self::VirtualRouter),
			"TRANSIT" => Some(Self::Transit),
			"IBM" => Some(Self::Ibm),
			_ => None,
		}
	}
}
impl Display for ConnectType {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// One CSP connection attached to a VXC.
#[derive(Clone, Debug, PartialEq)]
pub enum CspConnection {
	/// AWS hosted VIF.
	Aws(AwsConnection),
	/// AWS hosted connection.
	AwsHosted(AwsHostedConnection),
	/// Azure ExpressRoute.
	Azure(AzureConnection),
	/// Google Partner Interconnect.
	Google(GoogleConnection),
	/// Oracle FastConnect.
	Oracle(OracleConnection),
	/// MCR virtual router.
	VirtualRouter(VirtualRouterConnection),
	/// Internet transit.
	Transit(TransitConnection),
	/// IBM Direct Link.
	Ibm(IbmConnection),
	/// Connection whose `connectType` this crate does not know, kept verbatim.
	Opaque(Map<String, Value>),
}
impl CspConnection {
	/// Concrete connect type, or `None` for opaque connections.
	pub fn connect_type(&self) -> Option<ConnectType> {
		match self {
			Self::Aws(_) => Some(ConnectType::Aws),
			Self::AwsHosted(_) => Some(ConnectType::AwsHosted),
			Self::Azure(_) => Some(ConnectType::Azure),
			Self::Google(_) => Some(ConnectType::Google),
			Self::Oracle(_) => Some(ConnectType::Oracle),
			Self::VirtualRouter(_) => Some(ConnectType::VirtualRouter),
			Self::Transit(_) => Some(ConnectType::Transit),
			Self::Ibm(_) => Some(ConnectType::Ibm),
			Self::Opaque(_) => None,
		}
	}

	/// Discriminator as it will be serialized; opaque connections report whatever they carried.
	pub fn tag(&self) -> Option<&str> {
		match self {
			Self::Opaque(object) =>
				object.get(<Self as TaggedVariant>::DISCRIMINATOR).and_then(Value::as_str),
			other => other.connect_type().map(ConnectType::as_str),
		}
	}

	/// Returns `true` when the connection fell back to the opaque variant.
	pub fn is_opaque(&self) -> bool {
		matches!(self, Self::Opaque(_))
	}

	/// Converts the connection back into its JSON object, discriminator first.
	pub fn to_object(&self) -> Result<Map<String, Value>, serde_json::Error> {
		const KEY: &str = <CspConnection as TaggedVariant>::DISCRIMINATOR;

		match self {
			Self::Aws(fields) => decode::tagged_object(KEY, ConnectType::Aws.as_str(), fields),
			Self::AwsHosted(fields) =>
				decode::tagged_object(KEY, ConnectType::AwsHosted.as_str(), fields),
			Self::Azure(fields) => decode::tagged_object(KEY, ConnectType::Azure.as_str(), fields),
			Self::Google(fields) => decode::tagged_object(KEY, ConnectType::Google.as_str(), fields),
			Self::Oracle(fields) => decode::tagged_object(KEY, ConnectType::Oracle.as_str(), fields),
			Self::VirtualRouter(fields) =>
				decode::tagged_object(KEY, ConnectType::VirtualRouter.as_str(), fields),
			Self::Transit(fields) =>
				decode::tagged_object(KEY, ConnectType::Transit.as_str(), fields),
			Self::Ibm(fields) => decode::tagged_object(KEY, ConnectType::Ibm.as_str(), fields),
			Self::Opaque(object) => Ok(object.clone()),
		}
	}
}
impl TaggedVariant for CspConnection {
	type Kind = ConnectType;

	const DISCRIMINATOR: &'static str = "connectType";

	fn kind(tag: &str) -> Option<Self::Kind> {
		ConnectType::from_tag(tag)
	}

	fn decode_kind(kind: Self::Kind, object: Map<String, Value>) -> Result<Self, PathError> {
		match kind {
			ConnectType::Aws => decode::decode_fields(object).map(Self::Aws),
			ConnectType::AwsHosted => decode::decode_fields(object).map(Self::AwsHosted),
			ConnectType::Azure => decode::decode_fields(object).map(Self::Azure),
			ConnectType::Google => decode::decode_fields(object).map(Self::Google),
			ConnectType::Oracle => decode::decode_fields(object).map(Self::Oracle),
			ConnectType::VirtualRouter => decode::decode_fields(object).map(Self::VirtualRouter),
			ConnectType::Transit => decode::decode_fields(object).map(Self::Transit),
			ConnectType::Ibm => decode::decode_fields(object).map(Self::Ibm),
		}
	}

	fn opaque(object: Map<String, Value>) -> Self {
		Self::Opaque(object)
	}
}
impl Serialize for CspConnection {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		self.to_object().map_err(S::Error::custom)?.serialize(serializer)
	}
}
impl<'de> Deserialize<'de> for CspConnection {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		match Value::deserialize(deserializer)? {
			Value::Object(object) => decode::decode_object(object, None).map_err(D::Error::custom),
			other => Err(D::Error::custom(DecodeError::UnexpectedShape {
				index: None,
				found: decode::json_type(&other),
			})),
		}
	}
}

/// Ordered CSP connections of a VXC.
///
/// The API reports a single connection as a bare object and several as an array; both, plus
/// `null` and a missing key, decode into this sequence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CspConnections(pub Vec<CspConnection>);
impl CspConnections {
	/// Returns the connections as a slice.
	pub fn as_slice(&self) -> &[CspConnection] {
		&self.0
	}

	/// Unwraps the inner vector.
	pub fn into_inner(self) -> Vec<CspConnection> {
		self.0
	}

	/// Iterates over the connections in API order.
	pub fn iter(&self) -> std::slice::Iter<'_, CspConnection> {
		self.0.iter()
	}

	/// Number of connections.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns `true` when no connection is attached.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl From<Vec<CspConnection>> for CspConnections {
	fn from(connections: Vec<CspConnection>) -> Self {
		Self(connections)
	}
}
impl IntoIterator for CspConnections {
	type IntoIter = std::vec::IntoIter<CspConnection>;
	type Item = CspConnection;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}
impl<'a> IntoIterator for &'a CspConnections {
	type IntoIter = std::slice::Iter<'a, CspConnection>;
	type Item = &'a CspConnection;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}
impl Serialize for CspConnections {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		self.0.serialize(serializer)
	}
}
impl<'de> Deserialize<'de> for CspConnections {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let value = Value::deserialize(deserializer)?;

		decode::decode_variant_value(value).map(Self).map_err(D::Error::custom)
	}
}

/// Decodes a raw `csp_connection` payload.
pub fn decode_csp_connections(raw: &[u8]) -> Result<CspConnections, DecodeError> {
	decode::decode_variants(raw).map(CspConnections)
}

/// AWS hosted VIF connection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AwsConnection {
	/// Resource name assigned by Megaport.
	pub resource_name: String,
	/// Resource type assigned by Megaport.
	pub resource_type: String,
	/// VLAN on the Megaport side.
	pub vlan: i32,
	/// AWS account ID.
	pub account: String,
	/// Amazon-side peering address.
	pub amazon_address: String,
	/// Customer ASN.
	pub asn: u32,
	/// BGP authentication key.
	#[serde(rename = "authKey")]
	pub auth_key: String,
	/// Customer-side peering address.
	pub customer_address: String,
	/// Customer IP address as echoed by the API.
	#[serde(rename = "customerIpAddress")]
	pub customer_ip_address: String,
	/// Connection ID.
	pub id: u64,
	/// Connection name.
	pub name: String,
	/// Owner AWS account.
	#[serde(rename = "ownerAccount")]
	pub owner_account: String,
	/// Amazon peer ASN.
	#[serde(rename = "peerAsn")]
	pub peer_asn: u32,
	/// VIF type (`private`, `public`, `transit`).
	#[serde(rename = "type")]
	pub vif_type: String,
	/// Virtual interface ID.
	pub vif_id: String,
}

/// AWS hosted connection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AwsHostedConnection {
	/// Resource name assigned by Megaport.
	pub resource_name: String,
	/// Resource type assigned by Megaport.
	pub resource_type: String,
	/// Provisioned bandwidth in Mbps.
	pub bandwidth: u32,
	/// Connection name.
	pub name: String,
	/// Owner AWS account.
	#[serde(rename = "ownerAccount")]
	pub owner_account: String,
	/// Bandwidths offered for the connection.
	pub bandwidths: Vec<u32>,
	/// AWS connection ID.
	#[serde(rename = "connectionId")]
	pub connection_id: String,
}

/// Azure ExpressRoute connection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AzureConnection {
	/// Resource name assigned by Megaport.
	pub resource_name: String,
	/// Resource type assigned by Megaport.
	pub resource_type: String,
	/// Provisioned bandwidth in Mbps.
	pub bandwidth: u32,
	/// Whether Megaport manages the ExpressRoute circuit.
	pub managed: bool,
	/// Megaport ports used by the circuit.
	pub megaports: Vec<AzureMegaport>,
	/// Services attached to the circuit.
	pub ports: Vec<AzurePort>,
	/// ExpressRoute service key.
	pub service_key: String,
	/// VLAN on the Megaport side.
	pub vlan: i32,
	/// Configured peerings.
	pub peers: Vec<AzurePeer>,
}

/// Megaport port backing an ExpressRoute circuit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AzureMegaport {
	/// Port ID.
	pub port: u64,
	/// `primary` or `secondary`.
	#[serde(rename = "type")]
	pub port_type: String,
	/// VXC ID.
	pub vxc: u64,
}

/// Service attached to an ExpressRoute circuit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AzurePort {
	/// Service ID.
	pub service_id: u64,
	/// `primary` or `secondary`.
	#[serde(rename = "type")]
	pub port_type: String,
	/// VXCs using the service.
	pub vxc_service_ids: Vec<u64>,
}

/// ExpressRoute peering.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AzurePeer {
	/// `private` or `microsoft`.
	#[serde(rename = "type")]
	pub peer_type: String,
	/// Peer ASN.
	pub peer_asn: String,
	/// Primary /30 subnet.
	pub primary_subnet: String,
	/// Secondary /30 subnet.
	pub secondary_subnet: String,
	/// Advertised prefixes.
	pub prefixes: String,
	/// BGP shared key.
	pub shared_key: String,
	/// Peering VLAN.
	pub vlan: i32,
}

/// Google Partner Interconnect connection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GoogleConnection {
	/// Resource name assigned by Megaport.
	pub resource_name: String,
	/// Resource type assigned by Megaport.
	pub resource_type: String,
	/// Provisioned bandwidth in Mbps.
	pub bandwidth: u32,
	/// Bandwidths offered for the connection.
	pub bandwidths: Vec<u32>,
	/// Provider name.
	pub csp_name: String,
	/// Megaport ports used by the connection.
	pub megaports: Vec<CloudMegaport>,
	/// Services attached to the connection.
	pub ports: Vec<CloudPort>,
	/// Partner Interconnect pairing key.
	#[serde(rename = "pairingKey")]
	pub pairing_key: String,
}

/// Oracle FastConnect connection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OracleConnection {
	/// Resource name assigned by Megaport.
	pub resource_name: String,
	/// Resource type assigned by Megaport.
	pub resource_type: String,
	/// Provider name.
	pub csp_name: String,
	/// Provisioned bandwidth in Mbps.
	pub bandwidth: u32,
	/// Megaport ports used by the connection.
	pub megaports: Vec<CloudMegaport>,
	/// Services attached to the connection.
	pub ports: Vec<CloudPort>,
	/// FastConnect virtual circuit OCID.
	#[serde(rename = "virtualCircuitId")]
	pub virtual_circuit_id: String,
}

/// Megaport port backing a Google or Oracle connection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CloudMegaport {
	/// Port ID.
	pub port: u64,
	/// VXC ID.
	pub vxc: u64,
}

/// Service attached to a Google or Oracle connection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CloudPort {
	/// Service ID.
	pub service_id: u64,
	/// VXCs using the service.
	pub vxc_service_ids: Vec<u64>,
}

/// MCR virtual router interface.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct VirtualRouterConnection {
	/// Resource name assigned by Megaport.
	pub resource_name: String,
	/// Resource type assigned by Megaport.
	pub resource_type: String,
	/// VLAN on the router side.
	pub vlan: i32,
	/// Router interfaces.
	pub interfaces: Vec<VirtualRouterInterface>,
	/// Interface addresses as reported on the connection itself.
	pub ip_addresses: Vec<String>,
	/// Router name.
	#[serde(rename = "virtualRouterName")]
	pub virtual_router_name: String,
}

/// Addresses bound to one virtual router interface.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct VirtualRouterInterface {
	/// Interface addresses in CIDR notation.
	#[serde(rename = "ipAddresses")]
	pub ip_addresses: Vec<String>,
}

/// Internet transit connection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TransitConnection {
	/// Resource name assigned by Megaport.
	pub resource_name: String,
	/// Resource type assigned by Megaport.
	pub resource_type: String,
	/// Customer IPv4 address.
	pub customer_ip4_address: String,
	/// Customer IPv6 network.
	pub customer_ip6_network: String,
	/// IPv4 gateway.
	pub ipv4_gateway_address: String,
	/// IPv6 gateway.
	pub ipv6_gateway_address: String,
	/// Connection name.
	pub name: String,
}

/// IBM Direct Link connection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct IbmConnection {
	/// Resource name assigned by Megaport.
	pub resource_name: String,
	/// Resource type assigned by Megaport.
	pub resource_type: String,
	/// Provider name.
	pub csp_name: String,
	/// Provisioned bandwidth in Mbps.
	pub bandwidth: u32,
	/// Bandwidths offered for the connection.
	pub bandwidths: Vec<u32>,
	/// IBM account ID.
	pub account_id: String,
	/// Customer ASN.
	pub customer_asn: u32,
	/// Customer-side address.
	pub customer_ip_address: String,
	/// IBM-side address.
	pub provider_ip_address: String,
}
