//! MVE vendor configs discriminated by `vendor`.
//!
//! These are mostly built by callers and sent with an MVE order; decoding exists so echoed or
//! stored configs round-trip through the same type.

// serde
use serde::{Deserializer, Serializer, de::Error as _, ser::Error as _};
// self
use crate::{
	_prelude::*,
	decode::{self, TaggedVariant},
	error::{DecodeError, PathError},
};

/// Known `vendor` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VendorKind {
	/// Aruba EdgeConnect.
	Aruba,
	/// Cisco (C8000v, FTDv).
	Cisco,
	/// Fortinet FortiGate.
	Fortinet,
	/// Palo Alto VM-Series.
	PaloAlto,
	/// Versa FlexVNF.
	Versa,
	/// VMware SD-WAN.
	Vmware,
	/// Cisco Meraki vMX.
	Meraki,
}
impl VendorKind {
	/// Every known vendor.
	pub const ALL: [Self; 7] =
		[Self::Aruba, Self::Cisco, Self::Fortinet, Self::PaloAlto, Self::Versa, Self::Vmware, Self::Meraki];

	/// Tag written when serializing.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Aruba => "aruba",
			Self::Cisco => "cisco",
			Self::Fortinet => "fortinet",
			Self::PaloAlto => "paloalto",
			Self::Versa => "versa",
			Self::Vmware => "vmware",
			Self::Meraki => "meraki",
		}
	}

	/// Resolves a tag; `PaloAlto` is accepted alongside the canonical spelling.
	pub fn from_tag(tag: &str) -> Option<Self> {
		match tag {
			"aruba" => Some(Self::Aruba),
			"cisco" => Some(Self::Cisco),
			"fortinet" => Some(Self::Fortinet),
			"paloalto" | "PaloAlto" => Some(Self::PaloAlto),
			"versa" => Some(Self::Versa),
			"vmware" => Some(Self::Vmware),
			"meraki" => Some(Self::Meraki),
			_ => None,
		}
	}
}
impl Display for VendorKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Image selection shared by every vendor config.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VendorImage {
	/// MVE image ID.
	pub image_id: u32,
	/// Size of the MVE (`SMALL`, `MEDIUM`, `LARGE`).
	#[serde(skip_serializing_if = "String::is_empty")]
	pub product_size: String,
	/// Optional label for the MVE.
	#[serde(skip_serializing_if = "String::is_empty")]
	pub mve_label: String,
}

/// Vendor-specific MVE configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum VendorConfig {
	/// Aruba EdgeConnect.
	Aruba(ArubaConfig),
	/// Cisco.
	Cisco(CiscoConfig),
	/// Fortinet.
	Fortinet(FortinetConfig),
	/// Palo Alto.
	PaloAlto(PaloAltoConfig),
	/// Versa.
	Versa(VersaConfig),
	/// VMware SD-WAN.
	Vmware(VmwareConfig),
	/// Meraki.
	Meraki(MerakiConfig),
	/// Config for a vendor this crate does not know, kept verbatim.
	Opaque(Map<String, Value>),
}
impl VendorConfig {
	/// Concrete vendor, or `None` for opaque configs.
	pub fn vendor(&self) -> Option<VendorKind> {
		match self {
			Self::Aruba(_) => Some(VendorKind::Aruba),
			Self::Cisco(_) => Some(VendorKind::Cisco),
			Self::Fortinet(_) => Some(VendorKind::Fortinet),
			Self::PaloAlto(_) => Some(VendorKind::PaloAlto),
			Self::Versa(_) => Some(VendorKind::Versa),
			Self::Vmware(_) => Some(VendorKind::Vmware),
			Self::Meraki(_) => Some(VendorKind::Meraki),
			Self::Opaque(_) => None,
		}
	}

	/// Image selection, when the vendor is known.
	pub fn image(&self) -> Option<&VendorImage> {
		match self {
			Self::Aruba(config) => Some(&config.image),
			Self::Cisco(config) => Some(&config.image),
			Self::Fortinet(config) => Some(&config.image),
			Self::PaloAlto(config) => Some(&config.image),
			Self::Versa(config) => Some(&config.image),
			Self::Vmware(config) => Some(&config.image),
			Self::Meraki(config) => Some(&config.image),
			Self::Opaque(_) => None,
		}
	}

	/// Converts the config into its JSON object, `vendor` first.
	pub fn to_object(&self) -> Result<Map<String, Value>, serde_json::Error> {
		const KEY: &str = <VendorConfig as TaggedVariant>::DISCRIMINATOR;

		match self {
			Self::Aruba(fields) => decode::tagged_object(KEY, VendorKind::Aruba.as_str(), fields),
			Self::Cisco(fields) => decode::tagged_object(KEY, VendorKind::Cisco.as_str(), fields),
			Self::Fortinet(fields) =>
				decode::tagged_object(KEY, VendorKind::Fortinet.as_str(), fields),
			Self::PaloAlto(fields) =>
				decode::tagged_object(KEY, VendorKind::PaloAlto.as_str(), fields),
			Self::Versa(fields) => decode::tagged_object(KEY, VendorKind::Versa.as_str(), fields),
			Self::Vmware(fields) => decode::tagged_object(KEY, VendorKind::Vmware.as_str(), fields),
			Self::Meraki(fields) => decode::tagged_object(KEY, VendorKind::Meraki.as_str(), fields),
			Self::Opaque(object) => Ok(object.clone()),
		}
	}
}
impl TaggedVariant for VendorConfig {
	type Kind = VendorKind;

	const DISCRIMINATOR: &'static str = "vendor";

	fn kind(tag: &str) -> Option<Self::Kind> {
		VendorKind::from_tag(tag)
	}

	fn decode_kind(kind: Self::Kind, object: Map<String, Value>) -> Result<Self, PathError> {
		match kind {
			VendorKind::Aruba => decode::decode_fields(object).map(Self::Aruba),
			VendorKind::Cisco => decode::decode_fields(object).map(Self::Cisco),
			VendorKind::Fortinet => decode::decode_fields(object).map(Self::Fortinet),
			VendorKind::PaloAlto => decode::decode_fields(object).map(Self::PaloAlto),
			VendorKind::Versa => decode::decode_fields(object).map(Self::Versa),
			VendorKind::Vmware => decode::decode_fields(object).map(Self::Vmware),
			VendorKind::Meraki => decode::decode_fields(object).map(Self::Meraki),
		}
	}

	fn opaque(object: Map<String, Value>) -> Self {
		Self::Opaque(object)
	}
}
impl Serialize for VendorConfig {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		self.to_object().map_err(S::Error::custom)?.serialize(serializer)
	}
}
impl<'de> Deserialize<'de> for VendorConfig {
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

/// Decodes raw vendor config bytes (object, array, or nothing).
pub fn decode_vendor_configs(raw: &[u8]) -> Result<Vec<VendorConfig>, DecodeError> {
	decode::decode_variants(raw)
}

/// Aruba EdgeConnect config.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArubaConfig {
	/// Image selection.
	#[serde(flatten)]
	pub image: VendorImage,
	/// Orchestrator account name.
	pub account_name: String,
	/// Orchestrator account key.
	pub account_key: String,
	/// Appliance system tag.
	pub system_tag: String,
}

/// Cisco config.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CiscoConfig {
	/// Image selection.
	#[serde(flatten)]
	pub image: VendorImage,
	/// Admin SSH public key.
	pub admin_ssh_public_key: String,
	/// SSH public key.
	pub ssh_public_key: String,
	/// Manage the appliance locally instead of through vManage or FMC.
	pub manage_locally: bool,
	/// Bootstrap cloud-init payload.
	pub cloud_init: String,
	/// Firepower Management Center address.
	pub fmc_ip_address: String,
	/// FMC registration key.
	pub fmc_registration_key: String,
	/// FMC NAT ID.
	pub fmc_nat_id: String,
}

/// Fortinet config.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FortinetConfig {
	/// Image selection.
	#[serde(flatten)]
	pub image: VendorImage,
	/// Admin SSH public key.
	pub admin_ssh_public_key: String,
	/// SSH public key.
	pub ssh_public_key: String,
	/// License file contents.
	pub license_data: String,
}

/// Palo Alto config.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaloAltoConfig {
	/// Image selection.
	#[serde(flatten)]
	pub image: VendorImage,
	/// Admin SSH public key.
	pub admin_ssh_public_key: String,
	/// SSH public key.
	pub ssh_public_key: String,
	/// Hashed admin password.
	pub admin_password_hash: String,
	/// License file contents.
	pub license_data: String,
}

/// Versa config.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VersaConfig {
	/// Image selection.
	#[serde(flatten)]
	pub image: VendorImage,
	/// Director address.
	pub director_address: String,
	/// Controller address.
	pub controller_address: String,
	/// Local authentication string.
	pub local_auth: String,
	/// Remote authentication string.
	pub remote_auth: String,
	/// Appliance serial number.
	pub serial_number: String,
}

/// VMware SD-WAN config.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VmwareConfig {
	/// Image selection.
	#[serde(flatten)]
	pub image: VendorImage,
	/// Admin SSH public key.
	pub admin_ssh_public_key: String,
	/// SSH public key.
	pub ssh_public_key: String,
	/// Orchestrator address.
	pub vco_address: String,
	/// Orchestrator activation code.
	pub vco_activation_code: String,
}

/// Meraki config.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MerakiConfig {
	/// Image selection.
	#[serde(flatten)]
	pub image: VendorImage,
	/// Dashboard claim token.
	pub token: String,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn config_serializes_with_vendor_tag_and_camel_case_keys() {
		let config = VendorConfig::Cisco(CiscoConfig {
			image: VendorImage { image_id: 42, product_size: "SMALL".into(), mve_label: "".into() },
			manage_locally: true,
			fmc_ip_address: "10.0.0.1".into(),
			..Default::default()
		});
		let value = serde_json::to_value(&config).expect("Config should serialize.");

		assert_eq!(value["vendor"], "cisco");
		assert_eq!(value["imageId"], 42);
		assert_eq!(value["productSize"], "SMALL");
		assert_eq!(value["manageLocally"], true);
		assert_eq!(value["fmcIpAddress"], "10.0.0.1");

		let object = config.to_object().expect("Config should convert to an object.");

		assert_eq!(object.keys().next().map(String::as_str), Some("vendor"));
	}

	#[test]
	fn blank_image_labels_are_left_out() {
		let config = VendorConfig::Meraki(MerakiConfig {
			image: VendorImage { image_id: 7, ..Default::default() },
			token: "claim".into(),
		});
		let object = config.to_object().expect("Config should convert to an object.");

		assert_eq!(object.get("imageId"), Some(&Value::from(7)));
		assert!(!object.contains_key("mveLabel"));
		assert!(!object.contains_key("productSize"));

		let labelled = VendorConfig::Meraki(MerakiConfig {
			image: VendorImage { image_id: 7, product_size: "LARGE".into(), mve_label: "edge-1".into() },
			token: "claim".into(),
		});
		let value = serde_json::to_value(&labelled).expect("Config should serialize.");

		assert_eq!(value["productSize"], "LARGE");
		assert_eq!(value["mveLabel"], "edge-1");
	}

	#[test]
	fn palo_alto_alias_decodes_and_reserializes_canonically() {
		let configs = decode_vendor_configs(
			br#"{"vendor":"PaloAlto","imageId":3,"adminPasswordHash":"$6$x","licenseData":"lic"}"#,
		)
		.expect("Palo Alto alias should decode.");
		let VendorConfig::PaloAlto(config) = &configs[0] else {
			panic!("Expected a Palo Alto config, got {:?}.", configs[0]);
		};

		assert_eq!(config.image.image_id, 3);
		assert_eq!(config.admin_password_hash, "$6$x");

		let value = serde_json::to_value(&configs[0]).expect("Config should serialize.");

		assert_eq!(value["vendor"], "paloalto");
	}

	#[test]
	fn unknown_vendor_is_kept_verbatim_and_mistyped_known_vendor_fails() {
		let configs = decode_vendor_configs(br#"[{"vendor":"sixwind","imageId":1}]"#)
			.expect("Unknown vendor should decode.");

		assert_eq!(configs[0].vendor(), None);
		assert_eq!(
			serde_json::to_string(&configs[0]).expect("Opaque config should serialize."),
			r#"{"vendor":"sixwind","imageId":1}"#
		);

		let err = decode_vendor_configs(br#"{"vendor":"meraki","token":7}"#)
			.expect_err("Numeric token should fail.");

		assert!(matches!(err, DecodeError::Variant { ref tag, index: None, .. } if tag == "meraki"));
	}
}
