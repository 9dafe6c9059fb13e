//! API key credentials exchanged for bearer tokens.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use sha2::{Digest, Sha256};
// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Access/secret key pair issued by the Megaport portal.
///
/// The pair is immutable once constructed. Only the Basic-Auth encoding of the pair ever leaves
/// the process; log fields use [`Credentials::fingerprint`] instead of the key itself.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
	access_key: String,
	secret_key: TokenSecret,
}
impl Credentials {
	/// Wraps an access/secret key pair. Emptiness is checked by [`Credentials::validate`].
	pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
		Self { access_key: access_key.into(), secret_key: TokenSecret::new(secret_key) }
	}

	/// Returns the public access key.
	pub fn access_key(&self) -> &str {
		&self.access_key
	}

	/// Returns the redacted secret key.
	pub fn secret_key(&self) -> &TokenSecret {
		&self.secret_key
	}

	/// Ensures both components are present.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.access_key.trim().is_empty() {
			return Err(ConfigError::MissingCredential { field: "access_key" });
		}
		if self.secret_key.is_blank() {
			return Err(ConfigError::MissingCredential { field: "secret_key" });
		}

		Ok(())
	}

	/// Builds the `Authorization` header value for the token endpoint.
	pub fn basic_authorization(&self) -> String {
		let raw = format!("{}:{}", self.access_key, self.secret_key.expose());

		format!("Basic {}", STANDARD.encode(raw))
	}

	/// Short, stable digest of the access key that is safe to log.
	pub fn fingerprint(&self) -> String {
		let digest = Sha256::digest(self.access_key.as_bytes());

		digest.iter().take(6).map(|byte| format!("{byte:02x}")).collect()
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("access_key", &self.fingerprint())
			.field("secret_key", &"<redacted>")
			.finish()
	}
}
