//! Fixed mapping between Megaport API hosts and their OAuth token endpoints.
//!
//! Each API host is served by exactly one authorization server. The pairs below are part of the
//! vendor's infrastructure and must match it byte-for-byte.

// self
use crate::_prelude::*;

/// Megaport deployment targeted by a client.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
	#[default]
	/// Production API.
	Production,
	/// Staging (UAT) API.
	Staging,
	/// Development API.
	Development,
}
impl Environment {
	/// All known environments.
	pub const ALL: [Self; 3] = [Self::Production, Self::Staging, Self::Development];

	/// Base URL of the resource API.
	pub const fn api_base(self) -> &'static str {
		match self {
			Self::Production => "https://api.megaport.com/",
			Self::Staging => "https://api-staging.megaport.com/",
			Self::Development => "https://api-mpone-dev.megaport.com/",
		}
	}

	/// OAuth2 token endpoint serving this environment.
	pub const fn token_endpoint(self) -> &'static str {
		match self {
			Self::Production => "https://auth-m2m.megaport.com/oauth2/token",
			Self::Staging =>
				"https://oauth-m2m-staging.auth.ap-southeast-2.amazoncognito.com/oauth2/token",
			Self::Development =>
				"https://oauth-m2m-mpone-dev.auth.ap-southeast-2.amazoncognito.com/oauth2/token",
		}
	}

	/// Host component of [`Environment::api_base`].
	pub const fn api_host(self) -> &'static str {
		match self {
			Self::Production => "api.megaport.com",
			Self::Staging => "api-staging.megaport.com",
			Self::Development => "api-mpone-dev.megaport.com",
		}
	}

	/// Resolves the environment whose API is served from `host`.
	pub fn from_host(host: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|env| env.api_host().eq_ignore_ascii_case(host))
	}

	/// Returns a stable label suitable for log fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Production => "production",
			Self::Staging => "staging",
			Self::Development => "development",
		}
	}
}
impl Display for Environment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
