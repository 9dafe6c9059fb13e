//! Client configuration and its validating builder.

// self
use crate::{_prelude::*, auth::Credentials, environment::Environment, error::ConfigError};

/// Default `User-Agent` sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("megaport-rs/", env!("CARGO_PKG_VERSION"));

/// Validated client configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// Key pair exchanged for bearer tokens.
	pub credentials: Credentials,
	/// Base URL of the resource API; request paths are joined onto it.
	pub api_url: Url,
	/// OAuth2 token endpoint paired with `api_url`.
	pub token_url: Url,
	/// `User-Agent` header value.
	pub user_agent: String,
	/// Deadline applied to calls whose context does not carry one.
	pub request_timeout: Option<StdDuration>,
}
impl ClientConfig {
	/// Creates a new builder for the provided credentials.
	pub fn builder(credentials: Credentials) -> ClientConfigBuilder {
		ClientConfigBuilder::new(credentials)
	}

	/// Resolves `path` against the API base URL.
	///
	/// The result must stay on the API origin; absolute URLs pointing elsewhere are rejected so
	/// the bearer token never leaves it.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		let relative = path.trim_start_matches('/');
		let url = self
			.api_url
			.join(relative)
			.map_err(|source| ConfigError::InvalidUrl { url: path.to_owned(), source })?;

		if url.scheme() != self.api_url.scheme()
			|| url.host_str() != self.api_url.host_str()
			|| url.port_or_known_default() != self.api_url.port_or_known_default()
		{
			return Err(ConfigError::ForeignEndpoint { url: url.to_string() });
		}

		Ok(url)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		validate_endpoint("API", &self.api_url)?;
		validate_endpoint("token", &self.token_url)?;

		Ok(())
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	/// Key pair exchanged for bearer tokens.
	pub credentials: Credentials,
	/// Target environment; ignored when `api_url` is set.
	pub environment: Environment,
	/// Explicit API base URL.
	pub api_url: Option<Url>,
	/// Explicit token endpoint; derived from the API host when absent.
	pub token_url: Option<Url>,
	/// `User-Agent` header value.
	pub user_agent: String,
	/// Default request deadline.
	pub request_timeout: Option<StdDuration>,
}
impl ClientConfigBuilder {
	/// Creates a new builder targeting production.
	pub fn new(credentials: Credentials) -> Self {
		Self {
			credentials,
			environment: Environment::default(),
			api_url: None,
			token_url: None,
			user_agent: DEFAULT_USER_AGENT.into(),
			request_timeout: None,
		}
	}

	/// Targets one of the known environments.
	pub fn environment(mut self, environment: Environment) -> Self {
		self.environment = environment;

		self
	}

	/// Overrides the API base URL.
	pub fn api_url(mut self, url: Url) -> Self {
		self.api_url = Some(url);

		self
	}

	/// Overrides the token endpoint.
	pub fn token_url(mut self, url: Url) -> Self {
		self.token_url = Some(url);

		self
	}

	/// Overrides the `User-Agent` header.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = user_agent.into();

		self
	}

	/// Sets the default request deadline.
	pub fn request_timeout(mut self, timeout: StdDuration) -> Self {
		self.request_timeout = Some(timeout);

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let api_url = match self.api_url {
			Some(url) => url,
			None => parse_url(self.environment.api_base())?,
		};
		let token_url = match self.token_url {
			Some(url) => url,
			None => {
				let host = api_url.host_str().unwrap_or_default();
				let environment = Environment::from_host(host)
					.ok_or_else(|| ConfigError::UnknownEnvironment { host: host.to_owned() })?;

				parse_url(environment.token_endpoint())?
			},
		};
		let config = ClientConfig {
			credentials: self.credentials,
			api_url,
			token_url,
			user_agent: self.user_agent,
			request_timeout: self.request_timeout,
		};

		config.validate()?;

		Ok(config)
	}
}

fn parse_url(raw: &str) -> Result<Url, ConfigError> {
	Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { url: raw.to_owned(), source })
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ConfigError> {
	if url.scheme() != "https" {
		Err(ConfigError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	} else {
		Ok(())
	}
}
