//! Shared helpers for the reqwest-backed integration tests.

#![allow(dead_code)]

// crates.io
use httpmock::prelude::*;
// self
use megaport::{
	auth::Credentials,
	client::Client,
	config::ClientConfig,
	http::{ReqwestHttpClient, ReqwestTransportErrorMapper},
	reqwest,
	token::TokenManager,
	url::Url,
};

pub const ACCESS_KEY: &str = "access-key";
pub const SECRET_KEY: &str = "secret-key";
/// `Basic` header for [`ACCESS_KEY`] and [`SECRET_KEY`].
pub const BASIC_AUTHORIZATION: &str = "Basic YWNjZXNzLWtleTpzZWNyZXQta2V5";

pub type TestClient = Client<ReqwestHttpClient, ReqwestTransportErrorMapper>;
pub type TestTokenManager = TokenManager<ReqwestHttpClient, ReqwestTransportErrorMapper>;

pub fn credentials() -> Credentials {
	Credentials::new(ACCESS_KEY, SECRET_KEY)
}

/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
/// `httpmock` during tests.
pub fn test_reqwest_http_client() -> ReqwestHttpClient {
	let client = reqwest::Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

/// Token manager exchanging against `/oauth2/token` on `server`.
pub fn build_test_token_manager(server: &MockServer, credentials: Credentials) -> TestTokenManager {
	let token_url = Url::parse(&server.url("/oauth2/token"))
		.expect("Failed to parse test token endpoint URL.");

	TokenManager::with_http_client(
		credentials,
		token_url,
		test_reqwest_http_client(),
		ReqwestTransportErrorMapper,
	)
}

/// API client whose API base and token endpoint both live on `server`.
pub fn build_test_client(server: &MockServer) -> TestClient {
	let config = ClientConfig::builder(credentials())
		.api_url(Url::parse(&server.url("/")).expect("Failed to parse test API base URL."))
		.token_url(
			Url::parse(&server.url("/oauth2/token"))
				.expect("Failed to parse test token endpoint URL."),
		)
		.build()
		.expect("Test client configuration should validate.");

	Client::with_http_client(config, test_reqwest_http_client(), ReqwestTransportErrorMapper)
}

pub fn token_body(token: &str, expires_in: u64) -> String {
	format!(r#"{{"access_token":"{token}","token_type":"Bearer","expires_in":{expires_in}}}"#)
}
