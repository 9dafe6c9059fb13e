//! Demonstrates an authenticated resource lookup against a mock Megaport API: the first call
//! exchanges the key pair for a bearer token, the second reuses it, and the VXC's CSP
//! connections decode into typed variants.

// std
use std::time::Duration;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use megaport::{
	auth::Credentials,
	client::Client,
	config::ClientConfig,
	context::CallContext,
	decode::{CspConnection, VxcResources},
	http::{ReqwestHttpClient, ReqwestTransportErrorMapper},
	reqwest,
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"Bearer\",\"expires_in\":900}",
			);
		})
		.await;
	let _resources_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2/product/vxc/demo/resources");
			then.status(200).header("content-type", "application/json").body(
				r#"{"message":"Found","data":{"csp_connection":[{"connectType":"AZURE","service_key":"demo-key","vlan":100},{"connectType":"SATELLITE","orbit":"LEO"}],"vll":[]}}"#,
			);
		})
		.await;
	let config = ClientConfig::builder(Credentials::new("demo-access-key", "demo-secret-key"))
		.api_url(Url::parse(&server.url("/"))?)
		.token_url(Url::parse(&server.url("/oauth2/token"))?)
		.request_timeout(Duration::from_secs(10))
		.build()?;
	let http_client = ReqwestHttpClient::with_client(
		reqwest::Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let client = <Client<ReqwestHttpClient, ReqwestTransportErrorMapper>>::with_http_client(
		config,
		http_client,
		ReqwestTransportErrorMapper,
	);
	let ctx = CallContext::new();

	for _ in 0..2 {
		let resources: VxcResources = client.get_json(&ctx, "/v2/product/vxc/demo/resources").await?;

		for connection in &resources.csp_connection {
			match connection {
				CspConnection::Azure(azure) =>
					println!("Azure ExpressRoute on VLAN {} (key {}).", azure.vlan, azure.service_key),
				CspConnection::Opaque(object) =>
					println!("Unrecognized connection kept verbatim: {}.", serde_json::to_string(object)?),
				other => println!("Connection of type {:?}.", other.connect_type()),
			}
		}
	}

	token_mock.assert_async().await;

	Ok(())
}
