//! OAuth2 client-credentials exchange against the Megaport authorization server.
//!
//! The exchange posts `grant_type=client_credentials` with HTTP Basic credentials and turns the
//! JSON answer into a [`BearerToken`]. Classification of the answer:
//!
//! - a non-empty `error` field is an [`Error::Authentication`], whatever the status;
//! - other 4xx answers are [`Error::Authentication`], other non-2xx answers are
//!   [`TransportError::UnexpectedStatus`];
//! - a 2xx answer that is not valid JSON, or lacks `access_token`/`expires_in`, is a
//!   [`DecodeError`].

// crates.io
use oauth2::{
	HttpRequest, HttpResponse,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
// self
use crate::{
	_prelude::*,
	auth::{BearerToken, Credentials},
	decode,
	error::{ConfigError, DecodeError, TransportError},
	http::{self, ApiHttpClient, CallTarget, TransportErrorMapper},
};

/// Form body sent to the token endpoint.
pub const CLIENT_CREDENTIALS_FORM: &str = "grant_type=client_credentials";

/// JSON body returned by the token endpoint.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TokenEndpointResponse {
	/// Issued access token.
	#[serde(default)]
	pub access_token: Option<String>,
	/// Token type, normally `Bearer`.
	#[serde(default)]
	pub token_type: Option<String>,
	/// Lifetime of the access token in seconds.
	#[serde(default)]
	pub expires_in: Option<u64>,
	/// Refresh token; the client-credentials grant never relies on it.
	#[serde(default)]
	pub refresh_token: Option<String>,
	/// OAuth error code.
	#[serde(default)]
	pub error: Option<String>,
	/// Human-readable error description.
	#[serde(default)]
	pub error_description: Option<String>,
}
impl TokenEndpointResponse {
	fn rejection(&self) -> Option<String> {
		let error = self.error.as_deref().map(str::trim).filter(|value| !value.is_empty())?;

		match self.error_description.as_deref().map(str::trim).filter(|value| !value.is_empty()) {
			Some(description) => Some(format!("{error}: {description}")),
			None => Some(error.to_owned()),
		}
	}
}

/// Builds the token request for `credentials`.
pub fn build_token_request(token_url: &Url, credentials: &Credentials) -> Result<HttpRequest> {
	Request::builder()
		.method(Method::POST)
		.uri(token_url.as_str())
		.header(AUTHORIZATION, credentials.basic_authorization())
		.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
		.header(ACCEPT, "application/json")
		.body(CLIENT_CREDENTIALS_FORM.as_bytes().to_vec())
		.map_err(|err| ConfigError::from(err).into())
}

/// Performs the client-credentials grant and returns a freshly issued token.
pub async fn exchange_client_credentials<C, M>(
	client: &C,
	mapper: &M,
	token_url: &Url,
	credentials: &Credentials,
) -> Result<BearerToken>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	credentials.validate()?;

	let request = build_token_request(token_url, credentials)?;
	let response = http::execute(client, mapper, CallTarget::TokenEndpoint, request).await?;

	interpret_token_response(&response, OffsetDateTime::now_utc())
}

/// Classifies a token endpoint answer received at `now`.
pub fn interpret_token_response(
	response: &HttpResponse,
	now: OffsetDateTime,
) -> Result<BearerToken> {
	let status = response.status();
	let parsed = decode::decode_json::<TokenEndpointResponse>(response.body());
	let body = match parsed {
		Ok(body) => body,
		Err(err) if status.is_success() => return Err(err.into()),
		Err(_) if status.is_client_error() =>
			return Err(Error::Authentication {
				reason: format!("HTTP {}", status.as_u16()),
				status: Some(status.as_u16()),
			}),
		Err(_) => return Err(TransportError::UnexpectedStatus { status: status.as_u16() }.into()),
	};

	if let Some(reason) = body.rejection() {
		return Err(Error::Authentication { reason, status: Some(status.as_u16()) });
	}
	if status.is_client_error() {
		return Err(Error::Authentication {
			reason: format!("HTTP {}", status.as_u16()),
			status: Some(status.as_u16()),
		});
	}
	if !status.is_success() {
		return Err(TransportError::UnexpectedStatus { status: status.as_u16() }.into());
	}

	let access_token = body
		.access_token
		.filter(|value| !value.trim().is_empty())
		.ok_or(DecodeError::MissingField { field: "access_token" })?;
	let expires_in = body.expires_in.ok_or(DecodeError::MissingField { field: "expires_in" })?;
	let expires_in =
		i64::try_from(expires_in).map_err(|_| DecodeError::OutOfRange { field: "expires_in" })?;
	let lifetime = Duration::seconds(expires_in);

	if now.checked_add(lifetime).is_none() {
		return Err(DecodeError::OutOfRange { field: "expires_in" }.into());
	}

	Ok(BearerToken::issued(access_token, now, lifetime))
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::http::StatusCode;
	use time::macros;
	// self
	use super::*;

	fn response(status: u16, body: &str) -> HttpResponse {
		let mut response = HttpResponse::new(body.as_bytes().to_vec());

		*response.status_mut() = StatusCode::from_u16(status).expect("Fixture status is valid.");

		response
	}

	#[test]
	fn token_request_carries_basic_auth_and_form() {
		let url = Url::parse("https://auth.example.com/oauth2/token").expect("URL fixture parses.");
		let request = build_token_request(&url, &Credentials::new("access", "secret"))
			.expect("Token request should build.");

		assert_eq!(request.method(), Method::POST);
		assert_eq!(request.uri().to_string(), "https://auth.example.com/oauth2/token");
		assert_eq!(
			request.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
			Some("Basic YWNjZXNzOnNlY3JldA==")
		);
		assert_eq!(
			request.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
			Some("application/x-www-form-urlencoded")
		);
		assert_eq!(request.body().as_slice(), b"grant_type=client_credentials");
	}

	#[test]
	fn successful_answer_sets_expiry_from_now() {
		let now = macros::datetime!(2025-01-01 00:00 UTC);
		let token = interpret_token_response(
			&response(
				200,
				r#"{"access_token":"abc","token_type":"Bearer","expires_in":3600,"refresh_token":"r"}"#,
			),
			now,
		)
		.expect("Well-formed answer should yield a token.");

		assert_eq!(token.value().expose(), "abc");
		assert_eq!(token.expires_at(), macros::datetime!(2025-01-01 01:00 UTC));
	}

	#[test]
	fn error_field_is_an_authentication_failure_even_on_success() {
		let now = OffsetDateTime::now_utc();
		let err = interpret_token_response(&response(200, r#"{"error":"invalid_client"}"#), now)
			.expect_err("Error field should reject the exchange.");

		assert!(matches!(err, Error::Authentication { ref reason, .. } if reason == "invalid_client"));

		let err = interpret_token_response(
			&response(400, r#"{"error":"invalid_grant","error_description":"bad key"}"#),
			now,
		)
		.expect_err("Error field with description should reject the exchange.");

		assert!(
			matches!(err, Error::Authentication { ref reason, status: Some(400) } if reason == "invalid_grant: bad key")
		);
	}

	#[test]
	fn empty_error_field_is_ignored() {
		let token = interpret_token_response(
			&response(200, r#"{"access_token":"abc","expires_in":60,"error":""}"#),
			OffsetDateTime::now_utc(),
		)
		.expect("Empty error field should not reject the exchange.");

		assert_eq!(token.value().expose(), "abc");
	}

	#[test]
	fn status_classification_without_json() {
		let now = OffsetDateTime::now_utc();
		let err = interpret_token_response(&response(401, "Unauthorized"), now)
			.expect_err("401 should be an authentication failure.");

		assert!(matches!(err, Error::Authentication { status: Some(401), .. }));

		let err = interpret_token_response(&response(503, "<html>"), now)
			.expect_err("503 should be a transport failure.");

		assert!(matches!(
			err,
			Error::Transport(TransportError::UnexpectedStatus { status: 503 })
		));

		let err = interpret_token_response(&response(200, "not json"), now)
			.expect_err("Malformed success body should be a decode failure.");

		assert!(matches!(err, Error::Decode(DecodeError::Json { .. })));
	}

	#[test]
	fn missing_or_mistyped_fields_are_decode_failures() {
		let now = OffsetDateTime::now_utc();
		let err = interpret_token_response(&response(200, r#"{"expires_in":60}"#), now)
			.expect_err("Missing access token should fail.");

		assert!(matches!(err, Error::Decode(DecodeError::MissingField { field: "access_token" })));

		let err = interpret_token_response(&response(200, r#"{"access_token":"abc"}"#), now)
			.expect_err("Missing expiry should fail.");

		assert!(matches!(err, Error::Decode(DecodeError::MissingField { field: "expires_in" })));

		let err = interpret_token_response(
			&response(200, r#"{"access_token":"abc","expires_in":"soon"}"#),
			now,
		)
		.expect_err("String expiry should fail.");

		assert!(matches!(err, Error::Decode(DecodeError::Json { .. })));
	}
}
