//! Authenticated request cycle against the Megaport resource API.
//!
//! [`Client`] pairs a [`ClientConfig`] with a transport and a shared [`TokenManager`]. Every
//! request obtains a bearer token first, so callers never see an expired token on the wire. A
//! `401` from the API drops the cached token if it is still the one the request used; the next
//! request exchanges credentials again. The failing request itself is not retried.

pub use oauth2::http::Method;

// crates.io
use oauth2::{
	HttpRequest, HttpResponse,
	http::{
		Request, StatusCode,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT},
	},
};
// self
use crate::{
	_prelude::*,
	auth::BearerToken,
	config::ClientConfig,
	context::CallContext,
	decode::{self, ApiEnvelope},
	error::{ConfigError, DecodeError},
	http::{self, ApiHttpClient, CallTarget, TransportErrorMapper},
	obs::{self, OperationKind, OperationSpan, Outcome},
	token::TokenManager,
};
#[cfg(feature = "reqwest")]
use crate::http::{ReqwestHttpClient, ReqwestTransportErrorMapper};

const JSON: &str = "application/json";
const MESSAGE_PREVIEW_CHARS: usize = 256;

#[cfg(feature = "reqwest")]
/// API client specialized for the crate's default reqwest transport stack.
pub type ReqwestApiClient = Client<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Megaport API client.
pub struct Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	config: ClientConfig,
	http_client: Arc<C>,
	transport_mapper: Arc<M>,
	tokens: Arc<TokenManager<C, M>>,
}
impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that shares one transport + mapper pair between token exchanges and
	/// resource requests.
	pub fn with_http_client(
		config: ClientConfig,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		let http_client = http_client.into();
		let transport_mapper = mapper.into();
		let tokens = Arc::new(TokenManager::with_http_client(
			config.credentials.clone(),
			config.token_url.clone(),
			Arc::clone(&http_client),
			Arc::clone(&transport_mapper),
		));

		Self { config, http_client, transport_mapper, tokens }
	}

	/// Validated configuration backing this client.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Token manager guarding every request; clone the [`Arc`] to share it.
	pub fn tokens(&self) -> &Arc<TokenManager<C, M>> {
		&self.tokens
	}

	/// Sends `GET path` and returns the envelope's `data`.
	pub async fn get_json<T>(&self, ctx: &CallContext, path: &str) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.request_json::<T, ()>(ctx, Method::GET, path, None).await
	}

	/// Sends `POST path` with a JSON `body` and returns the envelope's `data`.
	pub async fn post_json<T, B>(&self, ctx: &CallContext, path: &str, body: &B) -> Result<T>
	where
		T: DeserializeOwned,
		B: ?Sized + Serialize,
	{
		self.request_json(ctx, Method::POST, path, Some(body)).await
	}

	/// Sends an authenticated JSON request and returns the envelope's `data`.
	///
	/// The context deadline, or the configured request timeout when the context has none,
	/// applies to the token lookup and to the request separately.
	pub async fn request_json<T, B>(
		&self,
		ctx: &CallContext,
		method: Method,
		path: &str,
		body: Option<&B>,
	) -> Result<T>
	where
		T: DeserializeOwned,
		B: ?Sized + Serialize,
	{
		const KIND: OperationKind = OperationKind::ApiRequest;

		let span = OperationSpan::new(KIND, "request_json");

		obs::record_outcome(KIND, Outcome::Attempt);

		let result = span.instrument(self.send(ctx, method, path, body)).await;

		match &result {
			Ok(_) => obs::record_outcome(KIND, Outcome::Success),
			Err(_) => obs::record_outcome(KIND, Outcome::Failure),
		}

		result
	}

	async fn send<T, B>(
		&self,
		ctx: &CallContext,
		method: Method,
		path: &str,
		body: Option<&B>,
	) -> Result<T>
	where
		T: DeserializeOwned,
		B: ?Sized + Serialize,
	{
		let ctx = ctx.or_timeout(self.config.request_timeout);
		let url = self.config.endpoint(path)?;
		let payload = body.map(serde_json::to_vec).transpose().map_err(DecodeError::Serialize)?;
		let token = self.tokens.authorize(&ctx).await?;
		let request = build_api_request(method, &url, &token, &self.config.user_agent, payload)?;
		let response = ctx
			.run(http::execute(
				self.http_client.as_ref(),
				self.transport_mapper.as_ref(),
				CallTarget::Api,
				request,
			))
			.await?;
		let status = response.status();

		if !status.is_success() {
			if status == StatusCode::UNAUTHORIZED {
				self.tokens.invalidate_if(&token).await;
			}

			return Err(api_error(&response));
		}
		if response.body().trim_ascii().is_empty() {
			return Ok(decode::decode_json::<T>(b"null")?);
		}

		Ok(decode::decode_json::<ApiEnvelope<T>>(response.body())?.data)
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client backed by a fresh reqwest transport.
	pub fn new(config: ClientConfig) -> Result<Self> {
		let client = ReqwestClient::builder().build().map_err(ConfigError::from)?;

		Ok(Self::with_http_client(
			config,
			ReqwestHttpClient::with_client(client),
			ReqwestTransportErrorMapper,
		))
	}
}
impl<C, M> Debug for Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("api_url", &self.config.api_url.as_str())
			.field("tokens", &self.tokens)
			.finish()
	}
}

#[derive(Deserialize)]
struct ErrorBody {
	#[serde(default)]
	message: Option<String>,
}

fn build_api_request(
	method: Method,
	url: &Url,
	token: &BearerToken,
	user_agent: &str,
	payload: Option<Vec<u8>>,
) -> Result<HttpRequest> {
	let mut builder = Request::builder()
		.method(method)
		.uri(url.as_str())
		.header(AUTHORIZATION, token.authorization_header())
		.header(ACCEPT, JSON)
		.header(USER_AGENT, user_agent);

	if payload.is_some() {
		builder = builder.header(CONTENT_TYPE, JSON);
	}

	builder.body(payload.unwrap_or_default()).map_err(|err| ConfigError::from(err).into())
}

fn api_error(response: &HttpResponse) -> Error {
	let status = response.status();
	let message = serde_json::from_slice::<ErrorBody>(response.body())
		.ok()
		.and_then(|body| body.message)
		.map(|message| message.trim().to_owned())
		.filter(|message| !message.is_empty())
		.or_else(|| body_preview(response.body()))
		.unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

	Error::Api {
		status: status.as_u16(),
		message,
		retry_after: http::parse_retry_after(response.headers()),
	}
}

fn body_preview(body: &[u8]) -> Option<String> {
	let text = String::from_utf8_lossy(body);
	let text = text.trim();

	if text.is_empty() {
		return None;
	}

	Some(text.chars().take(MESSAGE_PREVIEW_CHARS).collect())
}
