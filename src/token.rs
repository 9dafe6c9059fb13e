//! Bearer token cache with serialized, self-refreshing client-credentials exchanges.
//!
//! [`TokenManager::authorize`] returns the cached token while `now < expires_at` and otherwise
//! performs exactly one exchange. The read-check-fetch-write sequence runs under a single async
//! mutex, so callers racing past an expired cache queue behind the in-flight exchange and then
//! observe its result instead of stampeding the token endpoint. The lock owns the whole
//! [`BearerToken`], which keeps a token value and its expiry inseparable for every reader.

// self
use crate::{
	_prelude::*,
	auth::{BearerToken, Credentials},
	context::CallContext,
	exchange,
	http::{ApiHttpClient, TransportErrorMapper},
	obs::{self, OperationKind, OperationSpan, Outcome},
};
#[cfg(feature = "reqwest")]
use crate::http::{ReqwestHttpClient, ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Token manager specialized for the crate's default reqwest transport stack.
pub type ReqwestTokenManager = TokenManager<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Owns the client-credentials exchange and the cached bearer token.
pub struct TokenManager<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	http_client: Arc<C>,
	transport_mapper: Arc<M>,
	credentials: Credentials,
	token_url: Url,
	cache: AsyncMutex<Option<BearerToken>>,
}
impl<C, M> TokenManager<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a token manager that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		credentials: Credentials,
		token_url: Url,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			credentials,
			token_url,
			cache: AsyncMutex::new(None),
		}
	}

	/// Token endpoint this manager exchanges credentials against.
	pub fn token_url(&self) -> &Url {
		&self.token_url
	}

	/// Credentials this manager exchanges.
	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	/// Returns a valid bearer token, exchanging credentials only when the cache is empty or
	/// expired.
	pub async fn authorize(&self, ctx: &CallContext) -> Result<BearerToken> {
		self.observe("authorize", ctx, false).await
	}

	/// Exchanges credentials unconditionally and replaces the cached token.
	pub async fn force_refresh(&self, ctx: &CallContext) -> Result<BearerToken> {
		self.observe("force_refresh", ctx, true).await
	}

	/// Snapshot of the cached token, which may already be expired.
	pub async fn cached(&self) -> Option<BearerToken> {
		self.cache.lock().await.clone()
	}

	/// Drops the cached token so the next [`TokenManager::authorize`] exchanges again.
	pub async fn invalidate(&self) {
		self.cache.lock().await.take();
	}

	/// Drops the cached token only if it is still `rejected`.
	///
	/// A token refreshed by another caller after `rejected` was handed out stays cached. Returns
	/// whether the cache was cleared.
	pub async fn invalidate_if(&self, rejected: &BearerToken) -> bool {
		let mut cache = self.cache.lock().await;

		if cache.as_ref() == Some(rejected) {
			cache.take();

			true
		} else {
			false
		}
	}

	async fn observe(
		&self,
		stage: &'static str,
		ctx: &CallContext,
		force: bool,
	) -> Result<BearerToken> {
		const KIND: OperationKind = OperationKind::Authorize;

		let span = OperationSpan::new(KIND, stage);

		obs::record_outcome(KIND, Outcome::Attempt);

		let result = span.instrument(ctx.run(self.get_or_refresh(force))).await;

		match &result {
			Ok((_, true)) => obs::record_outcome(KIND, Outcome::Reused),
			Ok((_, false)) => obs::record_outcome(KIND, Outcome::Success),
			Err(_) => obs::record_outcome(KIND, Outcome::Failure),
		}

		result.map(|(token, _)| token)
	}

	/// Returns the token plus whether it came from the cache.
	async fn get_or_refresh(&self, force: bool) -> Result<(BearerToken, bool)> {
		self.credentials.validate()?;

		let mut cache = self.cache.lock().await;

		if !force {
			let now = OffsetDateTime::now_utc();

			if let Some(current) = cache.as_ref().filter(|token| token.is_valid_at(now)) {
				return Ok((current.clone(), true));
			}
		}

		let fresh = exchange::exchange_client_credentials(
			self.http_client.as_ref(),
			self.transport_mapper.as_ref(),
			&self.token_url,
			&self.credentials,
		)
		.await?;

		obs::trace_token_refreshed(&self.credentials.fingerprint(), fresh.expires_at());

		*cache = Some(fresh.clone());

		Ok((fresh, false))
	}
}
#[cfg(feature = "reqwest")]
impl TokenManager<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a token manager backed by a default reqwest transport.
	pub fn new(credentials: Credentials, token_url: Url) -> Self {
		Self::with_http_client(
			credentials,
			token_url,
			ReqwestHttpClient::default(),
			ReqwestTransportErrorMapper,
		)
	}
}
impl<C, M> Debug for TokenManager<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenManager")
			.field("credentials", &self.credentials)
			.field("token_url", &self.token_url.as_str())
			.finish()
	}
}
