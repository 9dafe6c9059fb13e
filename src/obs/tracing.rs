// self
use crate::{_prelude::*, obs::OperationKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// A span builder used by token and API operations.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Creates a new span tagged with the provided operation kind + stage.
	pub fn new(kind: OperationKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("megaport.operation", operation = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a debug event when a token exchange replaced the cached token.
pub fn trace_token_refreshed(fingerprint: &str, expires_at: OffsetDateTime) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(credentials = fingerprint, %expires_at, "bearer token refreshed");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (fingerprint, expires_at);
	}
}

/// Emits a debug event when the decoder keeps a payload as an opaque variant.
pub fn trace_decode_fallback(discriminator: &'static str, tag: Option<&str>) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(discriminator, tag = tag.unwrap_or("<none>"), "unrecognized variant kept opaque");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (discriminator, tag);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn trace_helpers_noop_without_subscriber() {
		let _span = OperationSpan::new(OperationKind::Authorize, "test");

		trace_decode_fallback("connectType", Some("FUTURE_PROVIDER"));
		trace_token_refreshed("abc123", OffsetDateTime::UNIX_EPOCH);
	}

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = OperationSpan::new(OperationKind::ApiRequest, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
