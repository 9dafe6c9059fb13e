//! Caller-supplied deadlines and cancellation signals for outbound calls.
//!
//! Every token exchange and resource request runs under a [`CallContext`]. Dropping the in-flight
//! future is how a call is aborted; the context turns the two triggers (an elapsed deadline or a
//! fired [`CancellationToken`]) into typed [`TransportError`] values instead of a hang.

// crates.io
use tokio_util::sync::CancellationToken;
// self
use crate::{_prelude::*, error::TransportError};

/// Deadline and cancellation settings for a single call.
#[derive(Clone, Debug, Default)]
pub struct CallContext {
	timeout: Option<StdDuration>,
	cancellation: Option<CancellationToken>,
}
impl CallContext {
	/// Context without a deadline or cancellation signal.
	pub fn new() -> Self {
		Self::default()
	}

	/// Aborts the call once `timeout` elapses.
	pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Aborts the call when `token` is cancelled.
	pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
		self.cancellation = Some(token);

		self
	}

	/// Deadline configured on this context, if any.
	pub fn timeout(&self) -> Option<StdDuration> {
		self.timeout
	}

	/// Cancellation token configured on this context, if any.
	pub fn cancellation(&self) -> Option<&CancellationToken> {
		self.cancellation.as_ref()
	}

	/// Applies `fallback` when the context has no deadline of its own.
	pub fn or_timeout(&self, fallback: Option<StdDuration>) -> Self {
		Self { timeout: self.timeout.or(fallback), cancellation: self.cancellation.clone() }
	}

	/// Drives `fut` to completion unless the deadline elapses or the token fires first.
	pub async fn run<F, T>(&self, fut: F) -> Result<T>
	where
		F: Future<Output = Result<T>>,
	{
		if self.cancellation.as_ref().is_some_and(CancellationToken::is_cancelled) {
			return Err(TransportError::Cancelled.into());
		}

		let guarded = async {
			match &self.cancellation {
				Some(token) => tokio::select! {
					biased;
					_ = token.cancelled() => Err(TransportError::Cancelled.into()),
					out = fut => out,
				},
				None => fut.await,
			}
		};

		match self.timeout {
			Some(limit) => tokio::time::timeout(limit, guarded)
				.await
				.map_err(|_| TransportError::TimedOut { limit: Some(limit) })?,
			None => guarded.await,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn run_passes_results_through() {
		let value = CallContext::new()
			.run(async { Ok(7) })
			.await
			.expect("Context without limits should pass results through.");

		assert_eq!(value, 7);
	}

	#[tokio::test]
	async fn elapsed_deadline_surfaces_timeout() {
		let err = CallContext::new()
			.with_timeout(StdDuration::from_millis(10))
			.run(async {
				tokio::time::sleep(StdDuration::from_secs(5)).await;

				Ok(())
			})
			.await
			.expect_err("Slow future should hit the deadline.");

		assert!(err.is_timeout());
	}

	#[tokio::test]
	async fn fired_token_surfaces_cancellation() {
		let token = CancellationToken::new();
		let ctx = CallContext::new().with_cancellation(token.clone());

		token.cancel();

		let err = ctx
			.run(async { Ok(()) })
			.await
			.expect_err("Pre-cancelled context should refuse to run.");

		assert!(err.is_cancelled());

		let token = CancellationToken::new();
		let ctx = CallContext::new().with_cancellation(token.clone());
		let trigger = async {
			tokio::time::sleep(StdDuration::from_millis(10)).await;
			token.cancel();
		};
		let call = ctx.run(async {
			tokio::time::sleep(StdDuration::from_secs(5)).await;

			Ok(())
		});
		let (_, result) = tokio::join!(trigger, call);

		assert!(result.expect_err("In-flight call should be cancelled.").is_cancelled());
	}

	#[test]
	fn or_timeout_keeps_explicit_deadline() {
		let ctx = CallContext::new().with_timeout(StdDuration::from_secs(1));

		assert_eq!(
			ctx.or_timeout(Some(StdDuration::from_secs(9))).timeout(),
			Some(StdDuration::from_secs(1))
		);
		assert_eq!(
			CallContext::new().or_timeout(Some(StdDuration::from_secs(9))).timeout(),
			Some(StdDuration::from_secs(9))
		);
	}
}
