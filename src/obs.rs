//! Optional observability helpers for token and API operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `megaport.operation` with the `operation`
//!   and `stage` (call site) fields, plus debug events when the variant decoder falls back to an
//!   opaque payload.
//! - Enable `metrics` to increment the `megaport_operation_total` counter for every
//!   attempt/reuse/success/failure, labeled by `operation` + `outcome`, and the
//!   `megaport_decode_fallback_total` counter labeled by `discriminator`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
	/// Bearer token lookup or client-credentials exchange.
	Authorize,
	/// Authenticated resource API request.
	ApiRequest,
}
impl OperationKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationKind::Authorize => "authorize",
			OperationKind::ApiRequest => "api_request",
		}
	}
}
impl Display for OperationKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// Entry to an operation.
	Attempt,
	/// A cached bearer token satisfied the call without a network exchange.
	Reused,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl Outcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Reused => "reused",
			Outcome::Success => "success",
			Outcome::Failure => "failure",
		}
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
