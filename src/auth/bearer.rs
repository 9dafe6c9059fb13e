//! Bearer token value object and its validity rules.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Short-lived access token attached to every resource request.
///
/// Tokens are immutable once issued; the token manager replaces them wholesale on refresh so the
/// value and its expiry always travel together.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken {
	value: TokenSecret,
	expires_at: OffsetDateTime,
}
impl BearerToken {
	/// Creates a token that stops being valid at `expires_at`.
	pub fn new(value: impl Into<String>, expires_at: OffsetDateTime) -> Self {
		Self { value: TokenSecret::new(value), expires_at }
	}

	/// Creates a token that expires `expires_in` after `issued_at`.
	pub fn issued(value: impl Into<String>, issued_at: OffsetDateTime, expires_in: Duration) -> Self {
		Self::new(value, issued_at + expires_in)
	}

	/// Returns the redacted token value.
	pub fn value(&self) -> &TokenSecret {
		&self.value
	}

	/// Instant at which the token stops being usable.
	pub fn expires_at(&self) -> OffsetDateTime {
		self.expires_at
	}

	/// A token is reusable only while `instant` is strictly before its expiry.
	pub fn is_valid_at(&self, instant: OffsetDateTime) -> bool {
		instant < self.expires_at
	}

	/// Convenience helper that checks validity against the current UTC clock.
	pub fn is_valid(&self) -> bool {
		self.is_valid_at(OffsetDateTime::now_utc())
	}

	/// Remaining lifetime at `instant`; zero once expired.
	pub fn remaining_at(&self, instant: OffsetDateTime) -> Duration {
		let remaining = self.expires_at - instant;

		if remaining.is_negative() { Duration::ZERO } else { remaining }
	}

	/// `Authorization` header value for resource requests.
	pub fn authorization_header(&self) -> String {
		format!("Bearer {}", self.value.expose())
	}
}
impl Debug for BearerToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("BearerToken")
			.field("value", &"<redacted>")
			.field("expires_at", &self.expires_at)
			.finish()
	}
}
