// self
use crate::obs::{OperationKind, Outcome};

/// Records an operation outcome via the global metrics recorder (when enabled).
pub fn record_outcome(kind: OperationKind, outcome: Outcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"megaport_operation_total",
			"operation" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Counts payloads that decoded into the opaque fallback variant.
pub fn record_decode_fallback(discriminator: &'static str) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("megaport_decode_fallback_total", "discriminator" => discriminator)
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = discriminator;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recorders_noop_without_metrics() {
		record_outcome(OperationKind::Authorize, Outcome::Failure);
		record_decode_fallback("connectType");
	}
}
