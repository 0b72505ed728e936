// self
use crate::obs::{FetchKind, FetchOutcome};

/// Records a lookup outcome via the global metrics recorder (when enabled).
pub fn record_fetch_outcome(kind: FetchKind, outcome: FetchOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"identity_resolver_fetch_total",
			"fetch" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}
