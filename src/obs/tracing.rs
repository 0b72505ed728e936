// self
use crate::{_prelude::*, obs::FetchKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFetch<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFetch<F> = F;

/// A span builder used by identity lookups.
#[derive(Clone, Debug)]
pub struct FetchSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FetchSpan {
	/// Creates a new span tagged with the provided lookup kind + stage.
	pub fn new(kind: FetchKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("identity_resolver.fetch", fetch = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFetch<Fut>
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

/// Logs a roles lookup failure that the resolver is about to discard (when enabled).
pub fn warn_roles_discarded(error: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(error = %error, "Discarding roles lookup failure; identity is kept.");
	}

	#[cfg(not(feature = "tracing"))]
	{
		let _ = error;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn warn_roles_discarded_noop_without_tracing() {
		use crate::error::MissingFieldError;

		let _span = FetchSpan::new(FetchKind::Roles, "test");

		warn_roles_discarded(&Error::MissingField(MissingFieldError { field: "sub" }));
	}

	#[cfg(feature = "tracing")]
	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = FetchSpan::new(FetchKind::Profile, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
