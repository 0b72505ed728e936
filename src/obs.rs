//! Optional observability helpers for identity lookups.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `identity_resolver.fetch` with the `fetch`
//!   (endpoint) and `stage` (call site) fields, plus a warning whenever a roles failure is
//!   discarded.
//! - Enable `metrics` to increment the `identity_resolver_fetch_total` counter for every
//!   attempt/success/failure, labeled by `fetch` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Identity lookup kinds observed by the resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FetchKind {
	/// Profile endpoint lookup.
	Profile,
	/// Authorization endpoint roles lookup.
	Roles,
}
impl FetchKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FetchKind::Profile => "profile",
			FetchKind::Roles => "roles",
		}
	}
}
impl Display for FetchKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FetchOutcome {
	/// Entry to a lookup helper.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure surfaced to the resolver.
	Failure,
}
impl FetchOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FetchOutcome::Attempt => "attempt",
			FetchOutcome::Success => "success",
			FetchOutcome::Failure => "failure",
		}
	}
}
impl Display for FetchOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
