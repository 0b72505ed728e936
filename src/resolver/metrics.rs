// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for identity lookups.
#[derive(Debug, Default)]
pub struct ResolveMetrics {
	cache_hits: AtomicU64,
	profile_fetches: AtomicU64,
	profile_failures: AtomicU64,
	roles_discards: AtomicU64,
}
impl ResolveMetrics {
	/// Returns the number of resolutions answered from the session cache.
	pub fn cache_hits(&self) -> u64 {
		self.cache_hits.load(Ordering::Relaxed)
	}

	/// Returns the number of profile endpoint lookups issued.
	pub fn profile_fetches(&self) -> u64 {
		self.profile_fetches.load(Ordering::Relaxed)
	}

	/// Returns the number of profile endpoint lookups that failed.
	pub fn profile_failures(&self) -> u64 {
		self.profile_failures.load(Ordering::Relaxed)
	}

	/// Returns the number of roles lookup failures that were discarded.
	pub fn roles_discards(&self) -> u64 {
		self.roles_discards.load(Ordering::Relaxed)
	}

	pub(crate) fn record_cache_hit(&self) {
		self.cache_hits.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_profile_fetch(&self) {
		self.profile_fetches.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_profile_failure(&self) {
		self.profile_failures.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_roles_discard(&self) {
		self.roles_discards.fetch_add(1, Ordering::Relaxed);
	}
}
