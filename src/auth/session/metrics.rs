// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for token refreshes and optimistic retries.
#[derive(Debug, Default)]
pub struct SessionMetrics {
	refresh_attempts: AtomicU64,
	refresh_successes: AtomicU64,
	refresh_failures: AtomicU64,
	unauthorized_retries: AtomicU64,
}
impl SessionMetrics {
	/// Returns the number of token endpoint calls issued.
	pub fn refresh_attempts(&self) -> u64 {
		self.refresh_attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of refreshes that installed a new token.
	pub fn refresh_successes(&self) -> u64 {
		self.refresh_successes.load(Ordering::Relaxed)
	}

	/// Returns the number of failed refreshes.
	pub fn refresh_failures(&self) -> u64 {
		self.refresh_failures.load(Ordering::Relaxed)
	}

	/// Returns how many calls were retried after a `401`.
	pub fn unauthorized_retries(&self) -> u64 {
		self.unauthorized_retries.load(Ordering::Relaxed)
	}

	pub(crate) fn record_refresh_attempt(&self) {
		self.refresh_attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_refresh_success(&self) {
		self.refresh_successes.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_refresh_failure(&self) {
		self.refresh_failures.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_unauthorized_retry(&self) {
		self.unauthorized_retries.fetch_add(1, Ordering::Relaxed);
	}
}
