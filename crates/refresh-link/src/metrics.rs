//! Refresh metrics exposition
//!
//! Counters recorded through the `metrics` facade:
//!
//! - `session_refresh_total` (counter): label `outcome` = `success` | `failure`
//! - `session_refresh_queued_total` (counter): operations parked while a
//!   refresh was outstanding
//!
//! Without an installed recorder these are no-ops, so library users who
//! don't wire up metrics pay nothing.

/// Record a settled refresh cycle.
pub(crate) fn record_refresh(outcome: &str) {
    metrics::counter!("session_refresh_total", "outcome" => outcome.to_string()).increment(1);
}

/// Record an operation parked on the pending queue.
pub(crate) fn record_queued() {
    metrics::counter!("session_refresh_queued_total").increment(1);
}
