//! Transparent credential-refresh middleware for the request pipeline
//!
//! Recovers expired-credential failures without surfacing them to the
//! caller and without duplicating refresh work under concurrency.
//!
//! Recovery flow:
//! 1. An operation comes back with an error batch → the classifier checks
//!    it for credential-expiry markers (or a host-supplied predicate)
//! 2. First credential failure while the session is healthy → the
//!    coordinator starts the single refresh
//! 3. Credential failures arriving while that refresh is outstanding →
//!    parked on the pending queue
//! 4. Refresh succeeds → the login hook persists the new tokens, the queue
//!    drains in arrival order, and every parked operation retries with the
//!    new bearer token
//! 5. Refresh fails → the queue is released without retries, the logout
//!    hook runs, and each caller gets its original failure back; the
//!    session stays terminated and later credential failures pass through
//!    untouched

pub mod classify;
pub mod coordinator;
pub mod link;
mod metrics;
mod retry;

pub use classify::{batch_matches, is_credential_error};
pub use coordinator::RefreshCoordinator;
pub use link::RefreshLink;
