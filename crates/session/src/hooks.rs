//! Host-supplied session lifecycle callbacks

use std::future::Future;
use std::pin::Pin;

use crate::credentials::Credentials;
use crate::error::Result;

/// Session lifecycle hooks consumed by the refresh coordinator.
///
/// The host owns token storage and the actual network exchange; the
/// coordinator only sequences the calls:
/// - `refresh` runs at most once per failure wave (single-flight)
/// - `login` runs once after each successful refresh, before any queued
///   operation is resumed
/// - `logout` runs once when a refresh fails, after the pending queue has
///   been released
///
/// Uses `Pin<Box<dyn Future>>` return types for dyn-compatibility
/// (`Arc<dyn SessionHooks>`).
pub trait SessionHooks: Send + Sync {
    /// Perform the network exchange that obtains new credentials.
    ///
    /// Responsible for its own timeout/backoff; the coordinator imposes
    /// none and simply waits for the call to settle.
    fn refresh(&self) -> Pin<Box<dyn Future<Output = Result<Credentials>> + Send + '_>>;

    /// Persist newly obtained credentials.
    fn login<'a>(
        &'a self,
        refresh_token: &'a str,
        access_token: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

    /// Terminate the session: clear stored credentials and notify the rest
    /// of the application.
    fn logout(&self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}
