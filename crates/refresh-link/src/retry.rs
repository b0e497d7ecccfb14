//! Resume policy for operations that failed with a credential error
//!
//! Once the coordinator settles, each operation is either re-issued with
//! the fresh access token attached or handed back its original failure.
//! Stateless; the header rewrite and the forward call are its only effects.

use pipeline::{ExecutionResult, NextLink, Operation};
use session::Credentials;
use tracing::debug;

/// Resume one operation after the refresh cycle has settled.
///
/// With credentials, the authorization header is rewritten to the new
/// bearer token (replacing any previous value, all other headers preserved)
/// and the operation is forwarded again; the retried result replaces the
/// original. Without credentials the original failed result stands and the
/// operation is not forwarded.
pub(crate) async fn resume(
    next: &NextLink,
    mut operation: Operation,
    credentials: Option<Credentials>,
    original: ExecutionResult,
) -> pipeline::Result<ExecutionResult> {
    match credentials {
        Some(credentials) => {
            operation.set_bearer_token(&credentials.access_token)?;
            debug!(operation = operation.id(), "retrying with refreshed credentials");
            next.forward(operation).await
        }
        None => Ok(original),
    }
}
