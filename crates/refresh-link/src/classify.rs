//! Credential-expiry classification for failed operations
//!
//! Distinguishes credential failures (expired/invalid token) from unrelated
//! application errors. Only credential failures enter the refresh
//! coordinator; everything else propagates to the caller untouched.

use pipeline::OperationError;

/// Exception names that mark an expired or invalid credential.
const EXPIRY_EXCEPTION_NAMES: &[&str] = &["JsonWebTokenError", "TokenExpiredError"];

/// Message prefix the authorization layer uses when it rejects access.
const ACCESS_DENIED_PREFIX: &str = "Access denied!";

/// Host-supplied classification predicate. When present it replaces the
/// default policy entirely; the two are never combined.
pub type ClassifyFn = dyn Fn(&OperationError) -> bool + Send + Sync;

/// Default policy: the error carries a known expiry exception name, or its
/// message starts with the access-denied prefix.
pub fn is_credential_error(error: &OperationError) -> bool {
    if let Some(name) = error.exception_name() {
        if EXPIRY_EXCEPTION_NAMES.contains(&name) {
            return true;
        }
    }
    error.message.starts_with(ACCESS_DENIED_PREFIX)
}

/// Classify a batch of operation errors.
///
/// The batch matches if any single error matches (first match wins; the
/// scan preserves batch order). An empty batch never matches.
pub fn batch_matches(errors: &[OperationError], custom: Option<&ClassifyFn>) -> bool {
    match custom {
        Some(predicate) => errors.iter().any(|error| predicate(error)),
        None => errors.iter().any(is_credential_error),
    }
}
