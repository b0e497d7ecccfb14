//! Current-credential attachment
//!
//! `TokenSlot` holds the access token most recently persisted by the login
//! hook; `AuthLink` stamps it onto outgoing operations as a bearer header.
//! An operation that already carries an authorization header keeps it —
//! the refresh path rewrites that header explicitly after a token
//! rotation, and this link must not clobber it.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use common::Secret;
use pipeline::{ExecutionResult, Link, NextLink, Operation};
use reqwest::header::{AUTHORIZATION, HeaderValue};
use tokio::sync::RwLock;
use tracing::warn;

/// Shared slot for the session's current access token.
///
/// Written on login (set) and logout (clear); read by `AuthLink` on every
/// outgoing operation. The token is held as a `Secret` so it never leaks
/// through Debug output.
#[derive(Clone, Default)]
pub struct TokenSlot {
    inner: Arc<RwLock<Option<Secret<String>>>>,
}

impl TokenSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, access_token: String) {
        *self.inner.write().await = Some(Secret::new(access_token));
    }

    pub async fn clear(&self) {
        *self.inner.write().await = None;
    }

    /// The current token formatted as a bearer header value.
    pub async fn bearer(&self) -> Option<String> {
        self.inner
            .read()
            .await
            .as_ref()
            .map(|token| format!("Bearer {}", token.expose()))
    }
}

/// Link that attaches the current access token to outgoing operations.
pub struct AuthLink {
    slot: TokenSlot,
}

impl AuthLink {
    pub fn new(slot: TokenSlot) -> Self {
        Self { slot }
    }
}

impl Link for AuthLink {
    fn request(
        &self,
        mut operation: Operation,
        next: NextLink,
    ) -> Pin<Box<dyn Future<Output = pipeline::Result<ExecutionResult>> + Send + '_>> {
        Box::pin(async move {
            if !operation.headers().contains_key(AUTHORIZATION) {
                if let Some(bearer) = self.slot.bearer().await {
                    match HeaderValue::from_str(&bearer) {
                        Ok(value) => {
                            operation.headers_mut().insert(AUTHORIZATION, value);
                        }
                        Err(e) => {
                            warn!(error = %e, "skipping unusable access token value");
                        }
                    }
                }
            }
            next.forward(operation).await
        })
    }
}
