//! Client assembly
//!
//! Wires the pipeline the way a host application would: refresh link on
//! the outside, auth link next, HTTP transport terminal. The host's
//! session hooks are wrapped so a successful login also updates the shared
//! token slot and a logout clears it — subsequent operations then carry
//! the rotated token without any caller involvement.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use pipeline::{ExecutionResult, Link, LinkChain, Operation, Transport};
use refresh_link::{RefreshCoordinator, RefreshLink};
use session::{Credentials, SessionHooks};
use tracing::debug;

use crate::auth::{AuthLink, TokenSlot};
use crate::cache::CacheStore;
use crate::config::ClientConfig;
use crate::http::HttpTransport;

/// `SessionHooks` adapter keeping the token slot in sync with the host's
/// hooks.
struct SlotHooks {
    inner: Arc<dyn SessionHooks>,
    slot: TokenSlot,
}

impl SessionHooks for SlotHooks {
    fn refresh(&self) -> Pin<Box<dyn Future<Output = session::Result<Credentials>> + Send + '_>> {
        self.inner.refresh()
    }

    fn login<'a>(
        &'a self,
        refresh_token: &'a str,
        access_token: &'a str,
    ) -> Pin<Box<dyn Future<Output = session::Result<()>> + Send + 'a>> {
        Box::pin(async move {
            self.inner.login(refresh_token, access_token).await?;
            self.slot.set(access_token.to_owned()).await;
            Ok(())
        })
    }

    fn logout(&self) -> Pin<Box<dyn Future<Output = session::Result<()>> + Send + '_>> {
        Box::pin(async move {
            let result = self.inner.logout().await;
            // Cleared even when the host hook fails; a half-logged-out
            // session must not keep authenticating.
            self.slot.clear().await;
            result
        })
    }
}

/// Assembled refresh-aware client.
pub struct Client {
    chain: LinkChain,
    coordinator: Arc<RefreshCoordinator>,
    token: TokenSlot,
    cache_key: String,
    cache: Option<Arc<CacheStore>>,
}

impl Client {
    /// Build a client with the standard HTTP transport.
    pub fn new(config: &ClientConfig, hooks: Arc<dyn SessionHooks>) -> Self {
        let transport = Arc::new(HttpTransport::new(
            reqwest::Client::new(),
            config.api_uri.clone(),
            Duration::from_secs(config.timeout_secs),
        ));
        Self::with_transport(config, hooks, transport)
    }

    /// Build a client over a custom terminal transport.
    pub fn with_transport(
        config: &ClientConfig,
        hooks: Arc<dyn SessionHooks>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let token = TokenSlot::new();
        let hooks: Arc<dyn SessionHooks> = Arc::new(SlotHooks {
            inner: hooks,
            slot: token.clone(),
        });
        let coordinator = Arc::new(RefreshCoordinator::new(hooks));
        let links: Vec<Arc<dyn Link>> = vec![
            Arc::new(RefreshLink::new(coordinator.clone())),
            Arc::new(AuthLink::new(token.clone())),
        ];
        Self {
            chain: LinkChain::new(links, transport),
            coordinator,
            token,
            cache_key: config.cache_key.clone(),
            cache: None,
        }
    }

    /// Attach a persistence store for cache snapshots.
    pub fn with_cache_store(mut self, store: Arc<CacheStore>) -> Self {
        self.cache = Some(store);
        self
    }

    /// Seed the token slot, e.g. from stored credentials at startup.
    pub async fn set_access_token(&self, access_token: String) {
        self.token.set(access_token).await;
    }

    /// Run one operation through the assembled chain.
    pub async fn execute(&self, operation: Operation) -> pipeline::Result<ExecutionResult> {
        self.chain.execute(operation).await
    }

    /// Host-side logout signal: no further refreshes, token slot cleared.
    /// An outstanding refresh settles first and is then discarded.
    pub async fn terminate(&self) {
        self.coordinator.terminate().await;
        self.token.clear().await;
    }

    pub async fn is_terminated(&self) -> bool {
        self.coordinator.is_terminated().await
    }

    /// Persist a cache snapshot under the configured cache key.
    pub async fn persist_cache(&self, snapshot: serde_json::Value) -> crate::Result<()> {
        match &self.cache {
            Some(store) => store.put(self.cache_key.clone(), snapshot).await,
            None => {
                debug!("cache persistence not configured");
                Ok(())
            }
        }
    }

    /// Restore the snapshot stored under the configured cache key.
    pub async fn restore_cache(&self) -> Option<serde_json::Value> {
        match &self.cache {
            Some(store) => store.get(&self.cache_key).await,
            None => None,
        }
    }
}
