//! The refresh link: classification, recovery, resume
//!
//! Sits between the caller and the rest of the chain. Results that carry a
//! credential-expiry error batch enter the coordinator; everything else —
//! clean results, unrelated operation errors, transport failures — passes
//! through untouched. The link holds no per-operation state; a clone of
//! the pre-failure operation is what gets re-forwarded on recovery.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use pipeline::{ExecutionResult, Link, NextLink, Operation, OperationError};
use tracing::debug;

use crate::classify::{self, ClassifyFn};
use crate::coordinator::RefreshCoordinator;
use crate::retry;

/// Pipeline middleware that transparently recovers credential failures.
pub struct RefreshLink {
    coordinator: Arc<RefreshCoordinator>,
    classify: Option<Box<ClassifyFn>>,
}

impl RefreshLink {
    /// Build a link using the default classification policy.
    pub fn new(coordinator: Arc<RefreshCoordinator>) -> Self {
        Self {
            coordinator,
            classify: None,
        }
    }

    /// Replace the default classification policy with a host-supplied
    /// predicate. The predicate fully overrides the default; the two are
    /// never combined.
    pub fn with_classifier(
        mut self,
        predicate: impl Fn(&OperationError) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.classify = Some(Box::new(predicate));
        self
    }
}

impl Link for RefreshLink {
    fn request(
        &self,
        operation: Operation,
        next: NextLink,
    ) -> Pin<Box<dyn Future<Output = pipeline::Result<ExecutionResult>> + Send + '_>> {
        Box::pin(async move {
            // Transport failures propagate via `?` — only operation errors
            // are candidates for credential recovery.
            let original = next.forward(operation.clone()).await?;
            if !original.has_errors() {
                return Ok(original);
            }
            if !classify::batch_matches(&original.errors, self.classify.as_deref()) {
                return Ok(original);
            }

            debug!(operation = operation.id(), "credential failure detected");
            let credentials = self.coordinator.recover().await;
            retry::resume(&next, operation, credentials, original).await
        })
    }
}
