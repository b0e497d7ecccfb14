//! Request pipeline abstraction
//!
//! Defines the `Link` trait that decouples middleware from the transport.
//! A chain is an ordered list of links terminated by a `Transport`; each
//! link receives the operation plus a `NextLink` forward capability and may
//! rewrite the operation, pass it on, or re-forward it after inspecting the
//! result. This is the seam the credential-refresh middleware plugs into;
//! the crate itself carries no policy.
//!
//! Execution flow:
//! 1. `LinkChain::execute(operation)` hands the operation to the first link
//! 2. Each link calls `next.forward(operation)` to continue down the chain
//! 3. The terminal `Transport` delivers the operation and yields an
//!    `ExecutionResult` (data and/or operation errors) or a transport error
//! 4. Results travel back up through the links, which may act on them
//!    (e.g. retry the operation via another `forward` call)

pub mod operation;
pub mod result;

pub use operation::Operation;
pub use result::{ErrorExtensions, ExceptionDetails, ExecutionResult, OperationError};

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Errors from pipeline execution.
///
/// Transport failures are distinct from operation errors: an operation that
/// reached the server and came back with an error batch is an
/// `Ok(ExecutionResult)` whose `errors` is non-empty. Only delivery
/// failures surface here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("invalid header value: {0}")]
    InvalidHeader(String),
}

/// Result alias for pipeline execution.
pub type Result<T> = std::result::Result<T, Error>;

/// A middleware stage in the request pipeline.
///
/// Uses `Pin<Box<dyn Future>>` return types for dyn-compatibility
/// (`Arc<dyn Link>` in the chain).
pub trait Link: Send + Sync {
    /// Process one operation. The link decides whether and how often to
    /// call `next.forward(...)`; forwarding consumes an operation, so links
    /// that may retry keep a clone.
    fn request(
        &self,
        operation: Operation,
        next: NextLink,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionResult>> + Send + '_>>;
}

/// Terminal stage: delivers the operation and produces its result.
///
/// Assumed reliable in the sense of the pipeline contract: it either
/// returns an `ExecutionResult` (possibly carrying operation errors) or a
/// structured transport error. It never hangs a caller indefinitely.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        operation: Operation,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionResult>> + Send + '_>>;
}

/// Forward capability handed to each link.
///
/// Cloneable and cheap (three `Arc` clones); a link may hold onto it and
/// forward the same operation again later, which is how retries re-enter
/// the downstream portion of the chain.
#[derive(Clone)]
pub struct NextLink {
    links: Arc<[Arc<dyn Link>]>,
    transport: Arc<dyn Transport>,
    index: usize,
}

impl NextLink {
    /// Forward capability that dispatches straight to a transport, with no
    /// intermediate links. Lets a link run standalone (and makes links
    /// testable without assembling a chain).
    pub fn terminal(transport: Arc<dyn Transport>) -> Self {
        Self {
            links: Vec::new().into(),
            transport,
            index: 0,
        }
    }

    /// Resume the operation down the pipeline: the next link if one
    /// remains, otherwise the terminal transport.
    pub fn forward(
        &self,
        operation: Operation,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionResult>> + Send + 'static>> {
        let next = self.clone();
        Box::pin(async move {
            match next.links.get(next.index).cloned() {
                Some(link) => {
                    let rest = NextLink {
                        links: next.links.clone(),
                        transport: next.transport.clone(),
                        index: next.index + 1,
                    };
                    link.request(operation, rest).await
                }
                None => next.transport.execute(operation).await,
            }
        })
    }
}

/// An assembled pipeline: ordered links plus the terminal transport.
pub struct LinkChain {
    links: Arc<[Arc<dyn Link>]>,
    transport: Arc<dyn Transport>,
}

impl LinkChain {
    pub fn new(links: Vec<Arc<dyn Link>>, transport: Arc<dyn Transport>) -> Self {
        Self {
            links: links.into(),
            transport,
        }
    }

    /// Run one operation through the full chain.
    pub async fn execute(&self, operation: Operation) -> Result<ExecutionResult> {
        NextLink {
            links: self.links.clone(),
            transport: self.transport.clone(),
            index: 0,
        }
        .forward(operation)
        .await
    }
}
