//! Single-flight refresh coordination
//!
//! At most one refresh runs at any time. The first operation that fails
//! with a credential error becomes the lead and drives the refresh;
//! operations failing while it is outstanding park on the pending queue and
//! resume in arrival order once the refresh settles. A failed refresh
//! terminates the session: the queue is released without retries, the
//! logout hook runs, and every caller is handed back its original failure.
//!
//! The gate (refreshing/terminated flags plus the queue) lives behind one
//! async mutex. Admission happens in a single critical section with no
//! suspension between observing Idle and publishing Refreshing; the lock is
//! never held across a session hook await.

use std::sync::Arc;

use session::{Credentials, Error as SessionError, SessionHooks};
use tokio::sync::{Mutex, oneshot};
use tracing::{debug, info, warn};

use crate::metrics::{record_queued, record_refresh};

/// Refresh gate. `waiters` only grows while `refreshing` is true and is
/// emptied exactly once per refresh cycle. `terminated`, once set, is never
/// unset.
struct Gate {
    refreshing: bool,
    terminated: bool,
    waiters: Vec<oneshot::Sender<Credentials>>,
}

/// How a credential failure enters the refresh cycle.
enum Admission {
    /// First failure of the wave: this caller drives the refresh.
    Lead,
    /// A refresh is already outstanding: wait for its outcome.
    Wait(oneshot::Receiver<Credentials>),
    /// Session terminated: no refresh, the original failure stands.
    Rejected,
}

/// Single-flight coordinator between failing operations and the host's
/// session hooks.
pub struct RefreshCoordinator {
    hooks: Arc<dyn SessionHooks>,
    gate: Mutex<Gate>,
}

impl RefreshCoordinator {
    pub fn new(hooks: Arc<dyn SessionHooks>) -> Self {
        Self {
            hooks,
            gate: Mutex::new(Gate {
                refreshing: false,
                terminated: false,
                waiters: Vec::new(),
            }),
        }
    }

    /// Whether the session has been terminated (refresh failure or external
    /// logout). Terminal: once true, credential failures are ignored.
    pub async fn is_terminated(&self) -> bool {
        self.gate.lock().await.terminated
    }

    /// External logged-out signal from the host.
    ///
    /// An outstanding refresh settles first; its result is then discarded
    /// through the failure path rather than persisted.
    pub async fn terminate(&self) {
        let mut gate = self.gate.lock().await;
        if !gate.terminated {
            gate.terminated = true;
            info!("session marked terminated");
        }
    }

    /// Entry point for a classified credential failure.
    ///
    /// Returns the fresh credentials to retry with, or `None` when the
    /// caller's original failure should stand (session terminated, or the
    /// refresh this caller waited on failed).
    pub async fn recover(&self) -> Option<Credentials> {
        let admission = {
            let mut gate = self.gate.lock().await;
            if gate.terminated {
                Admission::Rejected
            } else if gate.refreshing {
                let (tx, rx) = oneshot::channel();
                gate.waiters.push(tx);
                record_queued();
                Admission::Wait(rx)
            } else {
                // Published inside the critical section so a concurrent
                // failure parks instead of starting a second refresh.
                gate.refreshing = true;
                Admission::Lead
            }
        };

        match admission {
            Admission::Rejected => {
                debug!("credential failure after termination, not refreshing");
                None
            }
            // Sender dropped means the refresh failed and the queue was
            // released; the original failure propagates.
            Admission::Wait(rx) => rx.await.ok(),
            Admission::Lead => self.run_refresh().await,
        }
    }

    /// Drive the single outstanding refresh and settle the queue.
    async fn run_refresh(&self) -> Option<Credentials> {
        debug!("starting credential refresh");
        let outcome = match self.hooks.refresh().await {
            Ok(credentials) => {
                if self.is_terminated().await {
                    // The host logged out while the refresh was in flight;
                    // the new tokens must not be stored.
                    Err(SessionError::SessionTerminated)
                } else {
                    self.hooks
                        .login(&credentials.refresh_token, &credentials.access_token)
                        .await
                        .map(|()| credentials)
                }
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(credentials) => {
                let waiters = {
                    let mut gate = self.gate.lock().await;
                    gate.refreshing = false;
                    std::mem::take(&mut gate.waiters)
                };
                let resumed = waiters.len();
                for waiter in waiters {
                    // A waiter whose caller went away is not an error.
                    let _ = waiter.send(credentials.clone());
                }
                record_refresh("success");
                info!(resumed, "credential refresh succeeded");
                Some(credentials)
            }
            Err(e) => {
                let released = {
                    let mut gate = self.gate.lock().await;
                    gate.refreshing = false;
                    gate.terminated = true;
                    // Dropping the senders resolves every parked waiter
                    // with no credentials.
                    std::mem::take(&mut gate.waiters).len()
                };
                if let Err(logout_err) = self.hooks.logout().await {
                    warn!(error = %logout_err, "logout hook failed while terminating session");
                }
                record_refresh("failure");
                warn!(error = %e, released, "credential refresh failed, session terminated");
                None
            }
        }
    }
}
