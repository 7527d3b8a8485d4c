//! Route-guard helpers for consumers of the session state.
//!
//! A guard must never route on `is_authenticated` before `is_initialized`
//! is observed — redirecting while the cached-account enumeration is still
//! in flight would bounce a returning user through the sign-in screen.

use tokio::sync::watch;

use crate::session::SessionSnapshot;

/// Where a guarded route should send the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Initialization is still pending; render nothing and wait.
    Hold,
    /// No session; route to the unauthenticated landing area.
    SignIn,
    /// Active session; route to the authenticated landing area.
    Dashboard,
}

pub fn evaluate(snapshot: &SessionSnapshot) -> RouteDecision {
    if !snapshot.is_initialized {
        RouteDecision::Hold
    } else if snapshot.is_authenticated {
        RouteDecision::Dashboard
    } else {
        RouteDecision::SignIn
    }
}

/// A session-state observer for routing layers.
pub struct RouteGuard {
    rx: watch::Receiver<SessionSnapshot>,
}

impl RouteGuard {
    /// Attach to a manager's subscription (see `SessionManager::subscribe`).
    pub fn new(rx: watch::Receiver<SessionSnapshot>) -> Self {
        Self { rx }
    }

    /// The decision for the currently observed snapshot.
    pub fn decision(&self) -> RouteDecision {
        evaluate(&self.rx.borrow())
    }

    /// Wait until the session is initialized and return that snapshot.
    ///
    /// Returns the latest observed snapshot if the session manager goes
    /// away before initializing.
    pub async fn wait_initialized(&mut self) -> SessionSnapshot {
        loop {
            {
                let snapshot = self.rx.borrow_and_update();
                if snapshot.is_initialized {
                    return snapshot.clone();
                }
            }
            if self.rx.changed().await.is_err() {
                return self.rx.borrow().clone();
            }
        }
    }
}
