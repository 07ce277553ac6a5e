//! Authentication guard in front of the protected screens.

use tokio::sync::watch;

use super::SessionStore;
use crate::domain::entities::Session;

/// What the gate knows about the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// A token exists but the backend has not confirmed it yet.
    Unknown,
    /// No token.
    Unauthenticated,
    /// Token confirmed.
    Authenticated,
}

impl GateState {
    /// Derives the gate state from a session snapshot.
    #[must_use]
    pub const fn from_session(session: &Session) -> Self {
        if session.is_authenticated() {
            Self::Authenticated
        } else if session.has_token() {
            Self::Unknown
        } else {
            Self::Unauthenticated
        }
    }
}

/// Navigation targets the router understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Token entry screen.
    Login,
    /// Protected application surface.
    Home,
}

/// Result of passing protected content through the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome<T> {
    /// Show a transitional loading indicator.
    Loading,
    /// Hand control to the router.
    Redirect(Route),
    /// Show the protected content.
    Render(T),
}

/// Read-only guard over the session store.
#[derive(Debug, Clone)]
pub struct AuthGate {
    session: watch::Receiver<Session>,
}

impl AuthGate {
    /// Creates a gate observing `store`.
    #[must_use]
    pub fn new(store: &SessionStore) -> Self {
        Self {
            session: store.subscribe(),
        }
    }

    /// Returns the current gate state.
    #[must_use]
    pub fn state(&self) -> GateState {
        GateState::from_session(&self.session.borrow())
    }

    /// Builds the protected content only when the session is authenticated.
    pub fn guard<T>(&self, children: impl FnOnce() -> T) -> GateOutcome<T> {
        match self.state() {
            GateState::Unknown => GateOutcome::Loading,
            GateState::Unauthenticated => GateOutcome::Redirect(Route::Login),
            GateState::Authenticated => GateOutcome::Render(children()),
        }
    }

    /// Waits for the next session change and returns the new state.
    ///
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<GateState> {
        self.session.changed().await.ok()?;
        let state = GateState::from_session(&self.session.borrow_and_update());
        Some(state)
    }
}
