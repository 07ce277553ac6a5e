//! Process-wide session state.
//!
//! One [`SessionStore`] is created at boot and shared behind an `Arc`. It is
//! hydrated from persisted credentials by the hydrate use case, moved between
//! states by the validate/login/logout use cases, and observed by everybody
//! else through [`SessionStore::subscribe`]. Logout clears it back to the
//! anonymous session.

use tokio::sync::watch;
use tracing::debug;

use crate::domain::entities::{Session, SessionToken};

/// Shared, observable holder of the current [`Session`].
#[derive(Debug)]
pub struct SessionStore {
    tx: watch::Sender<Session>,
}

impl SessionStore {
    /// Creates a store with an anonymous session.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Session::anonymous());
        Self { tx }
    }

    /// Returns a receiver notified on every session change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }

    /// Returns a snapshot of the current session.
    #[must_use]
    pub fn current(&self) -> Session {
        self.tx.borrow().clone()
    }

    /// Installs a persisted token that still has to be validated.
    pub fn hydrate(&self, token: SessionToken) {
        debug!(token = %token, "Hydrating session from persisted token");
        self.tx.send_replace(Session::pending(token));
    }

    /// Marks `token` as accepted. Returns false unless `token` is still the
    /// pending one.
    pub fn mark_validated(&self, token: &SessionToken) -> bool {
        self.tx.send_if_modified(|session| {
            if !Self::is_pending(session, token) {
                return false;
            }
            *session = Session::authenticated(token.clone());
            true
        })
    }

    /// Drops `token` after the backend refused it. Returns false, leaving the
    /// session alone, unless `token` is still the pending one.
    pub fn mark_rejected(&self, token: &SessionToken) -> bool {
        self.tx.send_if_modified(|session| {
            if !Self::is_pending(session, token) {
                return false;
            }
            debug!("Session token rejected, clearing session");
            *session = Session::anonymous();
            true
        })
    }

    fn is_pending(session: &Session, token: &SessionToken) -> bool {
        !session.is_authenticated() && session.token() == Some(token)
    }

    /// Installs a freshly validated token.
    pub fn login(&self, token: SessionToken) {
        self.tx.send_replace(Session::authenticated(token));
    }

    /// Tears the session down.
    pub fn logout(&self) {
        debug!("Clearing session");
        self.tx.send_replace(Session::anonymous());
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> SessionToken {
        SessionToken::new_unchecked("abc")
    }

    #[test]
    fn test_starts_anonymous() {
        let store = SessionStore::new();
        assert_eq!(store.current(), Session::anonymous());
    }

    #[test]
    fn test_hydrate_then_validate() {
        let store = SessionStore::new();
        store.hydrate(token());

        assert!(store.current().has_token());
        assert!(!store.current().is_authenticated());

        assert!(store.mark_validated(&token()));
        assert!(store.current().is_authenticated());
    }

    #[test]
    fn test_validate_without_token_is_ignored() {
        let store = SessionStore::new();
        assert!(!store.mark_validated(&token()));
        assert!(!store.current().is_authenticated());
    }

    #[test]
    fn test_rejection_clears_token() {
        let store = SessionStore::new();
        store.hydrate(token());

        assert!(store.mark_rejected(&token()));
        assert!(!store.current().has_token());
    }

    #[test]
    fn test_stale_rejection_keeps_newer_login() {
        let store = SessionStore::new();
        store.hydrate(token());

        let fresh = SessionToken::new_unchecked("fresh-login-token");
        store.login(fresh.clone());

        assert!(!store.mark_rejected(&token()));
        assert!(!store.mark_validated(&token()));
        assert_eq!(store.current(), Session::authenticated(fresh));
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();

        store.login(token());

        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_authenticated());

        store.logout();

        rx.changed().await.unwrap();
        assert!(!rx.borrow_and_update().has_token());
    }
}
