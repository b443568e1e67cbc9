//! Identity boundary
//!
//! The authentication service itself is external; this module defines what
//! the client core needs from it: the current identity, and a way to hear
//! about changes.

use freshcart_domain::UserId;
use tokio::sync::watch;

/// Source of the current signed-in identity
pub trait IdentityProvider: Send + Sync {
    /// The currently signed-in user, if any
    fn current(&self) -> Option<UserId>;

    /// Subscribe to identity changes. The receiver yields the new identity
    /// (or `None` on sign-out) after each change.
    fn subscribe(&self) -> watch::Receiver<Option<UserId>>;
}

/// Channel-backed identity session
///
/// Holds the signed-in identity in a `watch` channel so any number of
/// consumers can observe sign-in and sign-out. Suitable for embedding behind
/// a real authentication client and for driving tests.
#[derive(Debug)]
pub struct AuthSession {
    sender: watch::Sender<Option<UserId>>,
}

impl AuthSession {
    /// Create a signed-out session
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }

    /// Create a session already signed in as `user`
    #[must_use]
    pub fn signed_in(user: UserId) -> Self {
        let (sender, _) = watch::channel(Some(user));
        Self { sender }
    }

    /// Sign in as `user`
    pub fn sign_in(&self, user: UserId) {
        self.sender.send_replace(Some(user));
    }

    /// Sign out
    pub fn sign_out(&self) {
        self.sender.send_replace(None);
    }
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProvider for AuthSession {
    fn current(&self) -> Option<UserId> {
        *self.sender.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<Option<UserId>> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_tracks_sign_in_and_out() {
        let session = AuthSession::new();
        assert_eq!(session.current(), None);

        let user = UserId::new();
        session.sign_in(user);
        assert_eq!(session.current(), Some(user));

        session.sign_out();
        assert_eq!(session.current(), None);
    }

    #[tokio::test]
    async fn subscribers_observe_changes() {
        let session = AuthSession::new();
        let mut receiver = session.subscribe();

        let user = UserId::new();
        session.sign_in(user);

        receiver.changed().await.unwrap();
        assert_eq!(*receiver.borrow(), Some(user));
    }

    #[test]
    fn sign_in_works_without_subscribers() {
        // send_replace must not depend on a live receiver
        let session = AuthSession::new();
        session.sign_in(UserId::new());
        assert!(session.current().is_some());
    }
}
