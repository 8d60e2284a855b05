//! Login session state

use crate::events::EventStream;
use parking_lot::Mutex;

#[derive(Debug, Default)]
struct Session {
    logged_in: bool,
    name: Option<String>,
}

/// Current login state with a change stream
///
/// `changes` emits the new logged-in flag on every real transition; setting
/// the state it already has emits nothing.
#[derive(Debug, Default)]
pub struct AuthState {
    session: Mutex<Session>,
    changes: EventStream<bool>,
}

impl AuthState {
    /// Create logged-out state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state for an already logged-in user
    #[must_use]
    pub fn logged_in(name: impl Into<String>) -> Self {
        Self {
            session: Mutex::new(Session {
                logged_in: true,
                name: Some(name.into()),
            }),
            changes: EventStream::new(),
        }
    }

    /// Check if a user is logged in
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.session.lock().logged_in
    }

    /// Display name of the logged-in user
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.session.lock().name.clone()
    }

    /// Login transitions
    #[inline]
    #[must_use]
    pub fn changes(&self) -> &EventStream<bool> {
        &self.changes
    }

    /// Record a successful login
    pub fn set_logged_in(&self, name: impl Into<String>) {
        let changed = {
            let mut session = self.session.lock();
            session.name = Some(name.into());
            !std::mem::replace(&mut session.logged_in, true)
        };
        if changed {
            tracing::info!("session logged in");
            self.changes.emit(&true);
        }
    }

    /// Record a logout or an expired session
    pub fn set_logged_out(&self) {
        let changed = {
            let mut session = self.session.lock();
            session.name = None;
            std::mem::replace(&mut session.logged_in, false)
        };
        if changed {
            tracing::info!("session logged out");
            self.changes.emit(&false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn transitions_emit_once() {
        let auth = AuthState::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        let _sub = auth.changes().subscribe(move |v: &bool| log.lock().push(*v));

        auth.set_logged_in("admin");
        auth.set_logged_in("admin");
        auth.set_logged_out();
        auth.set_logged_out();

        assert_eq!(*seen.lock(), vec![true, false]);
    }

    #[test]
    fn logout_clears_name() {
        let auth = AuthState::logged_in("admin");
        assert!(auth.is_logged_in());
        assert_eq!(auth.name().as_deref(), Some("admin"));

        auth.set_logged_out();
        assert!(!auth.is_logged_in());
        assert_eq!(auth.name(), None);
    }
}
