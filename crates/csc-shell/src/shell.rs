//! Application shell
//!
//! Reacts to API errors and login transitions for the whole console.
//! Collaborators are passed in explicitly through [`ShellContext`].

use crate::auth::AuthState;
use crate::events::{EventStream, Subscription};
use parking_lot::Mutex;
use std::sync::Arc;

/// Message key for an expired or missing session
pub const NOT_LOGGED_IN: &str = "NOT_LOGGED_IN";

/// Message key for a rejected request
pub const WRONG_ARGUMENTS: &str = "WRONG_ARGUMENTS";

/// Message key for any non-HTTP failure
pub const UNEXPECTED_ERROR: &str = "UNEXPECTED_ERROR";

/// Route shown to logged-out users
pub const LOGIN_ROUTE: &str = "/login";

/// Error reported anywhere in the console
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShellError {
    /// API answered with an error status
    #[error("http error {status}")]
    Http {
        /// Status code
        status: u16,
    },

    /// Anything that is not an API response
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// User-facing notifications, keyed by message key
pub trait Notifier: Send + Sync {
    /// Show message `key`
    fn message(&self, key: &str);
}

/// Route changes
pub trait Navigator: Send + Sync {
    /// Go to `path`
    fn navigate(&self, path: &str);
}

/// Collaborators of the shell
#[derive(Clone)]
pub struct ShellContext {
    /// Login state
    pub auth: Arc<AuthState>,
    /// Console-wide error stream
    pub errors: EventStream<ShellError>,
    /// Notification sink
    pub notifier: Arc<dyn Notifier>,
    /// Router
    pub navigator: Arc<dyn Navigator>,
}

/// Mounted application shell
///
/// Holds its error and login subscriptions; [`AppShell::unmount`] (or drop)
/// releases them.
pub struct AppShell {
    title: Arc<Mutex<Option<String>>>,
    auth: Arc<AuthState>,
    _errors: Subscription,
    _login: Subscription,
}

impl AppShell {
    /// Register handlers, then apply the initial login state
    ///
    /// Both subscriptions exist before this returns, so no later emission is
    /// missed.
    #[must_use]
    pub fn mount(ctx: ShellContext) -> Self {
        let title = Arc::new(Mutex::new(ctx.auth.name()));

        let errors = {
            let auth = Arc::clone(&ctx.auth);
            let notifier = Arc::clone(&ctx.notifier);
            ctx.errors
                .subscribe(move |error: &ShellError| handle_error(error, &auth, notifier.as_ref()))
        };

        let login = {
            let auth = Arc::downgrade(&ctx.auth);
            let navigator = Arc::clone(&ctx.navigator);
            let title = Arc::clone(&title);
            ctx.auth.changes().subscribe(move |logged_in: &bool| {
                let name = auth.upgrade().and_then(|a| a.name());
                update_account(*logged_in, name, &title, navigator.as_ref());
            })
        };

        if !ctx.auth.is_logged_in() {
            update_account(false, None, &title, ctx.navigator.as_ref());
        }

        Self {
            title,
            auth: ctx.auth,
            _errors: errors,
            _login: login,
        }
    }

    /// Header title (the user name while logged in)
    #[must_use]
    pub fn title(&self) -> Option<String> {
        self.title.lock().clone()
    }

    /// Check if a user is logged in
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.auth.is_logged_in()
    }

    /// Release subscriptions
    pub fn unmount(self) {
        tracing::debug!("app shell unmounted");
    }
}

impl std::fmt::Debug for AppShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppShell")
            .field("title", &self.title())
            .field("logged_in", &self.is_logged_in())
            .finish_non_exhaustive()
    }
}

fn handle_error(error: &ShellError, auth: &AuthState, notifier: &dyn Notifier) {
    match error {
        ShellError::Http { status: 401 } => {
            tracing::warn!("request rejected: session expired");
            notifier.message(NOT_LOGGED_IN);
            auth.set_logged_out();
        }
        ShellError::Http { status: 431 } => notifier.message(WRONG_ARGUMENTS),
        ShellError::Http { status } => tracing::debug!(status, "http error left to caller"),
        ShellError::Unexpected(detail) => {
            tracing::error!(detail = %detail, "unexpected error");
            notifier.message(UNEXPECTED_ERROR);
        }
    }
}

fn update_account(
    logged_in: bool,
    name: Option<String>,
    title: &Mutex<Option<String>>,
    navigator: &dyn Navigator,
) {
    if logged_in {
        *title.lock() = name;
    } else {
        navigator.navigate(LOGIN_ROUTE);
    }
}
