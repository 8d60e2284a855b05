//! cs-console App Shell
//!
//! Console-wide reactions to API errors and login transitions, built on
//! explicit subscriptions instead of ambient observables.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use csc_shell::{AppShell, AuthState, EventStream, Navigator, Notifier, ShellContext, ShellError};
//!
//! struct Log;
//! impl Notifier for Log {
//!     fn message(&self, key: &str) { println!("notify {key}"); }
//! }
//! impl Navigator for Log {
//!     fn navigate(&self, path: &str) { println!("goto {path}"); }
//! }
//!
//! let errors = EventStream::new();
//! let shell = AppShell::mount(ShellContext {
//!     auth: Arc::new(AuthState::logged_in("admin")),
//!     errors: errors.clone(),
//!     notifier: Arc::new(Log),
//!     navigator: Arc::new(Log),
//! });
//!
//! errors.emit(&ShellError::Http { status: 401 });
//! assert!(!shell.is_logged_in());
//! shell.unmount();
//! ```

#![warn(missing_docs)]

pub mod auth;
pub mod events;
pub mod shell;

// Re-exports
pub use auth::AuthState;
pub use events::{EventStream, Subscription};
pub use shell::{
    AppShell, Navigator, Notifier, ShellContext, ShellError, LOGIN_ROUTE, NOT_LOGGED_IN,
    UNEXPECTED_ERROR, WRONG_ARGUMENTS,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
