//! cs-console command line support
//!
//! Configuration, logging setup and subcommand bodies for the `cs-console`
//! binary.

#![warn(missing_docs)]

pub mod commands;
pub mod config;
pub mod logging;

pub use config::ConsoleConfig;
pub use logging::Verbosity;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
