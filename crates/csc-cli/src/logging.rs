//! Tracing subscriber setup for the `cs-console` binary.
//!
//! # Priority (highest to lowest)
//!
//! 1. `CS_CONSOLE_LOG` env var (per-target directives, e.g. `csc_filter=debug,warn`)
//! 2. `RUST_LOG` env var
//! 3. `-v` / `-q` flags
//! 4. Configured `log_level`

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Project-specific log directive variable
pub const LOG_ENV: &str = "CS_CONSOLE_LOG";

/// Verbosity requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// `-q`: errors only
    Quiet,
    /// No flag: configured level
    Normal,
    /// `-v`: debug
    Verbose,
}

impl Verbosity {
    /// Derive from flags; verbose wins when both are set
    #[must_use]
    pub const fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            Self::Verbose
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    /// Directive used when no env var applies
    #[must_use]
    pub fn directive(self, configured: &str) -> String {
        match self {
            Self::Quiet => "error".to_string(),
            Self::Normal => configured.to_string(),
            Self::Verbose => "debug".to_string(),
        }
    }
}

/// Install the global subscriber, writing to stderr
///
/// Call once, early in `main`.
pub fn init(verbosity: Verbosity, configured_level: &str) {
    let filter = build_env_filter(verbosity, configured_level);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .without_time()
                .compact(),
        )
        .init();
}

fn build_env_filter(verbosity: Verbosity, configured_level: &str) -> EnvFilter {
    if let Ok(directives) = std::env::var(LOG_ENV) {
        if let Ok(filter) = EnvFilter::try_new(&directives) {
            return filter;
        }
    }

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    EnvFilter::try_new(verbosity.directive(configured_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_wins() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn directive_uses_config_by_default() {
        assert_eq!(Verbosity::Normal.directive("info"), "info");
        assert_eq!(Verbosity::Quiet.directive("info"), "error");
        assert_eq!(Verbosity::Verbose.directive("info"), "debug");
    }
}
