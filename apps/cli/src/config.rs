//! Runtime configuration read from the environment.

use std::env;
use std::time::Duration;

/// Settings for the command-line host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Log filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Poll interval for the file watcher backend.
    pub poll_interval: Duration,
    /// How long the watch loop waits for an event before checking for shutdown.
    pub debounce: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            poll_interval: Duration::from_millis(2000),
            debounce: Duration::from_millis(100),
        }
    }
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let millis = |key: &str, fallback: Duration| {
            lookup(key)
                .and_then(|value| value.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(fallback)
        };

        Self {
            log_filter: lookup("QUIZLET_LOG").unwrap_or(defaults.log_filter),
            poll_interval: millis("QUIZLET_POLL_INTERVAL_MS", defaults.poll_interval),
            debounce: millis("QUIZLET_DEBOUNCE_MS", defaults.debounce),
        }
    }
}
