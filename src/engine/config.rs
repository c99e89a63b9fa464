use std::env;
use std::time::Duration;

use tracing::warn;

pub const MAX_ATTEMPTS_VAR: &str = "LEDGER_HARVEST_MAX_ATTEMPTS";
pub const FETCH_TIMEOUT_VAR: &str = "LEDGER_HARVEST_FETCH_TIMEOUT_MS";
pub const RETRY_BACKOFF_VAR: &str = "LEDGER_HARVEST_RETRY_BACKOFF_MS";

/// Limits that bound how long a retrieval run can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalConfig {
    /// Attempts per page index before the run fails. Always at least 1.
    pub max_attempts: u32,
    /// Upper bound on a single page fetch.
    pub fetch_timeout: Duration,
    /// Wait before retry `n` is `retry_backoff * n`.
    pub retry_backoff: Duration
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            fetch_timeout: Duration::from_secs(10),
            retry_backoff: Duration::from_millis(250)
        }
    }
}

impl RetrievalConfig {
    /// Defaults overridden by the `LEDGER_HARVEST_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns. Unset or empty keys keep the
    /// default; unparsable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |key: &str| -> Option<u64> {
            let value = lookup(key).filter(|value| !value.trim().is_empty())?;

            match value.trim().parse() {
                Ok(parsed) => Some(parsed),
                Err(error) => {
                    warn!("Ignoring {key}=[{value}]: {error}");
                    None
                }
            }
        };

        Self {
            max_attempts: read(MAX_ATTEMPTS_VAR)
                .map(|attempts| u32::try_from(attempts).unwrap_or(u32::MAX).max(1))
                .unwrap_or(defaults.max_attempts),
            fetch_timeout: read(FETCH_TIMEOUT_VAR)
                .map(Duration::from_millis)
                .unwrap_or(defaults.fetch_timeout),
            retry_backoff: read(RETRY_BACKOFF_VAR)
                .map(Duration::from_millis)
                .unwrap_or(defaults.retry_backoff)
        }
    }
}
