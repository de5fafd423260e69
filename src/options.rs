use std::time::Duration;

use crate::{Result, SearchConsoleError};

/// Default `User-Agent` sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("search-console-http/", env!("CARGO_PKG_VERSION"));

/// Configures HTTP timeout and retry behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum number of retries after the initial attempt.
    pub max_retries: usize,
    /// Base retry backoff in milliseconds, doubled after each retry.
    pub retry_backoff_ms: u64,
    /// Upper bound for the computed backoff in milliseconds.
    pub max_backoff_ms: u64,
    /// Optional deadline for the whole retry sequence in milliseconds.
    ///
    /// When the next sleep would cross it, the last failure is returned
    /// instead of retrying.
    pub total_timeout_ms: Option<u64>,
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            max_retries: 5,
            retry_backoff_ms: 1_000,
            max_backoff_ms: 16_000,
            total_timeout_ms: None,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl ClientOptions {
    /// Builds options from defaults overridden by the environment.
    ///
    /// Reads:
    /// - `GSC_HTTP_TIMEOUT` — per-attempt timeout in seconds
    /// - `GSC_USER_AGENT` — `User-Agent` header value
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut options = Self::default();

        if let Some(raw) = lookup("GSC_HTTP_TIMEOUT") {
            let seconds: u64 = raw.trim().parse().map_err(|_| {
                SearchConsoleError::Config(format!(
                    "GSC_HTTP_TIMEOUT must be a whole number of seconds, got '{raw}'"
                ))
            })?;
            options.timeout_ms = seconds.saturating_mul(1_000);
        }
        if let Some(agent) = lookup("GSC_USER_AGENT").filter(|value| !value.trim().is_empty()) {
            options.user_agent = agent;
        }

        Ok(options)
    }

    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub(crate) fn total_timeout(&self) -> Option<Duration> {
        self.total_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{ClientOptions, DEFAULT_USER_AGENT};
    use crate::SearchConsoleError;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_api_retry_policy() {
        let options = ClientOptions::default();
        assert_eq!(options.timeout_ms, 30_000);
        assert_eq!(options.max_retries, 5);
        assert_eq!(options.retry_backoff_ms, 1_000);
        assert_eq!(options.max_backoff_ms, 16_000);
        assert_eq!(options.total_timeout_ms, None);
        assert_eq!(options.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn env_overrides_timeout_and_user_agent() {
        let options =
            ClientOptions::from_lookup(lookup(&[("GSC_HTTP_TIMEOUT", "12"), ("GSC_USER_AGENT", "probe/1")]))
                .expect("valid env must parse");
        assert_eq!(options.timeout_ms, 12_000);
        assert_eq!(options.user_agent, "probe/1");
    }

    #[test]
    fn blank_user_agent_keeps_default() {
        let options = ClientOptions::from_lookup(lookup(&[("GSC_USER_AGENT", "  ")]))
            .expect("blank agent is ignored");
        assert_eq!(options.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn invalid_timeout_is_a_config_error() {
        let err = ClientOptions::from_lookup(lookup(&[("GSC_HTTP_TIMEOUT", "soon")]))
            .expect_err("non-numeric timeout must fail");
        assert!(matches!(err, SearchConsoleError::Config(_)));
    }
}
