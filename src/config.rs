//! Runtime configuration.
//!
//! Secrets come from the process environment (optionally seeded from a
//! `.env` file by the binary). The struct is built once at startup and
//! handed to the client, the notifier and the poller.

use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
pub const PRACTICUM_ENDPOINT: &str = "PRACTICUM_ENDPOINT";

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_RETRY_SECS: u64 = 600;

/// Fixed-delay re-poll policy. The only retry mechanism the bot has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub interval: Duration,
}

impl RetryPolicy {
    pub fn from_secs(secs: u64) -> Self {
        Self { interval: Duration::from_secs(secs) }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_secs(DEFAULT_RETRY_SECS)
    }
}

#[derive(Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub endpoint: String,
    pub retry: RetryPolicy,
}

// Tokens never end up in logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint)
            .field("retry", &self.retry)
            .finish()
    }
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary lookup. Empty or whitespace-only values
    /// count as missing; every missing variable is reported at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let practicum_token = read(PRACTICUM_TOKEN);
        let telegram_token = read(TELEGRAM_TOKEN);
        let telegram_chat_id = read(TELEGRAM_CHAT_ID);

        match (practicum_token, telegram_token, telegram_chat_id) {
            (Some(practicum_token), Some(telegram_token), Some(telegram_chat_id)) => Ok(Self {
                practicum_token,
                telegram_token,
                telegram_chat_id: telegram_chat_id.trim().to_string(),
                endpoint: read(PRACTICUM_ENDPOINT).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
                retry: RetryPolicy::default(),
            }),
            (p, t, c) => {
                let missing = [(PRACTICUM_TOKEN, p.is_none()), (TELEGRAM_TOKEN, t.is_none()), (TELEGRAM_CHAT_ID, c.is_none())]
                    .into_iter()
                    .filter_map(|(name, absent)| absent.then_some(name))
                    .collect();
                Err(ConfigError::MissingTokens(missing))
            }
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// True only when all three required secrets are present and non-empty.
pub fn check_tokens<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    Config::from_lookup(lookup).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn full() -> HashMap<String, String> {
        env(&[
            (PRACTICUM_TOKEN, "y0_practicum"),
            (TELEGRAM_TOKEN, "123:abc"),
            (TELEGRAM_CHAT_ID, "42"),
        ])
    }

    #[test]
    fn test_all_tokens_present() {
        let vars = full();
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.practicum_token, "y0_practicum");
        assert_eq!(config.telegram_chat_id, "42");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.retry.interval, Duration::from_secs(600));
        assert!(check_tokens(|k| vars.get(k).cloned()));
    }

    #[test]
    fn test_each_missing_token_fails() {
        for name in [PRACTICUM_TOKEN, TELEGRAM_TOKEN, TELEGRAM_CHAT_ID] {
            let mut vars = full();
            vars.remove(name);
            assert!(!check_tokens(|k| vars.get(k).cloned()), "{name} missing should fail");
        }
    }

    #[test]
    fn test_blank_token_counts_as_missing() {
        let mut vars = full();
        vars.insert(TELEGRAM_TOKEN.to_string(), "   ".to_string());
        match Config::from_lookup(|k| vars.get(k).cloned()) {
            Err(ConfigError::MissingTokens(missing)) => assert_eq!(missing, vec![TELEGRAM_TOKEN]),
            other => panic!("expected MissingTokens, got {other:?}"),
        }
    }

    #[test]
    fn test_reports_every_missing_token() {
        let err = Config::from_lookup(|_| None).unwrap_err();
        let ConfigError::MissingTokens(missing) = &err;
        assert_eq!(missing, &vec![PRACTICUM_TOKEN, TELEGRAM_TOKEN, TELEGRAM_CHAT_ID]);
        assert!(err.to_string().contains("PRACTICUM_TOKEN, TELEGRAM_TOKEN, TELEGRAM_CHAT_ID"));
    }

    #[test]
    fn test_endpoint_override() {
        let mut vars = full();
        vars.insert(PRACTICUM_ENDPOINT.to_string(), "http://127.0.0.1:9/api/".to_string());
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.endpoint, "http://127.0.0.1:9/api/");
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let vars = full();
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();
        let shown = format!("{config:?}");
        assert!(!shown.contains("y0_practicum"));
        assert!(!shown.contains("123:abc"));
        assert!(shown.contains("<redacted>"));
    }
}
