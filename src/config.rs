use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_LEDGER_PATH: &str = "paperfolio.json";
const DEFAULT_QUOTE_API_URL: &str = "https://query1.finance.yahoo.com";
const DEFAULT_QUOTE_TIMEOUT_MS: u64 = 10_000;

/// Runtime configuration, read from the environment.
///
/// Every knob has a default; a bare invocation works out of the box.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the persisted account document.
    pub ledger_path: String,
    /// Base URL of the quote API.
    pub quote_api_url: String,
    /// Per-request timeout for quote lookups.
    pub quote_timeout: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let ledger_path = env_map
            .get("PAPERFOLIO_LEDGER_PATH")
            .cloned()
            .unwrap_or_else(|| DEFAULT_LEDGER_PATH.to_string());

        let quote_api_url = env_map
            .get("PAPERFOLIO_QUOTE_API_URL")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_QUOTE_API_URL.to_string());

        let quote_timeout_ms = match env_map.get("PAPERFOLIO_QUOTE_TIMEOUT_MS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue(
                    "PAPERFOLIO_QUOTE_TIMEOUT_MS".to_string(),
                    "must be a duration in milliseconds".to_string(),
                )
            })?,
            None => DEFAULT_QUOTE_TIMEOUT_MS,
        };

        Ok(Config {
            ledger_path,
            quote_api_url,
            quote_timeout: Duration::from_millis(quote_timeout_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_with_empty_env() {
        let config = Config::from_env_map(HashMap::new()).unwrap();
        assert_eq!(config.ledger_path, DEFAULT_LEDGER_PATH);
        assert_eq!(config.quote_api_url, DEFAULT_QUOTE_API_URL);
        assert_eq!(config.quote_timeout, Duration::from_millis(10_000));
    }

    #[test]
    fn test_overrides_are_honored() {
        let mut env_map = HashMap::new();
        env_map.insert(
            "PAPERFOLIO_LEDGER_PATH".to_string(),
            "/tmp/ledger.json".to_string(),
        );
        env_map.insert(
            "PAPERFOLIO_QUOTE_API_URL".to_string(),
            "http://localhost:9000/".to_string(),
        );
        env_map.insert("PAPERFOLIO_QUOTE_TIMEOUT_MS".to_string(), "250".to_string());

        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.ledger_path, "/tmp/ledger.json");
        // Trailing slash is stripped so URL joining stays predictable.
        assert_eq!(config.quote_api_url, "http://localhost:9000");
        assert_eq!(config.quote_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let mut env_map = HashMap::new();
        env_map.insert(
            "PAPERFOLIO_QUOTE_TIMEOUT_MS".to_string(),
            "soon".to_string(),
        );
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(key, _)) => {
                assert_eq!(key, "PAPERFOLIO_QUOTE_TIMEOUT_MS")
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }
}
