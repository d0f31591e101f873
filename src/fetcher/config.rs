use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which page fetcher to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Headless Chromium; runs client-side scripts before reading the DOM
    Chrome,
    /// Plain HTTP GET; only for server-rendered pages
    Http,
}

/// Configuration for page fetching
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Fetcher implementation (default: chrome)
    pub backend: Backend,

    /// Whether to run the browser in headless mode (default: true)
    pub headless: bool,

    /// Limit for fetching and rendering one page, in seconds (default: 50)
    pub timeout_secs: u64,

    /// Wait time after page load for client-side rendering in milliseconds (default: 1000)
    pub wait_after_load_ms: u64,

    /// User agent string to use
    pub user_agent: Option<String>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Chrome,
            headless: true,
            timeout_secs: 50,
            wait_after_load_ms: 1000,
            user_agent: Some(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                    .to_string(),
            ),
        }
    }
}

impl FetcherConfig {
    /// Get the page timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the wait time after load as a Duration
    pub fn wait_after_load(&self) -> Duration {
        Duration::from_millis(self.wait_after_load_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = FetcherConfig::default();
        assert_eq!(config.backend, Backend::Chrome);
        assert!(config.headless);
        assert_eq!(config.timeout_secs, 50);
        assert_eq!(config.wait_after_load_ms, 1000);
        assert!(config.user_agent.is_some());
    }

    #[test]
    fn test_durations() {
        let config = FetcherConfig {
            timeout_secs: 5,
            wait_after_load_ms: 250,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.wait_after_load(), Duration::from_millis(250));
    }

    #[test]
    fn test_backend_from_toml() {
        let config: FetcherConfig = toml::from_str("backend = \"http\"").unwrap();
        assert_eq!(config.backend, Backend::Http);
        assert_eq!(config.timeout_secs, 50);
    }
}
