use std::time::Duration;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum ShopfeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Timed out after {limit:?} rendering {url}")]
    Timeout { url: String, limit: Duration },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    #[error("Feed write error: {0}")]
    FeedWrite(#[source] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Other(String),
}

impl ShopfeedError {
    /// True for failures that only forfeit the page being fetched.
    pub fn is_page_fetch(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Browser(_) | Self::Timeout { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ShopfeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_fetch_classification() {
        let timeout = ShopfeedError::Timeout {
            url: "https://example.com/p/1".into(),
            limit: Duration::from_secs(50),
        };
        assert!(timeout.is_page_fetch());
        assert!(ShopfeedError::Browser("crashed".into()).is_page_fetch());

        let write = ShopfeedError::FeedWrite(std::io::Error::other("disk full"));
        assert!(!write.is_page_fetch());
    }

    #[test]
    fn test_timeout_message_names_url() {
        let err = ShopfeedError::Timeout {
            url: "https://example.com/p/1".into(),
            limit: Duration::from_secs(50),
        };
        assert!(err.to_string().contains("https://example.com/p/1"));
    }
}
