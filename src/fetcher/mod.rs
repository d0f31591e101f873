//! Page fetching.
//!
//! A [`PageFetcher`] turns a URL into the HTML of the page as a browser
//! would see it. Failures are per page: callers decide whether a failed
//! page ends their work or is skipped.

mod chrome;
mod config;
mod http_fetcher;

pub use chrome::ChromeFetcher;
pub use config::{Backend, FetcherConfig};
pub use http_fetcher::HttpFetcher;

use std::sync::Arc;

use async_trait::async_trait;

use crate::app::Result;

/// A fetched page, serialized after client-side rendering.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// URL the page was requested with
    pub url: String,
    /// Serialized DOM
    pub html: String,
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch and render one page
    async fn fetch(&self, url: &str) -> Result<RenderedPage>;

    /// Release any resources held by the fetcher
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Build the fetcher selected by `config.backend`.
pub async fn connect(config: &FetcherConfig) -> Result<Arc<dyn PageFetcher>> {
    let fetcher: Arc<dyn PageFetcher> = match config.backend {
        Backend::Chrome => Arc::new(ChromeFetcher::new(config.clone()).await?),
        Backend::Http => Arc::new(HttpFetcher::new(config)?),
    };
    Ok(fetcher)
}
