use async_trait::async_trait;
use reqwest::Client;

use crate::app::{Result, ShopfeedError};
use crate::fetcher::config::FetcherConfig;
use crate::fetcher::{PageFetcher, RenderedPage};

/// Fetches raw server HTML without running any scripts.
pub struct HttpFetcher {
    client: Client,
    config: FetcherConfig,
}

impl HttpFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true);

        if let Some(ref ua) = config.user_agent {
            builder = builder.user_agent(ua.clone());
        }

        Ok(Self {
            client: builder.build()?,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<RenderedPage> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ShopfeedError::Timeout {
                    url: url.to_string(),
                    limit: self.config.timeout(),
                }
            } else {
                ShopfeedError::Http(e)
            }
        })?;

        response.error_for_status_ref()?;

        let html = response.text().await?;

        Ok(RenderedPage {
            url: url.to_string(),
            html,
        })
    }
}
