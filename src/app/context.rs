use std::sync::Arc;

use url::Url;

use crate::app::error::Result;
use crate::config::Config;
use crate::fetcher::{self, PageFetcher};
use crate::pipeline::Pipeline;

pub struct AppContext {
    pub config: Config,
    pub fetcher: Arc<dyn PageFetcher>,
    pub pipeline: Pipeline,
}

impl AppContext {
    /// Start the configured fetcher and build the pipeline around it.
    pub async fn new(config: Config) -> Result<Self> {
        let fetcher = fetcher::connect(&config.fetcher).await?;
        Self::with_fetcher(config, fetcher)
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn PageFetcher>) -> Result<Self> {
        let pipeline = Pipeline::new(fetcher.clone(), &config.crawl)?;

        Ok(Self {
            config,
            fetcher,
            pipeline,
        })
    }

    pub fn listing_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.config.crawl.listing_url)?)
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.fetcher.close().await
    }
}
