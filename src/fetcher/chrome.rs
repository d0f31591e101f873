use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::app::{Result, ShopfeedError};
use crate::fetcher::config::FetcherConfig;
use crate::fetcher::{PageFetcher, RenderedPage};

/// Chrome-based page fetcher using chromiumoxide
pub struct ChromeFetcher {
    browser: Mutex<Option<Browser>>,
    handler: JoinHandle<()>,
    config: FetcherConfig,
}

impl ChromeFetcher {
    /// Launch a browser with the given configuration
    pub async fn new(config: FetcherConfig) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-software-rasterizer");

        if !config.headless {
            builder = builder.with_head();
        }

        let browser_config = builder
            .build()
            .map_err(|e| ShopfeedError::Browser(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
            ShopfeedError::Browser(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            ))
        })?;

        // The handler drives the CDP connection and must be polled for the browser to work
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler event error: {}", e);
                }
            }
        });

        Ok(Self {
            browser: Mutex::new(Some(browser)),
            handler,
            config,
        })
    }

    async fn open_tab(&self) -> Result<Page> {
        let guard = self.browser.lock().await;
        let browser = guard
            .as_ref()
            .ok_or_else(|| ShopfeedError::Browser("Browser already closed".to_string()))?;

        browser
            .new_page("about:blank")
            .await
            .map_err(|e| ShopfeedError::Browser(format!("Failed to create page: {}", e)))
    }

    async fn load(&self, page: &Page, url: &str) -> Result<String> {
        if let Some(ref ua) = self.config.user_agent {
            page.set_user_agent(ua)
                .await
                .map_err(|e| ShopfeedError::Browser(format!("Failed to set user agent: {}", e)))?;
        }

        page.goto(url)
            .await
            .map_err(|e| ShopfeedError::Browser(format!("Navigation failed: {}", e)))?;

        page.wait_for_navigation()
            .await
            .map_err(|e| ShopfeedError::Browser(format!("Navigation failed: {}", e)))?;

        // Give client-side rendering time to settle
        tokio::time::sleep(self.config.wait_after_load()).await;

        page.content()
            .await
            .map_err(|e| ShopfeedError::Browser(format!("Failed to read page content: {}", e)))
    }
}

#[async_trait]
impl PageFetcher for ChromeFetcher {
    async fn fetch(&self, url: &str) -> Result<RenderedPage> {
        let page = self.open_tab().await?;
        let limit = self.config.timeout();

        let loaded = tokio::time::timeout(limit, self.load(&page, url)).await;

        if let Err(e) = page.close().await {
            debug!("Failed to close page for {}: {}", url, e);
        }

        match loaded {
            Ok(html) => Ok(RenderedPage {
                url: url.to_string(),
                html: html?,
            }),
            Err(_) => Err(ShopfeedError::Timeout {
                url: url.to_string(),
                limit,
            }),
        }
    }

    async fn close(&self) -> Result<()> {
        let Some(mut browser) = self.browser.lock().await.take() else {
            return Ok(());
        };

        if let Err(e) = browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = browser.wait().await {
            debug!("Browser process wait failed: {}", e);
        }
        self.handler.abort();
        Ok(())
    }
}
