//! End-to-end crawl: listing → product links → records → feed batches.
//!
//! # Architecture
//!
//! ```text
//! LinkDiscovery → ProductExtractor (per link, in order) → Batch → BatchSink
//! ```
//!
//! Links are processed in discovery order. With `concurrency > 1` several
//! product pages are fetched at once, but results are consumed in link
//! order, so batch contents and boundaries match a sequential run.

mod config;

pub use config::CrawlConfig;

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::info;
use url::Url;

use crate::app::Result;
use crate::discovery::LinkDiscovery;
use crate::domain::{Batch, ProductLink, ProductRecord};
use crate::extractor::ProductExtractor;
use crate::fetcher::PageFetcher;
use crate::writer::BatchSink;

pub struct Pipeline {
    fetcher: Arc<dyn PageFetcher>,
    discovery: LinkDiscovery,
    extractor: ProductExtractor,
    max_links: usize,
    batch_size: usize,
    concurrency: usize,
}

impl Pipeline {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: &CrawlConfig) -> Result<Self> {
        Ok(Self {
            fetcher,
            discovery: LinkDiscovery::new(config.page_size, config.sort.clone())?,
            extractor: ProductExtractor::new()?,
            max_links: config.max_links,
            batch_size: config.batch_size.max(1),
            concurrency: config.concurrency.max(1),
        })
    }

    /// Collect product links from the listing
    pub async fn discover(&self, listing: &Url) -> Vec<ProductLink> {
        self.discovery
            .discover(self.fetcher.as_ref(), listing, self.max_links)
            .await
    }

    /// Extract a single product page
    pub async fn extract(&self, link: &ProductLink) -> Option<ProductRecord> {
        self.extractor.fetch_record(self.fetcher.as_ref(), link).await
    }

    /// Crawl `listing` and write every extracted record to `sink`.
    ///
    /// Page failures skip that page; a sink failure aborts the run.
    /// Returns the number of records written.
    pub async fn run<S: BatchSink + ?Sized>(&self, listing: &Url, sink: &mut S) -> Result<usize> {
        info!("Site: {}", listing);
        let links = self.discover(listing).await;
        info!("Found {} products", links.len());

        let mut batch = Batch::with_capacity(self.batch_size);
        let mut written = 0;

        let mut records = stream::iter(&links)
            .map(|link| self.extract(link))
            .buffered(self.concurrency);

        while let Some(record) = records.next().await {
            let Some(record) = record else {
                continue;
            };
            if batch.push(record) {
                written += flush(sink, &mut batch)?;
            }
        }

        if !batch.is_empty() {
            written += flush(sink, &mut batch)?;
        }
        sink.finish()?;

        info!("All {} products written", written);
        Ok(written)
    }
}

fn flush<S: BatchSink + ?Sized>(sink: &mut S, batch: &mut Batch) -> Result<usize> {
    let retired = batch.take();
    let count = retired.len();
    sink.write_batch(retired)?;
    info!("Wrote {} products to feed", count);
    Ok(count)
}
