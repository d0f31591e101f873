//! # shopfeed
//!
//! Crawls a paginated e-commerce category listing, extracts a fixed set of
//! product attributes from each product page and writes them as an XML
//! product feed.
//!
//! ## Architecture
//!
//! ```text
//! Listing pages → LinkDiscovery → ProductExtractor → Batch → FeedWriter
//! ```
//!
//! - [`discovery`]: walks `?page=N&view=96&sort=3` until the link cap or the end
//! - [`extractor`]: independent selector rules over a rendered product page
//! - [`writer`]: batched XML feed output
//! - [`pipeline`]: sequences the three stages
//!
//! ## Quick Start
//!
//! ```bash
//! # Crawl the configured listing into products.xml
//! shopfeed crawl
//!
//! # Crawl another listing, flushing every 50 records
//! shopfeed crawl https://www.farfetch.com/ca/shopping/women/dresses-1/items.aspx --batch-size 50
//!
//! # Inspect one product page
//! shopfeed extract https://www.farfetch.com/ca/shopping/women/item-19023311.aspx
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the
/// configuration, the page fetcher and the pipeline.
pub mod app;

/// Command-line interface using clap.
///
/// - `crawl [url]` - Crawl a listing into the feed file
/// - `links [url]` - Print discovered product links
/// - `extract <url>` - Print one product record as JSON
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/shopfeed/config.toml` with `[fetcher]`, `[crawl]`
/// and `[feed]` sections.
pub mod config;

/// Paginated product link discovery.
pub mod discovery;

/// Core domain models.
///
/// - [`ProductLink`](domain::ProductLink): absolute product page URL
/// - [`ProductRecord`](domain::ProductRecord): extracted fields keyed by [`Field`](domain::Field)
/// - [`Batch`](domain::Batch): bounded group of records awaiting a flush
pub mod domain;

/// Product field extraction from rendered pages.
pub mod extractor;

/// Page fetching.
///
/// - [`PageFetcher`](fetcher::PageFetcher): Async trait for page fetching
/// - [`ChromeFetcher`](fetcher::ChromeFetcher): headless Chrome via chromiumoxide
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based, no script execution
pub mod fetcher;

/// End-to-end crawl orchestration.
pub mod pipeline;

/// Feed XML output.
pub mod writer;
