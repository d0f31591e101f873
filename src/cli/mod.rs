pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::fetcher::Backend;
use crate::writer::FeedLayout;

#[derive(Parser)]
#[command(name = "shopfeed")]
#[command(about = "Crawl a product listing into an XML product feed", long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Page fetcher to use
    #[arg(long, value_enum, global = true)]
    pub backend: Option<Backend>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Crawl the listing and write the product feed
    Crawl {
        /// Category listing URL
        listing_url: Option<String>,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Site root written into the feed metadata
        #[arg(long)]
        site_link: Option<String>,

        /// Maximum number of product links to collect
        #[arg(long)]
        max_links: Option<usize>,

        /// Records per feed flush
        #[arg(long)]
        batch_size: Option<usize>,

        /// Product pages extracted at once
        #[arg(long)]
        concurrency: Option<usize>,

        /// How batches are laid out in the output file
        #[arg(long, value_enum)]
        layout: Option<FeedLayout>,
    },
    /// Print the product links found on the listing
    Links {
        /// Category listing URL
        listing_url: Option<String>,

        /// Maximum number of product links to collect
        #[arg(long)]
        max_links: Option<usize>,
    },
    /// Extract one product page and print it as JSON
    Extract {
        /// Product detail page URL
        url: String,
    },
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(backend) = self.backend {
            config.fetcher.backend = backend;
        }

        match &self.command {
            Commands::Crawl {
                listing_url,
                output,
                site_link,
                max_links,
                batch_size,
                concurrency,
                layout,
            } => {
                if let Some(url) = listing_url {
                    config.crawl.listing_url = url.clone();
                }
                if let Some(output) = output {
                    config.feed.output = output.clone();
                }
                if let Some(link) = site_link {
                    config.feed.site_link = link.clone();
                }
                if let Some(n) = max_links {
                    config.crawl.max_links = *n;
                }
                if let Some(n) = batch_size {
                    config.crawl.batch_size = *n;
                }
                if let Some(n) = concurrency {
                    config.crawl.concurrency = *n;
                }
                if let Some(layout) = layout {
                    config.feed.layout = *layout;
                }
            }
            Commands::Links {
                listing_url,
                max_links,
            } => {
                if let Some(url) = listing_url {
                    config.crawl.listing_url = url.clone();
                }
                if let Some(n) = max_links {
                    config.crawl.max_links = *n;
                }
            }
            Commands::Extract { .. } => {}
        }
    }
}
