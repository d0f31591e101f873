use serde::{Deserialize, Serialize};

/// Configuration for a crawl run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Category listing to crawl when none is given on the command line
    pub listing_url: String,

    /// Products per listing page, sent as `view` (default: 96)
    pub page_size: u32,

    /// Listing sort key, sent as `sort` (default: "3")
    pub sort: String,

    /// Maximum number of product links to collect (default: 120)
    pub max_links: usize,

    /// Records per feed flush (default: 120)
    pub batch_size: usize,

    /// Product pages extracted at once; output order is unaffected (default: 1)
    pub concurrency: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            listing_url: "https://www.farfetch.com/ca/shopping/women/dresses-1/items.aspx"
                .to_string(),
            page_size: 96,
            sort: "3".to_string(),
            max_links: 120,
            batch_size: 120,
            concurrency: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = CrawlConfig::default();
        assert_eq!(config.page_size, 96);
        assert_eq!(config.sort, "3");
        assert_eq!(config.max_links, 120);
        assert_eq!(config.batch_size, 120);
        assert_eq!(config.concurrency, 1);
        assert!(config.listing_url.ends_with("items.aspx"));
    }
}
