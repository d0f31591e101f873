use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::writer::{FeedLayout, FeedMeta};

/// Configuration for the output feed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Channel title (default: "FARFETCH")
    pub title: String,

    /// Channel description (default: "FARFETCH UK")
    pub description: String,

    /// Site root written as the channel link
    pub site_link: String,

    /// Output file (default: products.xml)
    pub output: PathBuf,

    /// Batch layout in the output file (default: merged)
    pub layout: FeedLayout,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            title: "FARFETCH".to_string(),
            description: "FARFETCH UK".to_string(),
            site_link: "https://www.farfetch.com/".to_string(),
            output: PathBuf::from("products.xml"),
            layout: FeedLayout::Merged,
        }
    }
}

impl FeedConfig {
    pub fn meta(&self) -> FeedMeta {
        FeedMeta {
            title: self.title.clone(),
            description: self.description.clone(),
            link: self.site_link.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_from_defaults() {
        let meta = FeedConfig::default().meta();
        assert_eq!(meta.title, "FARFETCH");
        assert_eq!(meta.description, "FARFETCH UK");
        assert_eq!(meta.link, "https://www.farfetch.com/");
    }

    #[test]
    fn test_layout_from_toml() {
        let config: FeedConfig = toml::from_str("layout = \"fragments\"").unwrap();
        assert_eq!(config.layout, FeedLayout::Fragments);
        assert_eq!(config.output, PathBuf::from("products.xml"));
    }
}
