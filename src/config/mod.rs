//! Configuration management for shopfeed.
//!
//! Configuration is read from `~/.config/shopfeed/config.toml` (or the file
//! given with `--config`). If the default file doesn't exist, a default
//! configuration with comments is created.

use crate::fetcher::FetcherConfig;
use crate::pipeline::CrawlConfig;
use crate::writer::FeedConfig;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetcher: FetcherConfig,
    pub crawl: CrawlConfig,
    pub feed: FeedConfig,
}

impl Config {
    /// Load configuration from `path`, or from the default path when `None`.
    ///
    /// A missing default file is created with comments. A missing explicit
    /// file is an error. Missing fields use default values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default_path = Self::default_config_path()?;
                if !default_path.exists() {
                    Self::create_default_config(&default_path)?;
                    return Ok(Self::default());
                }
                default_path
            }
        };

        Self::from_file(&config_path)
    }

    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/shopfeed/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("shopfeed").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    pub fn default_config_content() -> String {
        r##"# shopfeed configuration
#
# Command-line flags override these values for a single run.

[fetcher]
# "chrome" renders pages in headless Chromium; "http" fetches raw HTML
backend = "chrome"

# Run browser in headless mode (no visible window)
headless = true

# Limit for loading and rendering one page, in seconds
timeout_secs = 50

# Wait time after page load for client-side rendering (milliseconds)
wait_after_load_ms = 1000

[crawl]
# Category listing to crawl
listing_url = "https://www.farfetch.com/ca/shopping/women/dresses-1/items.aspx"

# Listing query parameters: products per page (view) and sort key (sort)
page_size = 96
sort = "3"

# Maximum number of product links to collect
max_links = 120

# Records per feed flush
batch_size = 120

# Product pages extracted at once (output order is unaffected)
concurrency = 1

[feed]
title = "FARFETCH"
description = "FARFETCH UK"
site_link = "https://www.farfetch.com/"
output = "products.xml"

# "merged": one document holding every batch
# "fragments": each batch appended as its own document
layout = "merged"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
