//! Structured field extraction from rendered product pages.
//!
//! Extraction is a fixed list of independent rules. Each rule probes the
//! page for one element and either fills its field(s) or leaves them out;
//! a miss never affects another rule. `gender` and
//! `google_product_category` are constants set on every record.

mod rules;
pub mod selectors;

use scraper::Html;
use tracing::{debug, error, info, warn};

use crate::app::Result;
use crate::domain::{ProductLink, ProductRecord};
use crate::extractor::rules::{product_rules, Rule};
use crate::fetcher::PageFetcher;

pub struct ProductExtractor {
    rules: Vec<Rule>,
}

impl ProductExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            rules: product_rules()?,
        })
    }

    /// Build a record from a rendered detail page.
    pub fn extract(&self, html: &str) -> ProductRecord {
        let document = Html::parse_document(html);

        self.rules
            .iter()
            .fold(ProductRecord::new(), |mut record, rule| {
                match rule.probe.read(&document) {
                    Some(value) => {
                        for field in rule.fields {
                            record.set(*field, value.clone());
                        }
                    }
                    None => debug!("No match for {:?}", rule.fields),
                }
                record
            })
    }

    /// Fetch a detail page and extract its record.
    ///
    /// Returns `None` if the page could not be fetched; the failure is logged.
    pub async fn fetch_record(
        &self,
        fetcher: &dyn PageFetcher,
        link: &ProductLink,
    ) -> Option<ProductRecord> {
        let page = match fetcher.fetch(link.as_str()).await {
            Ok(page) => page,
            Err(e) if e.is_page_fetch() => {
                warn!("Failed to get product details {}: {}", link, e);
                return None;
            }
            Err(e) => {
                error!("Unexpected error fetching {}: {}", link, e);
                return None;
            }
        };

        let record = self.extract(&page.html);
        info!("Extracted {} fields from {}", record.len(), page.url);
        Some(record)
    }
}
