//! Product link discovery over a paginated category listing.
//!
//! Pages are walked in order (`page=1`, `page=2`, ...) until the link cap is
//! reached, the product grid disappears, or a page fails to load. A failed
//! page is indistinguishable from the end of the listing: both stop the walk
//! and whatever was collected is returned.

use scraper::{Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

use crate::app::Result;
use crate::domain::ProductLink;
use crate::extractor::selectors::{self, listing};
use crate::fetcher::PageFetcher;

pub struct LinkDiscovery {
    page_size: u32,
    sort: String,
    product_list: Selector,
    product_anchor: Selector,
}

impl LinkDiscovery {
    pub fn new(page_size: u32, sort: impl Into<String>) -> Result<Self> {
        Ok(Self {
            page_size,
            sort: sort.into(),
            product_list: selectors::compile(listing::PRODUCT_LIST)?,
            product_anchor: selectors::compile(listing::PRODUCT_ANCHOR)?,
        })
    }

    /// URL of the 1-based listing `page`.
    ///
    /// Existing `page`, `view` and `sort` pairs on `base` are replaced; any
    /// other query pairs are kept in front.
    pub fn page_url(&self, base: &Url, page: u32) -> Url {
        let kept: Vec<(String, String)> = base
            .query_pairs()
            .filter(|(k, _)| {
                !matches!(
                    k.as_ref(),
                    listing::PAGE_PARAM | listing::VIEW_PARAM | listing::SORT_PARAM
                )
            })
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let mut url = base.clone();
        url.set_query(None);
        {
            let mut query = url.query_pairs_mut();
            for (k, v) in &kept {
                query.append_pair(k, v);
            }
            query
                .append_pair(listing::PAGE_PARAM, &page.to_string())
                .append_pair(listing::VIEW_PARAM, &self.page_size.to_string())
                .append_pair(listing::SORT_PARAM, &self.sort);
        }
        url
    }

    /// Product links on one listing page, in document order.
    ///
    /// Returns `None` when the page has no product grid.
    pub fn links_on_page(&self, html: &str, base: &Url) -> Option<Vec<ProductLink>> {
        let document = Html::parse_document(html);
        let list = document.select(&self.product_list).next()?;

        let mut links = Vec::new();
        for anchor in list.select(&self.product_anchor) {
            let Some(href) = anchor.value().attr("href") else {
                debug!("Skipping product anchor without href");
                continue;
            };
            match ProductLink::resolve(base, href) {
                Ok(link) => links.push(link),
                Err(e) => debug!("Skipping unresolvable href {:?}: {}", href, e),
            }
        }
        Some(links)
    }

    /// Walk the listing from page 1 and collect at most `max_links` links.
    ///
    /// Never fails: fetch errors are logged and end pagination.
    pub async fn discover(
        &self,
        fetcher: &dyn PageFetcher,
        base: &Url,
        max_links: usize,
    ) -> Vec<ProductLink> {
        let mut links = Vec::new();
        if max_links == 0 {
            return links;
        }

        let mut page = 1;
        loop {
            let url = self.page_url(base, page);
            info!("Parsing listing page: {}", url);

            let rendered = match fetcher.fetch(url.as_str()).await {
                Ok(rendered) => rendered,
                Err(e) => {
                    warn!("Failed to load listing page {}: {}", url, e);
                    break;
                }
            };

            let found = match self.links_on_page(&rendered.html, base) {
                Some(found) if !found.is_empty() => found,
                Some(_) => {
                    info!("Listing page {} has no product links, stopping", page);
                    break;
                }
                None => {
                    info!("No product list on page {}, stopping", page);
                    break;
                }
            };

            for link in found {
                debug!("Added link: {}", link);
                links.push(link);
                if links.len() >= max_links {
                    return links;
                }
            }

            page += 1;
        }

        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::testing::FixtureFetcher;

    const BASE: &str = "https://shop.example.com/ca/shopping/women/dresses-1/items.aspx";

    fn discovery() -> LinkDiscovery {
        LinkDiscovery::new(96, "3").unwrap()
    }

    fn base() -> Url {
        Url::parse(BASE).unwrap()
    }

    fn page_url(page: u32) -> String {
        format!("{}?page={}&view=96&sort=3", BASE, page)
    }

    fn listing_html(page: u32, count: usize) -> String {
        let cards: String = (0..count)
            .map(|i| {
                format!(
                    r#"<li><a href="/ca/shopping/women/item-{}-{}.aspx"><img alt="dress"></a></li>"#,
                    page, i
                )
            })
            .collect();
        format!(
            r#"<html><body><nav><a href="/help">Help</a></nav>
            <ul data-testid="product-card-list">{}</ul></body></html>"#,
            cards
        )
    }

    #[test]
    fn test_page_url_appends_fixed_params() {
        assert_eq!(discovery().page_url(&base(), 1).as_str(), page_url(1));
        assert_eq!(discovery().page_url(&base(), 7).as_str(), page_url(7));
    }

    #[test]
    fn test_page_url_replaces_existing_paging_params() {
        let base = Url::parse(&format!("{}?page=4&colour=red&sort=1", BASE)).unwrap();
        assert_eq!(
            discovery().page_url(&base, 2).as_str(),
            format!("{}?colour=red&page=2&view=96&sort=3", BASE)
        );
    }

    #[test]
    fn test_links_on_page_only_reads_product_list() {
        let links = discovery().links_on_page(&listing_html(1, 3), &base()).unwrap();
        assert_eq!(links.len(), 3);
        assert_eq!(
            links[0].as_str(),
            "https://shop.example.com/ca/shopping/women/item-1-0.aspx"
        );
        assert!(links.iter().all(|l| !l.as_str().ends_with("/help")));
    }

    #[test]
    fn test_links_on_page_without_list() {
        let html = "<html><body><p>Sorry, no results</p></body></html>";
        assert!(discovery().links_on_page(html, &base()).is_none());
    }

    #[test]
    fn test_links_on_page_skips_anchor_without_href() {
        let html = r#"<ul data-testid="product-card-list">
            <li><a>no link</a></li><li><a href="item-2.aspx">ok</a></li></ul>"#;
        let links = discovery().links_on_page(html, &base()).unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(
            links[0].as_str(),
            "https://shop.example.com/ca/shopping/women/dresses-1/item-2.aspx"
        );
    }

    #[tokio::test]
    async fn test_two_page_listing_yields_cap_in_order() {
        let fetcher = FixtureFetcher::new()
            .with_page(page_url(1), listing_html(1, 96))
            .with_page(page_url(2), listing_html(2, 24));

        let links = discovery().discover(&fetcher, &base(), 120).await;

        assert_eq!(links.len(), 120);
        assert!(links[0].as_str().ends_with("item-1-0.aspx"));
        assert!(links[95].as_str().ends_with("item-1-95.aspx"));
        assert!(links[96].as_str().ends_with("item-2-0.aspx"));
        assert!(links[119].as_str().ends_with("item-2-23.aspx"));
        // Cap reached on page 2, page 3 is never requested
        assert_eq!(fetcher.requests(), vec![page_url(1), page_url(2)]);
    }

    #[tokio::test]
    async fn test_cap_stops_mid_page() {
        let fetcher = FixtureFetcher::new()
            .with_page(page_url(1), listing_html(1, 96))
            .with_page(page_url(2), listing_html(2, 96));

        let links = discovery().discover(&fetcher, &base(), 100).await;

        assert_eq!(links.len(), 100);
        assert!(links[99].as_str().ends_with("item-2-3.aspx"));
    }

    #[tokio::test]
    async fn test_short_listing_stops_when_list_disappears() {
        let fetcher = FixtureFetcher::new()
            .with_page(page_url(1), listing_html(1, 10))
            .with_page(page_url(2), "<html><body>end</body></html>");

        let links = discovery().discover(&fetcher, &base(), 120).await;

        assert_eq!(links.len(), 10);
        assert_eq!(fetcher.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_returns_collected_links() {
        // Page 2 has no fixture and fails to load
        let fetcher = FixtureFetcher::new().with_page(page_url(1), listing_html(1, 96));

        let links = discovery().discover(&fetcher, &base(), 120).await;

        assert_eq!(links.len(), 96);
    }

    #[tokio::test]
    async fn test_empty_list_ends_pagination() {
        let fetcher = FixtureFetcher::new()
            .with_page(page_url(1), listing_html(1, 0))
            .with_page(page_url(2), listing_html(2, 5));

        let links = discovery().discover(&fetcher, &base(), 120).await;

        assert!(links.is_empty());
        assert_eq!(fetcher.requests(), vec![page_url(1)]);
    }

    #[tokio::test]
    async fn test_zero_cap_fetches_nothing() {
        let fetcher = FixtureFetcher::new().with_page(page_url(1), listing_html(1, 5));
        let links = discovery().discover(&fetcher, &base(), 0).await;
        assert!(links.is_empty());
        assert!(fetcher.requests().is_empty());
    }
}
