//! CSS selectors for the listing and product pages.
//!
//! These target the site's component markers directly. When the markup
//! changes, fields silently go missing; update the strings here and the
//! fixtures in the tests alongside them.

use scraper::Selector;

use crate::app::{Result, ShopfeedError};

/// Selectors for paginated category listings.
pub mod listing {
    /// The one product grid on a listing page.
    pub const PRODUCT_LIST: &str = r#"ul[data-testid="product-card-list"]"#;

    /// Product anchors inside the grid.
    pub const PRODUCT_ANCHOR: &str = "a";

    pub const PAGE_PARAM: &str = "page";
    pub const VIEW_PARAM: &str = "view";
    pub const SORT_PARAM: &str = "sort";
}

/// Selectors for product detail pages.
pub mod detail {
    /// Labelled body paragraphs ("FARFETCH ID:", "Brand style ID:").
    pub const BODY_PARAGRAPH: &str = r#"p[data-component="Body"]"#;
    pub const LABEL_VALUE: &str = "span";
    pub const ID_LABEL: &str = "FARFETCH ID:";
    pub const STYLE_ID_LABEL: &str = "Brand style ID:";

    pub const SHORT_DESCRIPTION: &str = r#"p[data-testid="product-short-description"]"#;
    pub const BRAND: &str = r#"a[data-ffref="pp_infobrd"]"#;

    pub const IMAGE: &str = r#"img[data-component="Img"]"#;

    pub const OG_URL: &str = r#"meta[property="og:url"]"#;
    pub const OG_AVAILABILITY: &str = r#"meta[property="og:availability"]"#;

    pub const COLOR: &str = "div.ltr-fzg9du.e1yiqd0 li.ltr-4y8w0i-Body";
    pub const PRICE: &str = r#"div[data-component="PriceCallout"] p[data-component="PriceLarge"]"#;

    pub const BREADCRUMBS: &str =
        r#"nav[data-component="BreadcrumbsNavigation"] ol[data-component="Breadcrumbs"]"#;
    pub const BREADCRUMB_ITEM: &str = r#"li[data-component="BreadcrumbWrapper"]"#;
    pub const BREADCRUMB_LINK: &str = "a";
}

/// Compile a selector, keeping the offending CSS in the error.
pub fn compile(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ShopfeedError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_selectors_compile() {
        let all = [
            listing::PRODUCT_LIST,
            listing::PRODUCT_ANCHOR,
            detail::BODY_PARAGRAPH,
            detail::LABEL_VALUE,
            detail::SHORT_DESCRIPTION,
            detail::BRAND,
            detail::IMAGE,
            detail::OG_URL,
            detail::OG_AVAILABILITY,
            detail::COLOR,
            detail::PRICE,
            detail::BREADCRUMBS,
            detail::BREADCRUMB_ITEM,
            detail::BREADCRUMB_LINK,
        ];
        for css in all {
            assert!(compile(css).is_ok(), "failed to compile {}", css);
        }
    }

    #[test]
    fn test_invalid_selector_reports_css() {
        let err = compile("p[data-component=").unwrap_err();
        assert!(err.to_string().contains("p[data-component="));
    }
}
