use std::fmt;

use url::Url;

/// Absolute URL of a product detail page, as found on a listing page.
///
/// Links keep discovery order; duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductLink(Url);

impl ProductLink {
    /// Resolve an anchor `href` against the listing URL.
    pub fn resolve(base: &Url, href: &str) -> Result<Self, url::ParseError> {
        base.join(href.trim()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Url> for ProductLink {
    fn from(url: Url) -> Self {
        Self(url)
    }
}

impl fmt::Display for ProductLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.example.com/ca/shopping/women/dresses-1/items.aspx?page=2").unwrap()
    }

    #[test]
    fn test_resolve_root_relative_href() {
        let link = ProductLink::resolve(&base(), "/ca/shopping/women/item-123.aspx").unwrap();
        assert_eq!(
            link.as_str(),
            "https://www.example.com/ca/shopping/women/item-123.aspx"
        );
    }

    #[test]
    fn test_resolve_keeps_absolute_href() {
        let link = ProductLink::resolve(&base(), "https://cdn.example.org/p/9").unwrap();
        assert_eq!(link.as_str(), "https://cdn.example.org/p/9");
    }

    #[test]
    fn test_resolve_trims_whitespace() {
        let link = ProductLink::resolve(&base(), "  item-7.aspx \n").unwrap();
        assert_eq!(
            link.as_str(),
            "https://www.example.com/ca/shopping/women/dresses-1/item-7.aspx"
        );
    }
}
