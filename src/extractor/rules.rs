use scraper::{ElementRef, Html, Selector};

use crate::app::Result;
use crate::domain::Field;
use crate::extractor::selectors::{self, detail};

/// How a rule reads its value out of the page.
pub(crate) enum Probe {
    /// Text of the first match
    Text(Selector),
    /// Attribute of the first match
    Attr {
        selector: Selector,
        attr: &'static str,
    },
    /// Attribute of the first match, only when `guard` is set and non-empty
    GuardedAttr {
        selector: Selector,
        guard: &'static str,
        attr: &'static str,
    },
    /// Text of `value` inside the first `selector` match mentioning `label`
    Labelled {
        selector: Selector,
        label: &'static str,
        value: Selector,
    },
    /// `"{first} {second}"`, only when both are present
    Pair { first: Selector, second: Selector },
    /// Link texts of each `item` under `container`, joined by `separator`
    Trail {
        container: Selector,
        item: Selector,
        link: Selector,
        separator: &'static str,
    },
}

impl Probe {
    pub(crate) fn read(&self, document: &Html) -> Option<String> {
        match self {
            Probe::Text(selector) => first(document, selector).map(text_of),
            Probe::Attr { selector, attr } => {
                first(document, selector)?.value().attr(attr).map(str::to_string)
            }
            Probe::GuardedAttr {
                selector,
                guard,
                attr,
            } => {
                let element = first(document, selector)?;
                let guarded = element.value().attr(guard).is_some_and(|g| !g.is_empty());
                if !guarded {
                    return None;
                }
                element.value().attr(attr).map(str::to_string)
            }
            Probe::Labelled {
                selector,
                label,
                value,
            } => {
                let label = label.to_lowercase();
                let paragraph = document
                    .select(selector)
                    .find(|el| text_of(*el).to_lowercase().contains(&label))?;
                paragraph.select(value).next().map(text_of)
            }
            Probe::Pair {
                first: a,
                second: b,
            } => {
                let a = first(document, a).map(text_of)?;
                let b = first(document, b).map(text_of)?;
                Some(format!("{} {}", a, b))
            }
            Probe::Trail {
                container,
                item,
                link,
                separator,
            } => {
                let container = first(document, container)?;
                let crumbs: Vec<String> = container
                    .select(item)
                    .filter_map(|crumb| crumb.select(link).next())
                    .map(text_of)
                    .collect();
                Some(crumbs.join(separator))
            }
        }
    }
}

/// One independent extraction: a probe and the fields it fills.
pub(crate) struct Rule {
    pub fields: &'static [Field],
    pub probe: Probe,
}

/// The detail-page rule list, in evaluation order.
pub(crate) fn product_rules() -> Result<Vec<Rule>> {
    use selectors::compile;

    Ok(vec![
        Rule {
            fields: &[Field::Id],
            probe: Probe::Labelled {
                selector: compile(detail::BODY_PARAGRAPH)?,
                label: detail::ID_LABEL,
                value: compile(detail::LABEL_VALUE)?,
            },
        },
        Rule {
            // One read feeds both the group id and the manufacturer part number
            fields: &[Field::ItemGroupId, Field::Mpn],
            probe: Probe::Labelled {
                selector: compile(detail::BODY_PARAGRAPH)?,
                label: detail::STYLE_ID_LABEL,
                value: compile(detail::LABEL_VALUE)?,
            },
        },
        Rule {
            fields: &[Field::Title],
            probe: Probe::Pair {
                first: compile(detail::BRAND)?,
                second: compile(detail::SHORT_DESCRIPTION)?,
            },
        },
        Rule {
            fields: &[Field::ImageLink],
            probe: Probe::GuardedAttr {
                selector: compile(detail::IMAGE)?,
                guard: "alt",
                attr: "src",
            },
        },
        Rule {
            fields: &[Field::Link],
            probe: Probe::Attr {
                selector: compile(detail::OG_URL)?,
                attr: "content",
            },
        },
        Rule {
            fields: &[Field::Brand],
            probe: Probe::Text(compile(detail::BRAND)?),
        },
        Rule {
            fields: &[Field::Availability],
            probe: Probe::Attr {
                selector: compile(detail::OG_AVAILABILITY)?,
                attr: "content",
            },
        },
        Rule {
            fields: &[Field::Color],
            probe: Probe::Text(compile(detail::COLOR)?),
        },
        Rule {
            fields: &[Field::Price],
            probe: Probe::Text(compile(detail::PRICE)?),
        },
        Rule {
            fields: &[Field::ProductType],
            probe: Probe::Trail {
                container: compile(detail::BREADCRUMBS)?,
                item: compile(detail::BREADCRUMB_ITEM)?,
                link: compile(detail::BREADCRUMB_LINK)?,
                separator: " > ",
            },
        },
    ])
}

fn first<'a>(document: &'a Html, selector: &Selector) -> Option<ElementRef<'a>> {
    document.select(selector).next()
}

/// Rendered text of an element: whitespace runs collapsed, ends trimmed.
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
