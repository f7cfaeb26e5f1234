//! Field extractors: pure functions that read a DOM node (or a plain
//! string) and return one normalized scalar.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};
use url::Url;

/// Fixed site origin; site-relative URLs are resolved against it.
pub const SITE_ORIGIN: &str = "https://www.kan.org.il";

pub(crate) const TITLE_PLACEHOLDER: &str = "No title";

// Durations appear as "<N> דקות" (Hebrew "minutes"); there is no hour
// component in the source markup.
static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*דקות").unwrap());

static ORIGIN_URL: LazyLock<Url> =
    LazyLock::new(|| Url::parse(SITE_ORIGIN).expect("fixed site origin is a valid URL"));

/// The last non-empty `/`-segment of a URL, or `""` when the input is
/// empty. Query strings and fragments are ignored.
pub fn extract_id(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or("");
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .last()
        .unwrap_or("")
        .to_string()
}

/// Resolve a site-relative (`/`-prefixed) URL against the fixed
/// origin; anything else passes through unchanged.
pub fn resolve_site_url(raw: &str) -> String {
    if raw.starts_with('/') {
        ORIGIN_URL
            .join(raw)
            .map(Into::into)
            .unwrap_or_else(|_| format!("{SITE_ORIGIN}{raw}"))
    } else {
        raw.to_string()
    }
}

/// `"29 דקות"` -> 1740. Absent or unit-less text yields `None`.
pub fn parse_duration(text: &str) -> Option<u32> {
    let caps = DURATION_RE.captures(text)?;
    caps[1].parse::<u32>().ok().map(|minutes| minutes * 60)
}

/// First element matching any candidate selector, in candidate order.
pub(crate) fn first_match<'a>(
    el: &ElementRef<'a>,
    selectors: &[Selector],
) -> Option<ElementRef<'a>> {
    selectors.iter().find_map(|s| el.select(s).next())
}

/// First non-empty trimmed text reachable through the candidates.
pub(crate) fn first_text(el: &ElementRef, selectors: &[Selector]) -> Option<String> {
    selectors.iter().find_map(|s| {
        el.select(s)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty())
    })
}

/// Title element text, then image alt, then image title, then the
/// fixed placeholder. Always trimmed.
pub(crate) fn extract_title(
    el: &ElementRef,
    title_selectors: &[Selector],
    image_selectors: &[Selector],
) -> String {
    if let Some(title) = first_text(el, title_selectors) {
        return title;
    }
    if let Some(img) = first_match(el, image_selectors) {
        for attr in ["alt", "title"] {
            if let Some(value) = img.value().attr(attr) {
                let value = value.trim();
                if !value.is_empty() {
                    return value.to_string();
                }
            }
        }
    }
    TITLE_PLACEHOLDER.to_string()
}

/// Image source, resolved to an absolute URL when site-relative.
pub(crate) fn extract_thumbnail(
    el: &ElementRef,
    image_selectors: &[Selector],
) -> Option<String> {
    let img = first_match(el, image_selectors)?;
    let src = img.value().attr("src").filter(|s| !s.is_empty())?;
    Some(resolve_site_url(src))
}

/// Verbatim `data-date-utc` attribute of the designated date element;
/// no timezone conversion or reformatting.
pub(crate) fn extract_published_at(
    el: &ElementRef,
    date_selectors: &[Selector],
) -> Option<String> {
    let date_el = first_match(el, date_selectors)?;
    date_el
        .value()
        .attr("data-date-utc")
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
