//! Listing parsers: map a document into an ordered sequence of
//! listing records. Document order is preserved and nothing is
//! deduplicated at this layer.

use kan_media::{EpisodeCard, ListingItem};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::{document::KanHtmlDocument, fields, selectors};

/// Anchor-style show cards from the kan-box lobby.
#[tracing::instrument(skip(doc))]
pub fn parse_show_list(doc: &KanHtmlDocument) -> Vec<ListingItem> {
    let dom = doc.tree();
    let sel = &*selectors::SHOW_LIST;
    let mut items = Vec::new();

    for card in select_cards(&dom, &sel.card) {
        let Some(page_url) = card_link(&card, &sel.link) else {
            continue;
        };
        let description = joined_texts(&card, &sel.detail)
            .or_else(|| fields::first_text(&card, &sel.card_text))
            .unwrap_or_default();

        items.push(ListingItem {
            id: fields::extract_id(&page_url),
            title: fields::extract_title(&card, &sel.title, &sel.image),
            description,
            thumbnail: fields::extract_thumbnail(&card, &sel.image),
            page_url,
        });
    }

    debug!(count = items.len(), "Parsed show list");
    items
}

/// Podcast-program anchor cards from the podcasts index.
///
/// The description field is unreliable in the source markup; it
/// defaults to the empty string and callers must tolerate that.
#[tracing::instrument(skip(doc))]
pub fn parse_podcast_list(doc: &KanHtmlDocument) -> Vec<ListingItem> {
    let dom = doc.tree();
    let sel = &*selectors::PODCAST_LIST;
    let mut items = Vec::new();

    for card in select_cards(&dom, &sel.card) {
        let Some(page_url) = card_link(&card, &sel.link) else {
            continue;
        };
        items.push(ListingItem {
            id: fields::extract_id(&page_url),
            title: fields::extract_title(&card, &sel.title, &sel.image),
            description: fields::first_text(&card, &sel.hidden_text).unwrap_or_default(),
            thumbnail: fields::extract_thumbnail(&card, &sel.image),
            page_url,
        });
    }

    debug!(count = items.len(), "Parsed podcast list");
    items
}

/// Row-style episode cards; the same structure serves both show and
/// podcast episode pages.
#[tracing::instrument(skip(doc))]
pub fn parse_episode_cards(doc: &KanHtmlDocument) -> Vec<EpisodeCard> {
    let dom = doc.tree();
    let sel = &*selectors::EPISODE_CARDS;
    let mut cards = Vec::new();

    for card in select_cards(&dom, &sel.card) {
        let Some(page_url) = card_link(&card, &sel.link) else {
            continue;
        };
        cards.push(EpisodeCard {
            item: ListingItem {
                id: fields::extract_id(&page_url),
                title: fields::extract_title(&card, &sel.title, &sel.image),
                description: fields::first_text(&card, &sel.description).unwrap_or_default(),
                thumbnail: fields::extract_thumbnail(&card, &sel.image),
                page_url,
            },
            duration_seconds: episode_duration(&card, &sel.list_items, &sel.date),
            published_at: fields::extract_published_at(&card, &sel.date),
        });
    }

    debug!(count = cards.len(), "Parsed episode cards");
    cards
}

/// All card elements under the first candidate selector that matches
/// anything, in document order.
fn select_cards<'a>(dom: &'a Html, candidates: &[Selector]) -> Vec<ElementRef<'a>> {
    for selector in candidates {
        let cards: Vec<ElementRef<'a>> = dom.select(selector).collect();
        if !cards.is_empty() {
            return cards;
        }
    }
    Vec::new()
}

/// Card target URL: the card's own `href` when the card is the anchor,
/// otherwise the first matching descendant anchor. Site-relative
/// targets are resolved to absolute URLs.
fn card_link(card: &ElementRef, link_selectors: &[Selector]) -> Option<String> {
    let href = card
        .value()
        .attr("href")
        .or_else(|| fields::first_match(card, link_selectors).and_then(|a| a.value().attr("href")))
        .filter(|href| !href.is_empty())?;
    Some(fields::resolve_site_url(href))
}

/// All texts under the first matching candidate, joined. The show
/// cards spread their description across several detail paragraphs.
fn joined_texts(card: &ElementRef, candidates: &[Selector]) -> Option<String> {
    for selector in candidates {
        let texts: Vec<String> = card
            .select(selector)
            .map(|e| e.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty())
            .collect();
        if !texts.is_empty() {
            return Some(texts.join(" | "));
        }
    }
    None
}

/// Duration comes from the first metadata list item that is not the
/// designated date item.
fn episode_duration(
    card: &ElementRef,
    list_items: &[Selector],
    date_selectors: &[Selector],
) -> Option<u32> {
    for selector in list_items {
        for li in card.select(selector) {
            let is_date_item = li.value().classes().any(|c| c == "date-local")
                || date_selectors.iter().any(|d| li.select(d).next().is_some());
            if is_date_item {
                continue;
            }
            if let Some(seconds) = fields::parse_duration(&li.text().collect::<String>()) {
                return Some(seconds);
            }
        }
    }
    None
}
