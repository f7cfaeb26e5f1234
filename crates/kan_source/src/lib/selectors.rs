//! CSS selector fixtures for the kan.org.il markup.
//!
//! The site has shipped at least two structurally different card
//! shapes for the same logical entity, so every lookup goes through an
//! ordered list of candidate selectors and the first non-empty match
//! wins. Treat the strings here as configuration to be reverified
//! against live markup, not ground truth.

use std::sync::LazyLock;

use scraper::Selector;
use tracing::warn;

/// Compile a candidate list, skipping (and logging) invalid entries.
pub(crate) fn compile_selectors(candidates: &[&str]) -> Vec<Selector> {
    let mut selectors = Vec::with_capacity(candidates.len());
    for raw in candidates {
        match Selector::parse(raw) {
            Ok(selector) => selectors.push(selector),
            Err(e) => warn!(selector = raw, error = %e, "Skipping invalid selector"),
        }
    }
    selectors
}

pub(crate) struct ShowListSelectors {
    pub card: Vec<Selector>,
    pub link: Vec<Selector>,
    pub title: Vec<Selector>,
    /// Detail paragraphs; all matches are joined into the description.
    pub detail: Vec<Selector>,
    /// Single-field description fallback.
    pub card_text: Vec<Selector>,
    pub image: Vec<Selector>,
}

pub(crate) static SHOW_LIST: LazyLock<ShowListSelectors> = LazyLock::new(|| ShowListSelectors {
    card: compile_selectors(&[".card-link.d-inline-block", "a.card-link"]),
    link: compile_selectors(&["a[href]"]),
    title: compile_selectors(&[".card-body .details p", ".card-title"]),
    detail: compile_selectors(&[".details p"]),
    card_text: compile_selectors(&[".card-text"]),
    image: compile_selectors(&["img"]),
});

pub(crate) struct PodcastListSelectors {
    pub card: Vec<Selector>,
    pub link: Vec<Selector>,
    pub title: Vec<Selector>,
    /// Visually hidden description text; frequently absent.
    pub hidden_text: Vec<Selector>,
    pub image: Vec<Selector>,
}

pub(crate) static PODCAST_LIST: LazyLock<PodcastListSelectors> =
    LazyLock::new(|| PodcastListSelectors {
        card: compile_selectors(&["a.card-link.podcast-item", ".card-link.d-inline-block"]),
        link: compile_selectors(&["a[href]"]),
        title: compile_selectors(&[".card-title", ".card-body .details p"]),
        hidden_text: compile_selectors(&[".card-body .d-none", ".hidden-text"]),
        image: compile_selectors(&["img"]),
    });

pub(crate) struct EpisodeCardSelectors {
    pub card: Vec<Selector>,
    pub link: Vec<Selector>,
    pub title: Vec<Selector>,
    pub description: Vec<Selector>,
    pub image: Vec<Selector>,
    /// The designated date element carrying `data-date-utc`.
    pub date: Vec<Selector>,
    /// Metadata list items; the first non-date item holds the duration.
    pub list_items: Vec<Selector>,
}

pub(crate) static EPISODE_CARDS: LazyLock<EpisodeCardSelectors> =
    LazyLock::new(|| EpisodeCardSelectors {
        card: compile_selectors(&[".card.card-row"]),
        link: compile_selectors(&["a.card-img", "a[href]"]),
        title: compile_selectors(&[".card-title"]),
        description: compile_selectors(&[".description"]),
        image: compile_selectors(&["img"]),
        date: compile_selectors(&[".date-local"]),
        list_items: compile_selectors(&["ul.card-list li"]),
    });

pub(crate) struct PaginationSelectors {
    /// The next-page control; `disabled` class means end of listing.
    pub next: Vec<Selector>,
    /// Anchors enumerating the listing's pages.
    pub links: Vec<Selector>,
}

pub(crate) static PAGINATION: LazyLock<PaginationSelectors> =
    LazyLock::new(|| PaginationSelectors {
        next: compile_selectors(&[".pagination-next__link", "a[rel='next']"]),
        links: compile_selectors(&[".pagination a", "ul.pagination li a"]),
    });

pub(crate) struct AudioPageSelectors {
    /// The player element; its presence marks an audio page.
    pub info: Vec<Selector>,
    pub title: Vec<Selector>,
    pub description: Vec<Selector>,
    pub thumbnail: Vec<Selector>,
    pub date: Vec<Selector>,
    pub list_items: Vec<Selector>,
}

pub(crate) static AUDIO_PAGE: LazyLock<AudioPageSelectors> =
    LazyLock::new(|| AudioPageSelectors {
        info: compile_selectors(&[".audio-episode-info[data-player-src]"]),
        title: compile_selectors(&["h2.title", ".episode-title"]),
        description: compile_selectors(&[".podcast-content-wrapper .item-content"]),
        thumbnail: compile_selectors(&[".audio-episode-info-image-thumbnail"]),
        date: compile_selectors(&[".date-local"]),
        list_items: compile_selectors(&[".podcast-content-wrapper ul li"]),
    });
