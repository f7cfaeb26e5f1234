//! Host-facing entry points: a fixed directory of listings, listing
//! exploration, and item resolution.
//!
//! Every failure degrades to an empty listing or `None`; markup drift
//! on the source site must never crash the host. Failures are still
//! reported through tracing for operability.

use kan_media::{
    DirectoryEntry, EntryKind, ListingItem, MediaKind, PlayableMedia, SourceId, StreamFormat,
    StreamRef,
};
use tracing::{info, warn};

use crate::{
    fetch::PageFetcher,
    fields::SITE_ORIGIN,
    listing::{parse_episode_cards, parse_podcast_list, parse_show_list},
    pagination::{PageStrategy, Paginator},
    playable::parse_playable,
};

/// The KAN content adapter: an injected transport plus the fixed site
/// layout. Holds no state between calls; a single instance is safe to
/// share across concurrent host calls.
pub struct KanAdapter<F> {
    fetcher: F,
    max_pages: usize,
}

impl<F: PageFetcher + Sync> KanAdapter<F> {
    pub fn new(fetcher: F) -> Self {
        KanAdapter {
            fetcher,
            max_pages: 5,
        }
    }

    /// Override the pagination safety bound (default 5 pages).
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// The static top-level directory.
    pub fn discover(&self) -> Vec<DirectoryEntry> {
        vec![
            DirectoryEntry {
                id: SourceId::ShowsRoot,
                title: "Shows".to_string(),
                thumbnail: None,
                kind: EntryKind::Directory,
            },
            DirectoryEntry {
                id: SourceId::PodcastsRoot,
                title: "Podcasts".to_string(),
                thumbnail: None,
                kind: EntryKind::Directory,
            },
        ]
    }

    /// List the children of a directory id. Episode ids are not
    /// directories and yield an empty listing.
    pub async fn explore(&self, id: &SourceId) -> Vec<DirectoryEntry> {
        match id {
            SourceId::ShowsRoot => {
                let items = Paginator::new(PageStrategy::QueryPage)
                    .with_max_pages(self.max_pages)
                    .collect_pages(&self.fetcher, &page_url(id), parse_show_list)
                    .await;
                info!(count = items.len(), "Explored shows");
                items
                    .into_iter()
                    .map(|item| listing_entry(item, SourceId::Show, EntryKind::Directory))
                    .collect()
            }
            SourceId::PodcastsRoot => {
                let items = Paginator::new(PageStrategy::LinkDiscovery)
                    .with_max_pages(self.max_pages)
                    .collect_pages(&self.fetcher, &page_url(id), parse_podcast_list)
                    .await;
                info!(count = items.len(), "Explored podcasts");
                items
                    .into_iter()
                    .map(|item| listing_entry(item, SourceId::Podcast, EntryKind::Directory))
                    .collect()
            }
            SourceId::Show(_) | SourceId::Podcast(_) => {
                let url = page_url(id);
                let doc = match self.fetcher.fetch_page(&url).await {
                    Ok(doc) => doc,
                    Err(e) => {
                        warn!(error = ?e, url, "Failed to fetch listing page");
                        return Vec::new();
                    }
                };
                let (to_id, kind): (fn(String) -> SourceId, EntryKind) = match id {
                    SourceId::Show(_) => (SourceId::ShowEpisode, EntryKind::Video),
                    _ => (SourceId::PodcastEpisode, EntryKind::Audio),
                };
                let cards = parse_episode_cards(&doc);
                info!(count = cards.len(), %id, "Explored episodes");
                cards
                    .into_iter()
                    .map(|card| listing_entry(card.item, to_id, kind))
                    .collect()
            }
            SourceId::ShowEpisode(_) | SourceId::PodcastEpisode(_) => {
                warn!(%id, "Not a directory id");
                Vec::new()
            }
        }
    }

    /// Resolve an episode id to playable media. Non-episode ids and
    /// unplayable pages yield `None`.
    pub async fn get_item(&self, id: &SourceId) -> Option<PlayableMedia> {
        if !matches!(
            id,
            SourceId::ShowEpisode(_) | SourceId::PodcastEpisode(_)
        ) {
            warn!(%id, "Not a playable id");
            return None;
        }
        let url = page_url(id);
        let doc = match self.fetcher.fetch_page(&url).await {
            Ok(doc) => doc,
            Err(e) => {
                warn!(error = ?e, url, "Failed to fetch item page");
                return None;
            }
        };
        parse_playable(&doc)
    }
}

/// Map an already-resolved item's declared kind to its fixed stream
/// labels. Unknown kinds yield no streams.
pub fn streams_for_kind(kind: &str, url: &str) -> Vec<StreamRef> {
    match kind.parse::<MediaKind>() {
        Ok(MediaKind::Video) => vec![StreamRef {
            url: url.to_string(),
            format: StreamFormat::Hls,
            quality: "auto".to_string(),
        }],
        Ok(MediaKind::Audio) => vec![StreamRef {
            url: url.to_string(),
            format: StreamFormat::Mp3,
            quality: "high".to_string(),
        }],
        Err(_) => Vec::new(),
    }
}

/// Content URL for an id. Item URLs are rebuilt from per-kind
/// templates; the raw id is the last path segment of the item's page
/// URL, so the rebuilt URL round-trips through `fields::extract_id`.
fn page_url(id: &SourceId) -> String {
    match id {
        SourceId::ShowsRoot => format!("{SITE_ORIGIN}/lobby/kan-box/"),
        SourceId::PodcastsRoot => format!("{SITE_ORIGIN}/podcasts/"),
        SourceId::Show(raw) => format!("{SITE_ORIGIN}/lobby/kan-box/{raw}/"),
        SourceId::Podcast(raw) => format!("{SITE_ORIGIN}/podcasts/{raw}/"),
        SourceId::ShowEpisode(raw) => format!("{SITE_ORIGIN}/video/{raw}/"),
        SourceId::PodcastEpisode(raw) => format!("{SITE_ORIGIN}/podcasts/episode/{raw}/"),
    }
}

fn listing_entry(
    item: ListingItem,
    to_id: fn(String) -> SourceId,
    kind: EntryKind,
) -> DirectoryEntry {
    DirectoryEntry {
        id: to_id(item.id),
        title: item.title,
        thumbnail: item.thumbnail,
        kind,
    }
}
