mod mocks;

use kan_media::{EntryKind, MediaKind, SourceId, StreamFormat};
use kan_source::KanAdapter;
use mocks::fetcher::MockPageFetcher;

const BASE: &str = "https://www.kan.org.il";

fn shows_fetcher() -> MockPageFetcher {
    MockPageFetcher::new()
        .with_page(
            format!("{BASE}/lobby/kan-box/"),
            include_str!("fixtures/shows_page1.html"),
        )
        .with_page(
            format!("{BASE}/lobby/kan-box/?page=2"),
            include_str!("fixtures/shows_page2.html"),
        )
        .with_page(
            format!("{BASE}/lobby/kan-box/?page=3"),
            include_str!("fixtures/shows_page3.html"),
        )
}

// ─── Discover ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn discover_returns_the_static_directory() {
    let adapter = KanAdapter::new(MockPageFetcher::new());
    let entries = adapter.discover();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, SourceId::ShowsRoot);
    assert_eq!(entries[1].id, SourceId::PodcastsRoot);
    assert!(entries.iter().all(|e| e.kind == EntryKind::Directory));
}

// ─── Shows pagination (next-button variant) ──────────────────────────────────

#[tokio::test]
async fn shows_walk_all_pages_until_disabled_next() {
    let fetcher = shows_fetcher();
    let calls = fetcher.calls.clone();
    let adapter = KanAdapter::new(fetcher);

    let entries = adapter.explore(&SourceId::ShowsRoot).await;

    // 2 + 2 + 1 cards, page order then document order
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0].id, SourceId::Show("night-court".to_string()));
    assert_eq!(entries[1].id, SourceId::Show("zero-hour".to_string()));
    assert_eq!(entries[4].id, SourceId::Show("manayek".to_string()));
    assert!(entries.iter().all(|e| e.kind == EntryKind::Directory));

    let calls = calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![
            format!("{BASE}/lobby/kan-box/"),
            format!("{BASE}/lobby/kan-box/?page=2"),
            format!("{BASE}/lobby/kan-box/?page=3"),
        ],
        "exactly one fetch per page, in page order"
    );
}

#[tokio::test]
async fn shows_pagination_stops_at_the_safety_bound() {
    // every page advertises an enabled next control
    let mut fetcher = MockPageFetcher::new().with_page(
        format!("{BASE}/lobby/kan-box/"),
        include_str!("fixtures/shows_infinite.html"),
    );
    for page in 2..=10 {
        fetcher = fetcher.with_page(
            format!("{BASE}/lobby/kan-box/?page={page}"),
            include_str!("fixtures/shows_infinite.html"),
        );
    }
    let calls = fetcher.calls.clone();
    let adapter = KanAdapter::new(fetcher);

    let entries = adapter.explore(&SourceId::ShowsRoot).await;

    assert_eq!(entries.len(), 5, "one card per page, five pages");
    assert_eq!(calls.lock().unwrap().len(), 5, "default bound is 5 pages");
}

#[tokio::test]
async fn shows_pagination_stops_on_an_empty_page() {
    let fetcher = MockPageFetcher::new()
        .with_page(
            format!("{BASE}/lobby/kan-box/"),
            include_str!("fixtures/shows_page1.html"),
        )
        .with_page(
            format!("{BASE}/lobby/kan-box/?page=2"),
            "<html><body><p>no cards</p></body></html>",
        );
    let calls = fetcher.calls.clone();
    let adapter = KanAdapter::new(fetcher);

    let entries = adapter.explore(&SourceId::ShowsRoot).await;

    assert_eq!(entries.len(), 2, "only the first page contributes items");
    assert_eq!(calls.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn shows_respect_a_lowered_page_bound() {
    let fetcher = shows_fetcher();
    // a borrowed fetcher works too; hosts may share one across calls
    let adapter = KanAdapter::new(&fetcher).with_max_pages(1);

    let entries = adapter.explore(&SourceId::ShowsRoot).await;

    assert_eq!(entries.len(), 2);
    assert_eq!(fetcher.calls.lock().unwrap().len(), 1);
}

// ─── Podcasts pagination (link-discovery variant) ────────────────────────────

#[tokio::test]
async fn podcasts_fetch_each_discovered_page_once() {
    let fetcher = MockPageFetcher::new()
        .with_page(
            format!("{BASE}/podcasts/"),
            include_str!("fixtures/podcasts_index.html"),
        )
        .with_page(
            format!("{BASE}/podcasts/?page=2"),
            include_str!("fixtures/podcasts_page2.html"),
        )
        .with_page(
            format!("{BASE}/podcasts/?page=3"),
            include_str!("fixtures/podcasts_page3.html"),
        );
    let calls = fetcher.calls.clone();
    let adapter = KanAdapter::new(fetcher);

    let entries = adapter.explore(&SourceId::PodcastsRoot).await;

    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0].id, SourceId::Podcast("one-on-one".to_string()));
    assert_eq!(entries[3].id, SourceId::Podcast("shir-echad".to_string()));

    // the index lists ?page=2 twice; it must be fetched once
    let calls = calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![
            format!("{BASE}/podcasts/"),
            format!("{BASE}/podcasts/?page=2"),
            format!("{BASE}/podcasts/?page=3"),
        ]
    );
}

#[tokio::test]
async fn podcasts_link_discovery_respects_the_page_bound() {
    // the index advertises seven further pages; only four may be taken
    let mut fetcher = MockPageFetcher::new().with_page(
        format!("{BASE}/podcasts/"),
        include_str!("fixtures/podcasts_long_index.html"),
    );
    for page in 2..=8 {
        fetcher = fetcher.with_page(
            format!("{BASE}/podcasts/?page={page}"),
            include_str!("fixtures/podcasts_page2.html"),
        );
    }
    let calls = fetcher.calls.clone();
    let adapter = KanAdapter::new(fetcher);

    let entries = adapter.explore(&SourceId::PodcastsRoot).await;

    assert_eq!(entries.len(), 5, "index card plus one card per taken page");
    let calls = calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![
            format!("{BASE}/podcasts/"),
            format!("{BASE}/podcasts/?page=2"),
            format!("{BASE}/podcasts/?page=3"),
            format!("{BASE}/podcasts/?page=4"),
            format!("{BASE}/podcasts/?page=5"),
        ],
        "the index plus the first four discovered links"
    );
}

// ─── Episode listings ────────────────────────────────────────────────────────

#[tokio::test]
async fn exploring_a_show_lists_its_episode_cards() {
    let fetcher = MockPageFetcher::new().with_page(
        format!("{BASE}/lobby/kan-box/night-court/"),
        include_str!("fixtures/episode_cards.html"),
    );
    let adapter = KanAdapter::new(fetcher);

    let entries = adapter
        .explore(&SourceId::Show("night-court".to_string()))
        .await;

    assert_eq!(entries.len(), 2);
    assert_eq!(
        entries[0].id,
        SourceId::ShowEpisode("night-court-s01e04".to_string())
    );
    assert!(entries.iter().all(|e| e.kind == EntryKind::Video));
}

#[tokio::test]
async fn exploring_a_podcast_lists_audio_episodes() {
    let fetcher = MockPageFetcher::new().with_page(
        format!("{BASE}/podcasts/one-on-one/"),
        include_str!("fixtures/episode_cards.html"),
    );
    let adapter = KanAdapter::new(fetcher);

    let entries = adapter
        .explore(&SourceId::Podcast("one-on-one".to_string()))
        .await;

    assert_eq!(entries.len(), 2);
    assert_eq!(
        entries[0].id,
        SourceId::PodcastEpisode("night-court-s01e04".to_string())
    );
    assert!(entries.iter().all(|e| e.kind == EntryKind::Audio));
}

#[tokio::test]
async fn exploring_an_episode_id_yields_nothing() {
    let fetcher = MockPageFetcher::new();
    let calls = fetcher.calls.clone();
    let adapter = KanAdapter::new(fetcher);

    let entries = adapter
        .explore(&SourceId::ShowEpisode("night-court-s01e04".to_string()))
        .await;

    assert!(entries.is_empty());
    assert!(calls.lock().unwrap().is_empty(), "nothing should be fetched");
}

// ─── Item resolution ─────────────────────────────────────────────────────────

#[tokio::test]
async fn video_episode_resolves_to_a_single_hls_stream() {
    let fetcher = MockPageFetcher::new().with_page(
        format!("{BASE}/video/night-court-s01e04/"),
        include_str!("fixtures/video_item.html"),
    );
    let adapter = KanAdapter::new(fetcher);

    let media = adapter
        .get_item(&SourceId::ShowEpisode("night-court-s01e04".to_string()))
        .await
        .expect("video item should resolve");

    assert_eq!(media.kind, MediaKind::Video);
    assert_eq!(media.title, "לילה משפטי - פרק 4");
    assert_eq!(media.streams.len(), 1);
    assert_eq!(media.streams[0].format, StreamFormat::Hls);
    assert_eq!(
        media.streams[0].url,
        "https://kan-vod.example.com/hls/night-court/e4/master.m3u8"
    );
}

#[tokio::test]
async fn audio_episode_resolves_to_a_single_mp3_stream() {
    let fetcher = MockPageFetcher::new().with_page(
        format!("{BASE}/podcasts/episode/ep-129/"),
        include_str!("fixtures/audio_item.html"),
    );
    let adapter = KanAdapter::new(fetcher);

    let media = adapter
        .get_item(&SourceId::PodcastEpisode("ep-129".to_string()))
        .await
        .expect("audio item should resolve");

    assert_eq!(media.kind, MediaKind::Audio);
    assert_eq!(media.title, "אחד על אחד - פרק 129");
    assert_eq!(media.duration_seconds, Some(1740));
    assert_eq!(media.streams.len(), 1);
    assert_eq!(media.streams[0].format, StreamFormat::Mp3);
    assert_eq!(media.streams[0].quality, "high");
}

#[tokio::test]
async fn unplayable_page_resolves_to_none() {
    let fetcher = MockPageFetcher::new().with_page(
        format!("{BASE}/video/some-ep/"),
        include_str!("fixtures/not_playable.html"),
    );
    let adapter = KanAdapter::new(fetcher);

    let media = adapter
        .get_item(&SourceId::ShowEpisode("some-ep".to_string()))
        .await;
    assert!(media.is_none());
}

#[tokio::test]
async fn malformed_structured_data_resolves_to_none() {
    let fetcher = MockPageFetcher::new().with_page(
        format!("{BASE}/video/broken-ep/"),
        include_str!("fixtures/malformed_item.html"),
    );
    let adapter = KanAdapter::new(fetcher);

    let media = adapter
        .get_item(&SourceId::ShowEpisode("broken-ep".to_string()))
        .await;
    assert!(media.is_none());
}

#[tokio::test]
async fn listing_ids_are_not_playable() {
    let fetcher = MockPageFetcher::new();
    let calls = fetcher.calls.clone();
    let adapter = KanAdapter::new(fetcher);

    let media = adapter
        .get_item(&SourceId::Show("night-court".to_string()))
        .await;

    assert!(media.is_none());
    assert!(calls.lock().unwrap().is_empty(), "nothing should be fetched");
}

// ─── Transport failure ──────────────────────────────────────────────────────

#[tokio::test]
async fn fetch_failures_degrade_to_empty_results() {
    let adapter = KanAdapter::new(MockPageFetcher::failing("connection refused"));

    assert!(adapter.explore(&SourceId::ShowsRoot).await.is_empty());
    assert!(adapter.explore(&SourceId::PodcastsRoot).await.is_empty());
    assert!(adapter
        .explore(&SourceId::Show("night-court".to_string()))
        .await
        .is_empty());
    assert!(adapter
        .get_item(&SourceId::ShowEpisode("some-ep".to_string()))
        .await
        .is_none());
}
