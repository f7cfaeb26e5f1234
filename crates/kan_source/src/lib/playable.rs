//! Playable parsers: resolve a single item page into playable media.
//!
//! Two terminal shapes exist. Video pages embed a JSON-LD
//! structured-data block describing a `VideoObject`; audio pages carry
//! a player element with a direct MP3 source attribute. A page with
//! neither shape is simply not playable.

use std::sync::LazyLock;

use kan_media::{MediaKind, PlayableMedia, StreamFormat, StreamRef};
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{document::KanHtmlDocument, error::Error, fields, selectors};

static LD_JSON: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).unwrap());

const VIDEO_TITLE_PLACEHOLDER: &str = "KAN Video";

#[derive(Debug, Deserialize)]
struct VideoObject {
    #[serde(rename = "@type")]
    kind: Option<String>,
    name: Option<String>,
    description: Option<String>,
    #[serde(rename = "thumbnailUrl")]
    thumbnail_url: Option<String>,
    #[serde(rename = "uploadDate")]
    upload_date: Option<String>,
    #[serde(rename = "contentUrl")]
    content_url: Option<String>,
}

/// Resolve an item page to playable media.
///
/// Probes the structured-data block first; when present, the page is
/// judged as a video page and the audio shape is not consulted. A
/// malformed or non-video block yields `None`, never an error.
#[tracing::instrument(skip(doc))]
pub fn parse_playable(doc: &KanHtmlDocument) -> Option<PlayableMedia> {
    let dom = doc.tree();

    if let Some(script) = dom.select(&LD_JSON).next() {
        let raw = script.text().collect::<String>();
        return match video_from_ld_json(&raw) {
            Ok(media) => Some(media),
            Err(e) => {
                warn!(error = %e, "Structured-data block did not yield a video");
                None
            }
        };
    }

    if fields::first_match(&dom.root_element(), &selectors::AUDIO_PAGE.info).is_some() {
        return audio_from_dom(&dom);
    }

    debug!("Page has neither a structured-data block nor a player element");
    None
}

/// Video shape: parse the JSON-LD block, unwrap a possible array
/// wrapper, and require a `VideoObject` with a content URL.
fn video_from_ld_json(raw: &str) -> Result<PlayableMedia, Error> {
    let data: Value = serde_json::from_str(raw)?;
    let entry = match data {
        Value::Array(mut entries) => {
            if entries.is_empty() {
                return Err(Error::ParseError("empty structured-data array"));
            }
            let index = entries
                .iter()
                .position(|e| e["@type"] == "VideoObject")
                .unwrap_or(0);
            entries.swap_remove(index)
        }
        other => other,
    };

    let video: VideoObject = serde_json::from_value(entry)?;
    if video.kind.as_deref() != Some("VideoObject") {
        return Err(Error::ParseError("structured data is not a VideoObject"));
    }
    let url = video
        .content_url
        .filter(|u| !u.is_empty())
        .ok_or(Error::ParseError("VideoObject has no contentUrl"))?;

    Ok(PlayableMedia {
        kind: MediaKind::Video,
        title: video
            .name
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| VIDEO_TITLE_PLACEHOLDER.to_string()),
        description: video
            .description
            .map(|d| d.trim().to_string())
            .unwrap_or_default(),
        thumbnail: video.thumbnail_url,
        published_at: video.upload_date,
        duration_seconds: None,
        streams: vec![StreamRef {
            url,
            format: StreamFormat::Hls,
            quality: "auto".to_string(),
        }],
    })
}

/// Audio shape: the player element carries the MP3 source directly;
/// the surrounding content wrapper supplies the episode metadata.
fn audio_from_dom(dom: &Html) -> Option<PlayableMedia> {
    let sel = &*selectors::AUDIO_PAGE;
    let root = dom.root_element();

    let info = fields::first_match(&root, &sel.info)?;
    let src = info
        .value()
        .attr("data-player-src")
        .map(str::trim)
        .filter(|s| !s.is_empty())?;

    let title = info
        .value()
        .attr("data-player-title")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .or_else(|| fields::first_text(&root, &sel.title))
        .unwrap_or_default();

    let duration_seconds = sel
        .list_items
        .iter()
        .flat_map(|s| root.select(s))
        .find_map(|li| fields::parse_duration(&li.text().collect::<String>()));

    Some(PlayableMedia {
        kind: MediaKind::Audio,
        title,
        description: fields::first_text(&root, &sel.description).unwrap_or_default(),
        thumbnail: fields::extract_thumbnail(&root, &sel.thumbnail),
        published_at: fields::extract_published_at(&root, &sel.date),
        duration_seconds,
        streams: vec![StreamRef {
            url: src.to_string(),
            format: StreamFormat::Mp3,
            quality: "high".to_string(),
        }],
    })
}
