use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// One entry of a paginated listing (a show or a podcast program).
///
/// `id` is always the last non-empty `/`-segment of `page_url`, so it
/// can be rebuilt from the URL deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingItem {
    pub id: String,
    pub title: String,
    /// May be empty; the source markup is unreliable about this field.
    pub description: String,
    pub thumbnail: Option<String>,
    pub page_url: String,
}

/// A row-style episode card, as rendered on show and podcast pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeCard {
    #[serde(flatten)]
    pub item: ListingItem,
    pub duration_seconds: Option<u32>,
    /// Raw UTC token as supplied by the markup, never reformatted.
    pub published_at: Option<String>,
}

/// A fully resolved item page, ready for playback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayableMedia {
    pub kind: MediaKind,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub published_at: Option<String>,
    pub duration_seconds: Option<u32>,
    pub streams: Vec<StreamRef>,
}

/// A single playable URL plus its format and quality label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamRef {
    pub url: String,
    pub format: StreamFormat,
    pub quality: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamFormat {
    Hls,
    Mp3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown media kind: {0}")]
pub struct ParseMediaKindError(pub String);

impl FromStr for MediaKind {
    type Err = ParseMediaKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video" => Ok(MediaKind::Video),
            "audio" => Ok(MediaKind::Audio),
            other => Err(ParseMediaKindError(other.to_string())),
        }
    }
}

/// What a directory entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    Video,
    Audio,
}

/// A row the host renders when browsing a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub id: SourceId,
    pub title: String,
    pub thumbnail: Option<String>,
    pub kind: EntryKind,
}

/// Tagged item identifier.
///
/// Replaces the original plugin's string-prefix routing: the listing
/// kind is the discriminant and the raw id (the item page URL's last
/// path segment) is the payload. The prefixed wire form is kept for
/// the host via `Display`/`FromStr`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceId {
    ShowsRoot,
    PodcastsRoot,
    Show(String),
    Podcast(String),
    ShowEpisode(String),
    PodcastEpisode(String),
}

impl SourceId {
    /// The raw id carried by item variants; root variants have none.
    pub fn raw(&self) -> Option<&str> {
        match self {
            SourceId::ShowsRoot | SourceId::PodcastsRoot => None,
            SourceId::Show(id)
            | SourceId::Podcast(id)
            | SourceId::ShowEpisode(id)
            | SourceId::PodcastEpisode(id) => Some(id),
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceId::ShowsRoot => f.write_str("shows_root"),
            SourceId::PodcastsRoot => f.write_str("podcasts_root"),
            SourceId::Show(id) => write!(f, "show_{id}"),
            SourceId::Podcast(id) => write!(f, "pod_{id}"),
            SourceId::ShowEpisode(id) => write!(f, "episode_{id}"),
            SourceId::PodcastEpisode(id) => write!(f, "podep_{id}"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized source id: {0}")]
pub struct ParseSourceIdError(pub String);

impl FromStr for SourceId {
    type Err = ParseSourceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shows_root" => return Ok(SourceId::ShowsRoot),
            "podcasts_root" => return Ok(SourceId::PodcastsRoot),
            _ => {}
        }
        // "podep_" must be probed before "pod_"
        let parsed = s
            .strip_prefix("podep_")
            .map(|id| SourceId::PodcastEpisode(id.to_string()))
            .or_else(|| {
                s.strip_prefix("episode_")
                    .map(|id| SourceId::ShowEpisode(id.to_string()))
            })
            .or_else(|| {
                s.strip_prefix("pod_")
                    .map(|id| SourceId::Podcast(id.to_string()))
            })
            .or_else(|| {
                s.strip_prefix("show_")
                    .map(|id| SourceId::Show(id.to_string()))
            });

        match parsed {
            Some(id) if id.raw().is_some_and(|raw| !raw.is_empty()) => Ok(id),
            _ => Err(ParseSourceIdError(s.to_string())),
        }
    }
}

// Serialized as the prefixed wire form so hosts can pass ids back
// opaquely.
impl Serialize for SourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
