//! # KAN Source
//!
//! Content-extraction adapter for the KAN (kan.org.il) broadcaster
//! site: discovers show and podcast listings, walks their paginated
//! episode lists, and resolves item pages to playable stream metadata
//! (HLS manifests for video, direct MP3 links for audio).
//!
//! The pipeline is raw HTML in, typed records out:
//!
//! ```text
//! HTML -> KanHtmlDocument -> {listing | playable} parsers -> Paginator -> host
//! ```
//!
//! Source markup changes are expected; every failure along the way
//! degrades to "no data" at the [`adapter::KanAdapter`] entry points
//! rather than propagating to the host.

mod error;

pub mod adapter;
pub mod document;
pub mod fetch;
pub mod fields;
pub mod listing;
pub mod pagination;
pub mod playable;
pub mod selectors;
pub mod tracing;

pub use adapter::{streams_for_kind, KanAdapter};
pub use document::KanHtmlDocument;
pub use error::Error;
pub use fetch::{HttpFetcher, PageFetcher};
pub use pagination::{PageStrategy, Paginator};
