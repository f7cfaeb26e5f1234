//! # Media Domain Module
//!
//! Value types shared between the extraction pipeline and the host
//! surface: listing records, episode cards, playable media, stream
//! references, and the tagged item identifier.
//!
//! Every entity here is created fresh per call and owned by the
//! caller; there is no identity beyond the id string and no state
//! that outlives a call.

mod domain;

pub use domain::{
    DirectoryEntry, EntryKind, EpisodeCard, ListingItem, MediaKind, ParseMediaKindError,
    ParseSourceIdError, PlayableMedia, SourceId, StreamFormat, StreamRef,
};
