//! Classification of raw records into [`Item`]s.
//!
//! Export files have no repost reference, so archive reposts are recognised
//! by the `RT @` prefix the platform puts on their text. That is best effort:
//! an original post that happens to start with `RT @` is treated as a repost.

use crate::archive::ArchiveRecord;
use crate::client::ApiStatus;
use crate::error::RecordError;

use super::{Item, Kind, resolve_id};

/// Text prefix carried by reposts in export files.
pub const REPOST_MARKER: &str = "RT @";

/// Item for a record from the account's likes.
pub fn from_api_like(status: &ApiStatus) -> Result<Item, RecordError> {
    let id = resolve_id(status.id_str.as_deref(), status.id.as_ref())?;
    Ok(Item::new(id, status.created_at, Kind::Like))
}

/// Item for a record from the account's timeline.
pub fn from_api_status(status: &ApiStatus) -> Result<Item, RecordError> {
    let id = resolve_id(status.id_str.as_deref(), status.id.as_ref())?;
    let kind = if status.retweeted_status.is_some() {
        Kind::Repost
    } else {
        Kind::Post
    };
    Ok(Item::new(id, status.created_at, kind))
}

/// Item for an entry of the export's posts file.
pub fn from_archive(record: &ArchiveRecord) -> Result<Item, RecordError> {
    let tweet = &record.tweet;
    let id = resolve_id(tweet.id_str.as_deref(), tweet.id.as_ref())?;
    let kind = if tweet.full_text.starts_with(REPOST_MARKER) {
        Kind::Repost
    } else {
        Kind::Post
    };
    Ok(Item::new(id, tweet.created_at, kind))
}
