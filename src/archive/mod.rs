pub mod decoder;
pub mod normalize;

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::info;

use crate::error::ArchiveError;
use crate::item::RawId;

pub use decoder::decode_payload;
pub use normalize::{TIMESTAMP_FORMAT, normalize, parse_timestamp};

/// Name of the posts data file inside an export's data directory.
pub const POSTS_FILE: &str = "tweet.js";

/// One entry of the posts data file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArchiveRecord {
    pub tweet: ArchiveTweet,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArchiveTweet {
    #[serde(default)]
    pub id_str: Option<String>,
    #[serde(default)]
    pub id: Option<RawId>,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub full_text: String,
}

/// Decode, normalize and type the contents of an export data file.
pub fn parse_archive(contents: &str) -> Result<Vec<ArchiveRecord>, ArchiveError> {
    let mut value = decode_payload(contents)?;
    normalize(&mut value)?;
    serde_json::from_value(value).map_err(|err| ArchiveError::Malformed(err.to_string()))
}

/// Read `file` and decode it as an export data file. The file is only read.
pub fn load_archive_file(file: &Path) -> Result<Vec<ArchiveRecord>, ArchiveError> {
    let contents = fs::read_to_string(file).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            ArchiveError::Missing(file.to_path_buf())
        } else {
            ArchiveError::Malformed(format!("{}: {err}", file.display()))
        }
    })?;
    let records = parse_archive(&contents)?;
    info!(file = %file.display(), records = records.len(), "loaded archive");
    Ok(records)
}

/// Load the posts data file from an export's data directory.
pub fn load_archive_dir(dir: &Path) -> Result<Vec<ArchiveRecord>, ArchiveError> {
    load_archive_file(&dir.join(POSTS_FILE))
}
