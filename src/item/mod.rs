pub mod builder;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::error::RecordError;

pub use builder::{from_api_like, from_api_status, from_archive};

/// What an item is, decided once from the shape of its source record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Kind {
    Post,
    Repost,
    Like,
}

/// Numeric status identifier. Ids grow over time, so higher means newer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusId(u64);

impl StatusId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StatusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for StatusId {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(Self)
            .map_err(|err| RecordError::new("id", format!("{s:?}: {err}")))
    }
}

impl From<u64> for StatusId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// An id as it appears on the wire: the API sends numbers, exports send strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    pub fn to_status_id(&self) -> Result<StatusId, RecordError> {
        match self {
            Self::Number(id) => Ok(StatusId(*id)),
            Self::Text(text) => text.parse(),
        }
    }
}

/// Pick the string id when present and non-empty, else the numeric one.
pub(crate) fn resolve_id(
    id_str: Option<&str>,
    id: Option<&RawId>,
) -> Result<StatusId, RecordError> {
    match (id_str.filter(|s| !s.is_empty()), id) {
        (Some(text), _) => text.parse(),
        (None, Some(raw)) => raw.to_status_id(),
        (None, None) => Err(RecordError::new("id", "record carries no id")),
    }
}

/// The unit of keep/delete decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: StatusId,
    created_at: NaiveDateTime,
    kind: Kind,
}

impl Item {
    pub fn new(id: StatusId, created_at: NaiveDateTime, kind: Kind) -> Self {
        Self {
            id,
            created_at,
            kind,
        }
    }

    pub fn id(&self) -> StatusId {
        self.id
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {}>", self.kind, self.id)
    }
}
