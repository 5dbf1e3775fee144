use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::item::RawId;

/// A status object as returned by the timeline and likes endpoints, after
/// normalization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiStatus {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default)]
    pub id_str: Option<String>,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub full_text: Option<String>,
    /// Present only on reposts.
    #[serde(default)]
    pub retweeted_status: Option<serde_json::Value>,
}

/// Error body of a failed call: `{"errors":[{"code":144,"message":"..."}]}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEntry {
    pub code: u32,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repost_reference_survives_deserialization() {
        let status: ApiStatus = serde_json::from_str(
            r#"{"id": 5, "id_str": "5", "created_at": "2020-01-01T00:00:00",
                "full_text": "RT @a: b", "retweeted_status": {"id": 4}}"#,
        )
        .unwrap();
        assert!(status.retweeted_status.is_some());
        assert_eq!(status.id, Some(RawId::Number(5)));
    }

    #[test]
    fn null_repost_reference_is_absent() {
        let status: ApiStatus = serde_json::from_str(
            r#"{"id": 5, "created_at": "2020-01-01T00:00:00", "retweeted_status": null}"#,
        )
        .unwrap();
        assert!(status.retweeted_status.is_none());
    }

    #[test]
    fn error_body_parses() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"errors":[{"code":144,"message":"No status found with that ID."}]}"#,
        )
        .unwrap();
        assert_eq!(body.errors[0].code, 144);
    }
}
