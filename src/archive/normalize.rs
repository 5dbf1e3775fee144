use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;

use crate::error::RecordError;

/// Timestamp layout used by the platform, e.g. `Wed Oct 10 20:19:24 +0000 2018`.
pub const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Fields holding user-visible text that arrive HTML-entity encoded.
const ESCAPED_TEXT_FIELDS: [&str; 2] = ["full_text", "name"];

/// Parse a platform timestamp into a naive UTC timestamp.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, RecordError> {
    DateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map(|parsed| parsed.naive_utc())
        .map_err(|err| RecordError::new("created_at", format!("{raw:?}: {err}")))
}

/// Rewrite every object in `value`, depth first:
///
/// - `created_at` is parsed with [`TIMESTAMP_FORMAT`] and replaced by its
///   naive UTC ISO-8601 form, so typed records can deserialize it directly.
/// - `full_text` and `name` are HTML-unescaped.
pub fn normalize(value: &mut Value) -> Result<(), RecordError> {
    match value {
        Value::Array(items) => items.iter_mut().try_for_each(normalize),
        Value::Object(map) => {
            for child in map.values_mut() {
                normalize(child)?;
            }

            if let Some(created_at) = map.get_mut("created_at") {
                let Value::String(raw) = created_at else {
                    return Err(RecordError::new("created_at", "expected a string"));
                };
                let parsed = parse_timestamp(raw)?;
                *created_at = Value::String(parsed.format("%Y-%m-%dT%H:%M:%S").to_string());
            }

            for key in ESCAPED_TEXT_FIELDS {
                if let Some(Value::String(text)) = map.get_mut(key) {
                    let unescaped = html_escape::decode_html_entities(text.as_str());
                    if unescaped != text.as_str() {
                        *text = unescaped.into_owned();
                    }
                }
            }

            Ok(())
        }
        _ => Ok(()),
    }
}
