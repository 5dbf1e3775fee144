//! Export data files are JavaScript, not JSON:
//!
//! ```text
//! window.YTD.tweet.part0 = [ {
//!   ...
//! } ]
//! ```
//!
//! The assignment is stripped and trailing code after the array is tolerated
//! by truncating at the first parse error and parsing once more.

use serde_json::Value;
use tracing::debug;

use crate::error::ArchiveError;

/// Decode the JSON payload of an export data file.
///
/// Everything up to and including the first `=` is discarded. If the rest
/// fails to parse, it is cut at the error position and parsed a second time;
/// a second failure is final.
pub fn decode_payload(contents: &str) -> Result<Value, ArchiveError> {
    let payload = strip_assignment(contents)?;

    match serde_json::from_str(payload) {
        Ok(value) => Ok(value),
        Err(first) => {
            let cut = error_offset(payload, &first);
            debug!(offset = cut, error = %first, "retrying archive decode on truncated payload");
            serde_json::from_str(&payload[..cut]).map_err(|second| {
                ArchiveError::Malformed(format!("{second} (after truncating at: {first})"))
            })
        }
    }
}

fn strip_assignment(contents: &str) -> Result<&str, ArchiveError> {
    match contents.split_once('=') {
        Some((prefix, rest)) if !prefix.is_empty() && !rest.is_empty() => Ok(rest),
        _ => Err(ArchiveError::Malformed(
            "expected `<name> = <JSON>` assignment".into(),
        )),
    }
}

/// Byte offset of a parse error in `text`, from its one-based line/column.
fn error_offset(text: &str, err: &serde_json::Error) -> usize {
    if err.line() == 0 {
        return text.len();
    }

    let line_start: usize = text
        .split_inclusive('\n')
        .take(err.line() - 1)
        .map(str::len)
        .sum();
    let mut offset = (line_start + err.column().saturating_sub(1)).min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
