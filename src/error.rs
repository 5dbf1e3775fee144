use std::path::PathBuf;

use thiserror::Error;

/// Remote error codes meaning the target status is already gone.
pub const CODE_DOES_NOT_EXIST: u32 = 34;
pub const CODE_NOT_FOUND: u32 = 144;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `langolier`.
///
/// Library callers match on these to decide whether a run can continue; the
/// binary wraps them in `anyhow` for context chains.
#[derive(Debug, Error)]
pub enum LangolierError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Archive export ───────────────────────────────────────────────────
    #[error("archive: {0}")]
    Archive(#[from] ArchiveError),

    // ── Remote API ───────────────────────────────────────────────────────
    #[error("remote: {0}")]
    Remote(#[from] RemoteError),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Archive errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("malformed archive: {0}")]
    Malformed(String),

    #[error("archive file not found: {}", .0.display())]
    Missing(PathBuf),
}

// ─── Record errors ───────────────────────────────────────────────────────────

/// A decoded record is missing a field or carries it in an unexpected shape.
#[derive(Debug, Error)]
#[error("field `{field}`: {reason}")]
pub struct RecordError {
    pub field: &'static str,
    pub reason: String,
}

impl RecordError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl From<RecordError> for LangolierError {
    fn from(err: RecordError) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

impl From<RecordError> for ArchiveError {
    fn from(err: RecordError) -> Self {
        Self::Malformed(err.to_string())
    }
}

// ─── Remote errors ───────────────────────────────────────────────────────────

/// A failed call against the remote API.
///
/// `code` is the platform's own error code from the response body, `status`
/// the HTTP status. Transport failures carry neither.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", describe(.status, .code, .message))]
pub struct RemoteError {
    pub status: Option<u16>,
    pub code: Option<u32>,
    pub message: String,
}

fn describe(status: &Option<u16>, code: &Option<u32>, message: &str) -> String {
    match (status, code) {
        (Some(status), Some(code)) => format!("HTTP {status}, code {code}: {message}"),
        (Some(status), None) => format!("HTTP {status}: {message}"),
        (None, Some(code)) => format!("code {code}: {message}"),
        (None, None) => message.to_string(),
    }
}

impl RemoteError {
    pub fn with_code(code: u32, message: impl Into<String>) -> Self {
        Self {
            status: None,
            code: Some(code),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            code: None,
            message: message.into(),
        }
    }

    /// True when the target no longer exists, which a purge treats as done.
    pub fn is_already_gone(&self) -> bool {
        matches!(self.code, Some(CODE_DOES_NOT_EXIST | CODE_NOT_FOUND))
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            status: err.status().map(|s| s.as_u16()),
            code: None,
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for LangolierError {
    fn from(err: reqwest::Error) -> Self {
        Self::Remote(err.into())
    }
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, LangolierError>;
