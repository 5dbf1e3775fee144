use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::error::{RemoteError, Result};
use crate::item::StatusId;

use super::ApiStatus;

/// Lazy, newest-first stream of raw records. Not restartable.
pub type StatusStream<'a> = BoxStream<'a, Result<ApiStatus>>;

/// The three destructive calls a purge needs. Each succeeds silently or fails
/// with the platform's structured error.
#[async_trait]
pub trait StatusApi: Send + Sync {
    async fn destroy_status(&self, id: StatusId) -> std::result::Result<(), RemoteError>;

    async fn unretweet(&self, id: StatusId) -> std::result::Result<(), RemoteError>;

    async fn destroy_favorite(&self, id: StatusId) -> std::result::Result<(), RemoteError>;
}

/// Paginated reads of an account's collections.
pub trait StatusFeed: Send + Sync {
    fn likes<'a>(&'a self, screen_name: &'a str) -> StatusStream<'a>;

    /// Posts and reposts, replies included.
    fn timeline<'a>(&'a self, screen_name: &'a str) -> StatusStream<'a>;
}
