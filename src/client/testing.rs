//! In-memory [`StatusApi`] and [`StatusFeed`] doubles for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use futures_util::stream;

use crate::deletion::Operation;
use crate::error::{LangolierError, RemoteError};
use crate::item::StatusId;

use super::{ApiStatus, StatusApi, StatusFeed, StatusStream};

#[derive(Default)]
pub struct RecordingApi {
    calls: Mutex<Vec<(Operation, StatusId)>>,
    failures: Mutex<HashMap<(Operation, StatusId), RemoteError>>,
}

impl RecordingApi {
    pub fn fail(&self, operation: Operation, id: u64, error: RemoteError) {
        self.failures
            .lock()
            .unwrap()
            .insert((operation, StatusId::new(id)), error);
    }

    pub fn calls(&self) -> Vec<(Operation, StatusId)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn touched_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.calls().iter().map(|(_, id)| id.get()).collect();
        ids.dedup();
        ids
    }

    fn record(&self, operation: Operation, id: StatusId) -> Result<(), RemoteError> {
        self.calls.lock().unwrap().push((operation, id));
        match self.failures.lock().unwrap().get(&(operation, id)) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl StatusApi for RecordingApi {
    async fn destroy_status(&self, id: StatusId) -> Result<(), RemoteError> {
        self.record(Operation::DestroyStatus, id)
    }

    async fn unretweet(&self, id: StatusId) -> Result<(), RemoteError> {
        self.record(Operation::Unretweet, id)
    }

    async fn destroy_favorite(&self, id: StatusId) -> Result<(), RemoteError> {
        self.record(Operation::DestroyFavorite, id)
    }
}

/// Serves fixed likes and timeline collections.
#[derive(Default)]
pub struct FixedFeed {
    pub likes: Vec<ApiStatus>,
    pub timeline: Vec<ApiStatus>,
}

impl StatusFeed for FixedFeed {
    fn likes<'a>(&'a self, _screen_name: &'a str) -> StatusStream<'a> {
        Box::pin(stream::iter(self.likes.clone().into_iter().map(Ok::<_, LangolierError>)))
    }

    fn timeline<'a>(&'a self, _screen_name: &'a str) -> StatusStream<'a> {
        Box::pin(stream::iter(self.timeline.clone().into_iter().map(Ok::<_, LangolierError>)))
    }
}
