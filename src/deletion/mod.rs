use strum::Display;
use tracing::warn;

use crate::client::StatusApi;
use crate::error::RemoteError;
use crate::item::{Item, Kind, StatusId};

/// A single destructive call against the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    DestroyStatus,
    Unretweet,
    DestroyFavorite,
}

/// Sequence used under force, whatever the item's kind.
pub const FORCED_SEQUENCE: [Operation; 3] = [
    Operation::DestroyStatus,
    Operation::Unretweet,
    Operation::DestroyFavorite,
];

impl Operation {
    /// Calls to make for an item of `kind`.
    pub fn sequence_for(kind: Kind, force: bool) -> &'static [Operation] {
        if force {
            return &FORCED_SEQUENCE;
        }
        match kind {
            Kind::Post => &[Operation::DestroyStatus],
            Kind::Repost => &[Operation::Unretweet],
            Kind::Like => &[Operation::DestroyFavorite],
        }
    }

    async fn invoke<A>(self, api: &A, id: StatusId) -> Result<(), RemoteError>
    where
        A: StatusApi + ?Sized,
    {
        match self {
            Self::DestroyStatus => api.destroy_status(id).await,
            Self::Unretweet => api.unretweet(id).await,
            Self::DestroyFavorite => api.destroy_favorite(id).await,
        }
    }
}

/// Removes items from the account, one blocking call at a time.
///
/// Some old reposts and likes ignore the call that matches their kind; `force`
/// throws all three calls at every item instead.
pub struct DeletionExecutor<'a, A: ?Sized> {
    api: &'a A,
    force: bool,
}

impl<'a, A> DeletionExecutor<'a, A>
where
    A: StatusApi + ?Sized,
{
    pub fn new(api: &'a A, force: bool) -> Self {
        Self { api, force }
    }

    pub fn force(&self) -> bool {
        self.force
    }

    /// Run the item's call sequence. "Already gone" errors are logged and
    /// skipped; any other error stops the sequence and is returned.
    pub async fn delete(&self, item: &Item) -> Result<(), RemoteError> {
        for operation in Operation::sequence_for(item.kind(), self.force) {
            match operation.invoke(self.api, item.id()).await {
                Ok(()) => {}
                Err(err) if err.is_already_gone() => {
                    warn!(id = %item.id(), kind = %item.kind(), %operation, error = %err, "already gone");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::RecordingApi;
    use chrono::NaiveDate;

    fn item(id: u64, kind: Kind) -> Item {
        let created = NaiveDate::from_ymd_opt(2015, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Item::new(StatusId::new(id), created, kind)
    }

    #[tokio::test]
    async fn normal_mode_uses_kind_specific_call() {
        let api = RecordingApi::default();
        let executor = DeletionExecutor::new(&api, false);

        executor.delete(&item(1, Kind::Post)).await.unwrap();
        executor.delete(&item(2, Kind::Repost)).await.unwrap();
        executor.delete(&item(3, Kind::Like)).await.unwrap();

        assert_eq!(
            api.calls(),
            vec![
                (Operation::DestroyStatus, StatusId::new(1)),
                (Operation::Unretweet, StatusId::new(2)),
                (Operation::DestroyFavorite, StatusId::new(3)),
            ]
        );
    }

    #[tokio::test]
    async fn force_mode_runs_all_three_in_order() {
        let api = RecordingApi::default();
        let executor = DeletionExecutor::new(&api, true);

        executor.delete(&item(9, Kind::Like)).await.unwrap();

        let operations: Vec<_> = api.calls().into_iter().map(|(op, _)| op).collect();
        assert_eq!(operations, FORCED_SEQUENCE.to_vec());
    }

    #[tokio::test]
    async fn already_gone_is_swallowed_and_sequence_continues() {
        let api = RecordingApi::default();
        api.fail(Operation::DestroyStatus, 9, RemoteError::with_code(144, "No status found"));
        api.fail(Operation::Unretweet, 9, RemoteError::with_code(34, "Page does not exist"));
        let executor = DeletionExecutor::new(&api, true);

        executor.delete(&item(9, Kind::Repost)).await.unwrap();
        assert_eq!(api.calls().len(), 3);
    }

    #[tokio::test]
    async fn already_gone_in_normal_mode_completes() {
        let api = RecordingApi::default();
        api.fail(Operation::DestroyFavorite, 4, RemoteError::with_code(144, "No status found"));
        let executor = DeletionExecutor::new(&api, false);

        assert!(executor.delete(&item(4, Kind::Like)).await.is_ok());
    }

    #[tokio::test]
    async fn other_errors_abort_the_sequence() {
        let api = RecordingApi::default();
        api.fail(Operation::DestroyStatus, 5, RemoteError::with_code(89, "Invalid or expired token"));
        let executor = DeletionExecutor::new(&api, true);

        let err = executor.delete(&item(5, Kind::Post)).await.unwrap_err();
        assert_eq!(err.code, Some(89));
        assert_eq!(api.calls().len(), 1);
    }

    #[test]
    fn operations_display_snake_case() {
        assert_eq!(Operation::DestroyFavorite.to_string(), "destroy_favorite");
    }
}
