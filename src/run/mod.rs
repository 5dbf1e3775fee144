use std::cmp::Reverse;
use std::path::Path;

use chrono::NaiveDateTime;
use futures_util::TryStreamExt;
use strum::Display;
use tracing::{debug, info};

use crate::archive::{self, ArchiveRecord};
use crate::client::{StatusApi, StatusFeed};
use crate::deletion::DeletionExecutor;
use crate::error::{ArchiveError, Result};
use crate::item::{self, Item, StatusId};
use crate::retention::{HARD_CAP, RetentionPolicy};

/// Flags that shape a single run.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub force: bool,
    /// Items with an id at or above this are passed over untouched.
    pub skip: Option<StatusId>,
    pub hard_cap: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            force: false,
            skip: None,
            hard_cap: HARD_CAP,
        }
    }
}

/// What a run did. `kept` counts surviving posts and reposts only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub kept: usize,
    pub deleted: usize,
    pub skipped: usize,
}

/// Collection an item is being processed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Collection {
    Likes,
    Posts,
}

impl Collection {
    /// Only posts and reposts count against the hard cap.
    fn is_capped(self) -> bool {
        matches!(self, Self::Posts)
    }
}

/// Drives one purge, either over the live API or over an export.
///
/// Items must arrive newest first so the hard cap trims the oldest survivors.
pub struct RunOrchestrator<'a, A: ?Sized> {
    policy: &'a RetentionPolicy,
    executor: DeletionExecutor<'a, A>,
    options: RunOptions,
    now: NaiveDateTime,
    summary: RunSummary,
}

impl<'a, A> RunOrchestrator<'a, A>
where
    A: StatusApi + ?Sized,
{
    pub fn new(
        policy: &'a RetentionPolicy,
        api: &'a A,
        options: RunOptions,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            policy,
            executor: DeletionExecutor::new(api, options.force),
            options,
            now,
            summary: RunSummary::default(),
        }
    }

    /// Likes first, then posts and reposts, as delivered by `feed`.
    pub async fn run_api<F>(mut self, feed: &F, screen_name: &str) -> Result<RunSummary>
    where
        F: StatusFeed + ?Sized,
    {
        info!("Using the API.");

        let mut likes = feed.likes(screen_name);
        while let Some(status) = likes.try_next().await? {
            let item = item::from_api_like(&status)?;
            self.process(item, Collection::Likes).await?;
        }

        let mut timeline = feed.timeline(screen_name);
        while let Some(status) = timeline.try_next().await? {
            let item = item::from_api_status(&status)?;
            self.process(item, Collection::Posts).await?;
        }

        Ok(self.finish())
    }

    /// Posts and reposts from an export, newest first. Exports carry no likes.
    pub async fn run_archive(mut self, records: &[ArchiveRecord]) -> Result<RunSummary> {
        let mut items = records
            .iter()
            .map(item::from_archive)
            .collect::<std::result::Result<Vec<Item>, _>>()
            .map_err(ArchiveError::from)?;
        items.sort_by_key(|item| Reverse(item.id()));

        for item in items {
            self.process(item, Collection::Posts).await?;
        }

        Ok(self.finish())
    }

    /// Load `<dir>/tweet.js` and run over it.
    pub async fn run_archive_dir(self, dir: &Path) -> Result<RunSummary> {
        info!("Using {} for archive mode.", dir.display());
        let records = archive::load_archive_dir(dir)?;
        self.run_archive(&records).await
    }

    async fn process(&mut self, item: Item, collection: Collection) -> Result<()> {
        if self.options.skip.is_some_and(|skip| item.id() >= skip) {
            debug!(id = %item.id(), kind = %item.kind(), %collection, "skipped");
            self.summary.skipped += 1;
            return Ok(());
        }

        let over_cap = collection.is_capped() && self.summary.kept >= self.options.hard_cap;
        if self.policy.should_delete(&item, self.now) || over_cap {
            info!(id = %item.id(), kind = %item.kind(), over_cap, "deleting {item}");
            self.executor.delete(&item).await?;
            self.summary.deleted += 1;
        } else {
            info!(id = %item.id(), kind = %item.kind(), "keeping {item}");
            if collection.is_capped() {
                self.summary.kept += 1;
            }
        }
        Ok(())
    }

    fn finish(self) -> RunSummary {
        info!(
            deleted = self.summary.deleted,
            skipped = self.summary.skipped,
            "{} items kept.",
            self.summary.kept
        );
        self.summary
    }
}
