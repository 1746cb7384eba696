// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Timeline construction
//!
//! For each tracked repository the builder lists recent commits, groups them
//! by UTC day and, walking the days oldest first, diffs the previous day's
//! head against the current day's head. The first day is diffed against the
//! empty tree. Parsed diffs are classified into the report's added, removed
//! and modified entries.
//!
//! Failures never escape [`TimelineBuilder::build_report`]:
//!
//! - a failed commit listing drops that repository's days
//! - a failed diff fetch or parse records an empty change set for that day
//!
//! Repositories run concurrently; the days of one repository never do, since
//! each day's base is the previous day's head.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use timeline_git::{
    Commit, CommitHistoryProvider, DEFAULT_PAGE_SIZE, DiffParser, EMPTY_TREE_SHA, GitPatchParser,
    TrackedRepository,
};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::bucket::bucket_by_day;
use crate::error::TimelineError;
use crate::mapping::change_set;
use crate::report::{DailyChangeSet, TimelineReport};

/// Default limit for a single provider call
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of repositories processed at once
pub const DEFAULT_MAX_CONCURRENT_REPOSITORIES: usize = 4;

/// Tuning for [`TimelineBuilder`]
#[derive(Debug, Clone)]
pub struct BuilderOptions {
    /// Commits listed per repository (one page; older history is not fetched)
    pub page_size: usize,
    /// Limit for each provider call; `None` waits indefinitely
    pub call_timeout: Option<Duration>,
    /// Repositories processed at once
    pub max_concurrent_repositories: usize,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            call_timeout: Some(DEFAULT_CALL_TIMEOUT),
            max_concurrent_repositories: DEFAULT_MAX_CONCURRENT_REPOSITORIES,
        }
    }
}

impl BuilderOptions {
    /// Set the number of commits listed per repository
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set or clear the per-call timeout
    #[must_use]
    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Set how many repositories are processed at once (at least one)
    #[must_use]
    pub fn with_max_concurrent_repositories(mut self, limit: usize) -> Self {
        self.max_concurrent_repositories = limit.max(1);
        self
    }
}

/// Builds [`TimelineReport`]s from a history provider and a diff parser
#[derive(Clone)]
pub struct TimelineBuilder {
    provider: Arc<dyn CommitHistoryProvider>,
    parser: Arc<dyn DiffParser>,
    options: BuilderOptions,
}

impl std::fmt::Debug for TimelineBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineBuilder")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl TimelineBuilder {
    /// Create a builder over `provider`, parsing diffs with [`GitPatchParser`]
    #[must_use]
    pub fn new(provider: Arc<dyn CommitHistoryProvider>) -> Self {
        Self {
            provider,
            parser: Arc::new(GitPatchParser),
            options: BuilderOptions::default(),
        }
    }

    /// Use a different diff parser
    #[must_use]
    pub fn with_parser(mut self, parser: Arc<dyn DiffParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Replace the options
    #[must_use]
    pub fn with_options(mut self, options: BuilderOptions) -> Self {
        self.options = options;
        self
    }

    /// The current options
    #[must_use]
    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// Build the report for `repositories`
    ///
    /// Every date in the result carries an entry for every repository in
    /// `repositories`. Dropping the returned future aborts repositories still
    /// in flight.
    pub async fn build_report(&self, repositories: &[TrackedRepository]) -> TimelineReport {
        let mut report = TimelineReport::new();
        if repositories.is_empty() {
            return report;
        }

        let permits = Arc::new(Semaphore::new(self.options.max_concurrent_repositories.max(1)));
        let mut tasks = JoinSet::new();

        for repo in repositories.iter().cloned() {
            let builder = self.clone();
            let permits = Arc::clone(&permits);
            tasks.spawn(async move {
                let _permit = permits.acquire_owned().await;
                let days = builder.build_daily_changes(&repo).await;
                (repo, days)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((repo, days)) => report.merge_repository(&repo.identifier(), days),
                Err(e) => error!(error = %e, "repository task failed"),
            }
        }

        report.fill_missing(repositories);
        debug_assert!(report.is_complete(repositories));

        let changed = report
            .as_map()
            .values()
            .flat_map(BTreeMap::values)
            .filter(|set| !set.is_empty())
            .count();
        info!(
            dates = report.len(),
            repositories = repositories.len(),
            changed,
            "timeline report built"
        );
        report
    }

    /// Per-day change sets of one repository
    ///
    /// Returns an empty map if the commit listing fails. A day whose diff
    /// cannot be fetched or parsed is present with an empty change set.
    pub async fn build_daily_changes(
        &self,
        repo: &TrackedRepository,
    ) -> BTreeMap<NaiveDate, DailyChangeSet> {
        let mut days = BTreeMap::new();

        let commits = match self.fetch_commits(repo).await {
            Ok(commits) => commits,
            Err(e) => {
                warn!(repository = %repo, error = %e, "skipping repository");
                return days;
            }
        };

        let buckets = bucket_by_day(commits);
        debug!(repository = %repo, days = buckets.len(), "bucketed commits");

        // Boundary pointer: the previous day's head, or the empty tree before the first day
        let mut boundary = EMPTY_TREE_SHA.to_string();
        for bucket in &buckets {
            let Some(head) = bucket.head() else {
                continue;
            };

            let changes = match self.diff_day(repo, bucket.date, &boundary, &head.sha).await {
                Ok(changes) => changes,
                Err(e) => {
                    warn!(
                        repository = %repo,
                        date = %bucket.date,
                        head = head.short_sha(),
                        error = %e,
                        "recording empty day"
                    );
                    DailyChangeSet::default()
                }
            };

            days.insert(bucket.date, changes);
            boundary.clone_from(&head.sha);
        }

        days
    }

    async fn fetch_commits(&self, repo: &TrackedRepository) -> Result<Vec<Commit>, TimelineError> {
        let listing = self.provider.list_commits(repo, self.options.page_size);
        self.bounded(listing, || format!("listing commits of {repo}"))
            .await?
            .map_err(|source| TimelineError::RepositoryFetch {
                repository: repo.identifier(),
                source,
            })
    }

    async fn diff_day(
        &self,
        repo: &TrackedRepository,
        date: NaiveDate,
        base: &str,
        head: &str,
    ) -> Result<DailyChangeSet, TimelineError> {
        debug!(repository = %repo, %date, base, head, "comparing day");

        let comparison = self.provider.compare_diff(repo, base, head);
        let text = self
            .bounded(comparison, || format!("comparing {base}...{head} in {repo}"))
            .await?
            .map_err(|source| TimelineError::DayDiff {
                repository: repo.identifier(),
                date,
                source,
            })?;

        let files = self
            .parser
            .parse(&text)
            .map_err(|source| TimelineError::Parse {
                repository: repo.identifier(),
                date,
                source,
            })?;

        Ok(change_set(&files))
    }

    /// Await `call`, giving up after the configured timeout
    async fn bounded<T>(
        &self,
        call: impl Future<Output = T>,
        operation: impl FnOnce() -> String,
    ) -> Result<T, TimelineError> {
        match self.options.call_timeout {
            Some(after) => tokio::time::timeout(after, call)
                .await
                .map_err(|_| TimelineError::Timeout {
                    operation: operation(),
                    after,
                }),
            None => Ok(call.await),
        }
    }
}
