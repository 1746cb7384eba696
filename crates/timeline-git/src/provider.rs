// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! The commit history provider seam
//!
//! A provider answers two questions about a tracked repository: which commits
//! are the most recent, and what the unified diff between two commits is.
//! [`GitHubProvider`](crate::GitHubProvider) answers them over the hosting
//! API and [`LocalGitProvider`](crate::LocalGitProvider) from local clones.

use async_trait::async_trait;

use crate::commit::{Commit, TrackedRepository};
use crate::error::ProviderError;

/// SHA of git's empty tree, used as the diff base before any boundary exists
pub const EMPTY_TREE_SHA: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

/// Number of commits requested per repository (a single page; no pagination)
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Source of commit listings and diffs for tracked repositories
#[async_trait]
pub trait CommitHistoryProvider: Send + Sync {
    /// List up to `page_size` of the most recent commits of `repo`
    ///
    /// Ordering of the returned commits is not significant.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the history cannot be fetched.
    async fn list_commits(
        &self,
        repo: &TrackedRepository,
        page_size: usize,
    ) -> Result<Vec<Commit>, ProviderError>;

    /// Unified diff text for `base..head`, possibly empty
    ///
    /// `base` may be [`EMPTY_TREE_SHA`], meaning "diff against nothing".
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if either endpoint cannot be resolved or the
    /// diff cannot be produced.
    async fn compare_diff(
        &self,
        repo: &TrackedRepository,
        base: &str,
        head: &str,
    ) -> Result<String, ProviderError>;
}
