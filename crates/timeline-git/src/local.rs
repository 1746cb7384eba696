// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit history from local clones
//!
//! This module serves the [`CommitHistoryProvider`] contract from git
//! repositories on disk using the `git2` crate. Tracked repositories are
//! expected at `<root>/<owner>/<name>`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use git2::{DiffFormat, DiffOptions, ErrorCode, Repository, Sort, Tree};
use tracing::debug;

use crate::commit::{Commit, TrackedRepository};
use crate::error::ProviderError;
use crate::provider::{CommitHistoryProvider, EMPTY_TREE_SHA};

/// A [`CommitHistoryProvider`] over local clones
#[derive(Debug, Clone)]
pub struct LocalGitProvider {
    root: PathBuf,
}

impl LocalGitProvider {
    /// Create a provider rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory holding the `<owner>/<name>` clones
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of a tracked repository's clone
    #[must_use]
    pub fn repository_path(&self, repo: &TrackedRepository) -> PathBuf {
        self.root.join(&repo.owner).join(&repo.name)
    }
}

#[async_trait]
impl CommitHistoryProvider for LocalGitProvider {
    async fn list_commits(
        &self,
        repo: &TrackedRepository,
        page_size: usize,
    ) -> Result<Vec<Commit>, ProviderError> {
        let path = self.repository_path(repo);
        run_blocking(move || {
            let repository = open_at(&path)?;
            walk_recent(&repository, page_size)
        })
        .await
    }

    async fn compare_diff(
        &self,
        repo: &TrackedRepository,
        base: &str,
        head: &str,
    ) -> Result<String, ProviderError> {
        let path = self.repository_path(repo);
        let (base, head) = (base.to_string(), head.to_string());
        run_blocking(move || {
            let repository = open_at(&path)?;
            render_diff(&repository, &base, &head)
        })
        .await
    }
}

/// libgit2 handles are not `Send`, so each call opens its own inside a blocking task
async fn run_blocking<T, F>(task: F) -> Result<T, ProviderError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ProviderError> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| ProviderError::Task(e.to_string()))?
}

/// Only a missing repository maps to `RepositoryNotFound`; corrupt ones keep libgit2's error
fn open_at(path: &Path) -> Result<Repository, ProviderError> {
    Repository::open(path).map_err(|e| match e.code() {
        ErrorCode::NotFound => ProviderError::RepositoryNotFound {
            path: path.display().to_string(),
        },
        _ => ProviderError::Git2(e),
    })
}

/// Walk back from HEAD, newest first, keeping at most `limit` commits
fn walk_recent(repository: &Repository, limit: usize) -> Result<Vec<Commit>, ProviderError> {
    let mut revwalk = repository.revwalk()?;
    revwalk.set_sorting(Sort::TIME | Sort::TOPOLOGICAL)?;
    revwalk.push_head()?;

    let mut commits = Vec::new();
    for oid_result in revwalk {
        if commits.len() >= limit {
            break;
        }

        let oid = oid_result?;
        let git_commit = repository.find_commit(oid)?;
        let when = git_commit.author().when();
        let authored_at = DateTime::<Utc>::from_timestamp(when.seconds(), 0).ok_or_else(|| {
            ProviderError::MalformedResponse(format!(
                "commit {oid} has an out-of-range author time"
            ))
        })?;

        commits.push(Commit::new(oid.to_string(), authored_at));
    }

    debug!(count = commits.len(), "walked local history");
    Ok(commits)
}

fn resolve_tree<'r>(repository: &'r Repository, reference: &str) -> Result<Tree<'r>, ProviderError> {
    let invalid = || ProviderError::InvalidReference {
        reference: reference.to_string(),
    };
    let object = repository.revparse_single(reference).map_err(|_| invalid())?;
    object.peel_to_tree().map_err(|_| invalid())
}

/// Unified patch text for `base..head`; the empty-tree SHA means no base tree
fn render_diff(repository: &Repository, base: &str, head: &str) -> Result<String, ProviderError> {
    let old_tree = if base == EMPTY_TREE_SHA {
        None
    } else {
        Some(resolve_tree(repository, base)?)
    };
    let new_tree = resolve_tree(repository, head)?;

    let mut opts = DiffOptions::new();
    opts.ignore_whitespace(false);

    let mut diff =
        repository.diff_tree_to_tree(old_tree.as_ref(), Some(&new_tree), Some(&mut opts))?;
    diff.find_similar(None)?;

    let mut text = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        if let origin @ ('+' | '-' | ' ') = line.origin() {
            text.push(origin);
        }
        text.push_str(&String::from_utf8_lossy(line.content()));
        true
    })?;

    Ok(text)
}
