// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test fixtures for timeline-report integration tests
//!
//! This module provides a scripted in-memory history provider that records
//! every diff request, plus helpers that render small unified diffs.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use timeline_git::{Commit, CommitHistoryProvider, ProviderError, TrackedRepository};

// ============================================================================
// Scripted Provider
// ============================================================================

/// One recorded `compare_diff` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffCall {
    pub repository: String,
    pub base: String,
    pub head: String,
}

/// A provider answering from scripted data
///
/// Diffs are keyed by `(repository, head)`; an unscripted diff is empty text.
#[derive(Default)]
pub struct ScriptedProvider {
    commits: HashMap<String, Vec<Commit>>,
    failing_listings: HashSet<String>,
    hanging_listings: HashSet<String>,
    diffs: HashMap<(String, String), String>,
    failing_diffs: HashSet<(String, String)>,
    calls: Mutex<Vec<DiffCall>>,
    listed_page_sizes: Mutex<Vec<usize>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_commits(mut self, repo: &str, commits: Vec<Commit>) -> Self {
        self.commits.insert(repo.to_string(), commits);
        self
    }

    pub fn with_failing_listing(mut self, repo: &str) -> Self {
        self.failing_listings.insert(repo.to_string());
        self
    }

    pub fn with_hanging_listing(mut self, repo: &str) -> Self {
        self.hanging_listings.insert(repo.to_string());
        self
    }

    pub fn with_diff(mut self, repo: &str, head: &str, text: impl Into<String>) -> Self {
        self.diffs
            .insert((repo.to_string(), head.to_string()), text.into());
        self
    }

    pub fn with_failing_diff(mut self, repo: &str, head: &str) -> Self {
        self.failing_diffs
            .insert((repo.to_string(), head.to_string()));
        self
    }

    /// Every `compare_diff` request so far, in call order
    pub fn diff_calls(&self) -> Vec<DiffCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// `compare_diff` requests for one repository, in call order
    pub fn diff_calls_for(&self, repo: &str) -> Vec<DiffCall> {
        self.diff_calls()
            .into_iter()
            .filter(|call| call.repository == repo)
            .collect()
    }

    /// Page sizes passed to `list_commits`
    pub fn listed_page_sizes(&self) -> Vec<usize> {
        self.listed_page_sizes.lock().expect("page size lock").clone()
    }
}

#[async_trait]
impl CommitHistoryProvider for ScriptedProvider {
    async fn list_commits(
        &self,
        repo: &TrackedRepository,
        page_size: usize,
    ) -> Result<Vec<Commit>, ProviderError> {
        let id = repo.identifier();
        self.listed_page_sizes
            .lock()
            .expect("page size lock")
            .push(page_size);

        if self.hanging_listings.contains(&id) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        if self.failing_listings.contains(&id) {
            return Err(ProviderError::Api {
                status: 500,
                message: format!("listing {id} failed"),
            });
        }

        let mut commits = self.commits.get(&id).cloned().unwrap_or_default();
        commits.truncate(page_size);
        Ok(commits)
    }

    async fn compare_diff(
        &self,
        repo: &TrackedRepository,
        base: &str,
        head: &str,
    ) -> Result<String, ProviderError> {
        let id = repo.identifier();
        self.calls.lock().expect("calls lock").push(DiffCall {
            repository: id.clone(),
            base: base.to_string(),
            head: head.to_string(),
        });

        let key = (id, head.to_string());
        if self.failing_diffs.contains(&key) {
            return Err(ProviderError::Api {
                status: 404,
                message: "No common ancestor".to_string(),
            });
        }
        Ok(self.diffs.get(&key).cloned().unwrap_or_default())
    }
}

// ============================================================================
// Data Helpers
// ============================================================================

/// A 40-character SHA derived from `n`
pub fn sha(n: u32) -> String {
    format!("{n:040x}")
}

/// A commit authored at an RFC 3339 timestamp
pub fn commit(sha: &str, authored_at: &str) -> Commit {
    let authored_at = DateTime::parse_from_rfc3339(authored_at)
        .expect("valid timestamp")
        .with_timezone(&Utc);
    Commit::new(sha, authored_at)
}

pub fn repo(id: &str) -> TrackedRepository {
    id.parse().expect("valid repository identifier")
}

// ============================================================================
// Diff Text Helpers
// ============================================================================

/// A diff creating `path` with `lines` as content
pub fn added_file_diff(path: &str, lines: &[&str]) -> String {
    let mut text = format!(
        "diff --git a/{path} b/{path}\n\
         new file mode 100644\n\
         index 0000000..1111111\n\
         --- /dev/null\n\
         +++ b/{path}\n\
         @@ -0,0 +1,{} @@\n",
        lines.len()
    );
    for line in lines {
        text.push_str(&format!("+{line}\n"));
    }
    text
}

/// Header-only section creating an empty file
pub fn empty_new_file_diff(path: &str) -> String {
    format!(
        "diff --git a/{path} b/{path}\n\
         new file mode 100644\n\
         index 0000000..e69de29\n"
    )
}

/// A diff deleting `path`, which held `lines`
pub fn deleted_file_diff(path: &str, lines: &[&str]) -> String {
    let mut text = format!(
        "diff --git a/{path} b/{path}\n\
         deleted file mode 100644\n\
         index 1111111..0000000\n\
         --- a/{path}\n\
         +++ /dev/null\n\
         @@ -1,{} +0,0 @@\n",
        lines.len()
    );
    for line in lines {
        text.push_str(&format!("-{line}\n"));
    }
    text
}

/// A diff modifying `path`, one hunk per `(old_start, old_lines, section)`
///
/// Each hunk replaces its first line and keeps the rest as context, so the
/// old and new line counts match.
pub fn modified_file_diff(path: &str, hunks: &[(u32, u32, &str)]) -> String {
    let mut text = format!(
        "diff --git a/{path} b/{path}\n\
         index 1111111..2222222 100644\n\
         --- a/{path}\n\
         +++ b/{path}\n"
    );
    for &(old_start, old_lines, section) in hunks {
        assert!(old_lines >= 1, "hunks need at least one old line");
        text.push_str(&format!("@@ -{old_start},{old_lines} +{old_start},{old_lines} @@"));
        if !section.is_empty() {
            text.push(' ');
            text.push_str(section);
        }
        text.push('\n');
        text.push_str(&format!("-old line {old_start}\n+new line {old_start}\n"));
        for offset in 1..old_lines {
            text.push_str(&format!(" context {}\n", old_start + offset));
        }
    }
    text
}
