// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! timeline-git: Commit history and diff sources for commit-timeline
//!
//! This library crate provides the two collaborators the timeline builder
//! depends on: a [`CommitHistoryProvider`] that lists commits and produces
//! unified diffs between two commits, and a [`DiffParser`] that turns
//! unified diff text into per-file hunks.
//!
//! # Example
//!
//! ```no_run
//! use timeline_git::{CommitHistoryProvider, DiffParser, GitHubProvider, GitPatchParser, TrackedRepository};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = GitHubProvider::new("https://api.github.com", None)?;
//! let repo: TrackedRepository = "rust-lang/regex".parse()?;
//!
//! let commits = provider.list_commits(&repo, 10).await?;
//! if let [newest, .., oldest] = commits.as_slice() {
//!     let diff = provider.compare_diff(&repo, &oldest.sha, &newest.sha).await?;
//!     for file in GitPatchParser.parse(&diff)? {
//!         println!("{} ({} hunks)", file.path(), file.hunks.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod commit;
pub mod diff;
pub mod error;
pub mod github;
pub mod local;
pub mod provider;

pub use commit::{Commit, TrackedRepository};
pub use diff::{DiffParser, FileStatus, GitPatchParser, LineKind, ParsedFile, ParsedHunk, ParsedLine};
pub use error::{DiffError, ProviderError};
pub use github::{DEFAULT_API_URL, GitHubProvider};
pub use local::LocalGitProvider;
pub use provider::{CommitHistoryProvider, DEFAULT_PAGE_SIZE, EMPTY_TREE_SHA};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::{Commit, TrackedRepository};
    pub use crate::diff::{DiffParser, GitPatchParser, ParsedFile};
    pub use crate::error::{DiffError, ProviderError};
    pub use crate::provider::{CommitHistoryProvider, EMPTY_TREE_SHA};
}
