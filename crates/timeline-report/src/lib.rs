// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! timeline-report: Day-by-day change reports across repositories
//!
//! This library crate builds a [`TimelineReport`]: for every calendar day on
//! which any tracked repository received commits, a summary of the files each
//! repository added, removed and modified that day.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use timeline_git::{GitHubProvider, TrackedRepository};
//! use timeline_report::TimelineBuilder;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = GitHubProvider::new("https://api.github.com", None)?;
//! let builder = TimelineBuilder::new(Arc::new(provider));
//!
//! let repos = vec![TrackedRepository::new("octo", "widgets")];
//! let report = builder.build_report(&repos).await;
//! println!("{}", report.to_json()?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod bucket;
pub mod builder;
pub mod error;
pub mod functions;
pub mod mapping;
pub mod report;

pub use bucket::{DayBucket, bucket_by_day};
pub use builder::{BuilderOptions, TimelineBuilder};
pub use error::TimelineError;
pub use report::{AddedFile, DailyChangeSet, FileChange, ModifiedFile, RemovedFile, TimelineReport};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::builder::{BuilderOptions, TimelineBuilder};
    pub use crate::report::{DailyChangeSet, FileChange, TimelineReport};
    pub use timeline_git::{CommitHistoryProvider, DiffParser, TrackedRepository};
}
