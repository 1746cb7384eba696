// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for timeline-report
//!
//! None of these escape [`TimelineBuilder::build_report`](crate::TimelineBuilder::build_report):
//! each one is logged and absorbed at the scope it names.

use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;
use timeline_git::{DiffError, ProviderError};

/// Failures isolated while building a timeline
#[derive(Debug, Error)]
pub enum TimelineError {
    /// Listing a repository's commits failed; the repository contributes no days
    #[error("Failed to fetch history of {repository}: {source}")]
    RepositoryFetch {
        /// `owner/name` of the repository
        repository: String,
        /// Underlying provider error
        source: ProviderError,
    },

    /// Fetching one day's diff failed; that day is recorded as empty
    #[error("Failed to fetch diff of {repository} for {date}: {source}")]
    DayDiff {
        /// `owner/name` of the repository
        repository: String,
        /// The day whose diff was requested
        date: NaiveDate,
        /// Underlying provider error
        source: ProviderError,
    },

    /// One day's diff text could not be parsed; that day is recorded as empty
    #[error("Failed to parse diff of {repository} for {date}: {source}")]
    Parse {
        /// `owner/name` of the repository
        repository: String,
        /// The day whose diff was parsed
        date: NaiveDate,
        /// Underlying parser error
        source: DiffError,
    },

    /// An external call exceeded the configured timeout
    #[error("Timed out after {after:?} while {operation}")]
    Timeout {
        /// What was being waited on
        operation: String,
        /// The configured limit
        after: Duration,
    },
}
