// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for timeline-git

use thiserror::Error;

/// Errors that can occur while fetching commit history or diffs
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Error from git2 library
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),

    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The hosting API answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Repository not found at the specified path
    #[error("Repository not found: {path}")]
    RepositoryNotFound {
        /// The path that was searched for a repository
        path: String,
    },

    /// Invalid commit reference (branch, tag, or SHA)
    #[error("Invalid commit reference: {reference}")]
    InvalidReference {
        /// The reference string that could not be resolved
        reference: String,
    },

    /// Repository identifier is not of the form `owner/name`
    #[error("Invalid repository identifier '{value}', expected owner/name")]
    InvalidRepository {
        /// The rejected identifier
        value: String,
    },

    /// The response body could not be understood
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A blocking git task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(String),
}

/// Errors that can occur while parsing unified diff text
#[derive(Debug, Error)]
pub enum DiffError {
    /// The patch text could not be parsed
    #[error("Malformed diff: {0}")]
    Malformed(#[from] git2::Error),

    /// A file entry carried neither an old nor a new path
    #[error("Diff entry {index} has no path")]
    MissingPath {
        /// Position of the entry within the diff
        index: usize,
    },
}
