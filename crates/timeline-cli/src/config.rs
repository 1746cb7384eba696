// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Configuration for the commit-timeline binary
//!
//! This module provides the command-line and environment configuration:
//! which repositories to track, where their history comes from, and how the
//! report is written.

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use clap::builder::RangedU64ValueParser;
use timeline_git::{DEFAULT_API_URL, DEFAULT_PAGE_SIZE, TrackedRepository};
use timeline_report::BuilderOptions;
use timeline_report::builder::{DEFAULT_CALL_TIMEOUT, DEFAULT_MAX_CONCURRENT_REPOSITORIES};

/// Largest page the hosting API serves
const MAX_PAGE_SIZE: usize = 100;

/// Commit Timeline - what changed in your repositories, day by day
#[derive(Parser, Debug, Clone)]
#[command(name = "commit-timeline")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Repositories to track, as owner/name
    ///
    /// Repeat the flag or separate identifiers with commas.
    #[arg(
        short,
        long = "repo",
        value_name = "OWNER/NAME",
        env = "TIMELINE_REPOS",
        value_delimiter = ','
    )]
    pub repos: Vec<TrackedRepository>,

    /// Where commit history comes from
    #[arg(long, value_enum, env = "TIMELINE_SOURCE", default_value_t = Source::Github)]
    pub source: Source,

    /// Base URL of the hosting REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Bearer token for the hosting API
    ///
    /// Without a token, requests are anonymous and subject to lower rate limits.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Directory holding local clones as <root>/<owner>/<name>
    ///
    /// Required with `--source local`.
    #[arg(long, env = "TIMELINE_LOCAL_ROOT")]
    pub local_root: Option<PathBuf>,

    /// Commits fetched per repository (one page, 1-100)
    #[arg(
        long,
        default_value_t = DEFAULT_PAGE_SIZE,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=100)
    )]
    pub page_size: usize,

    /// Timeout for each external call in seconds (0 disables)
    #[arg(long, default_value_t = DEFAULT_CALL_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Repositories processed at once
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENT_REPOSITORIES)]
    pub concurrency: usize,

    /// Write the JSON report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long, default_value = "false")]
    pub pretty: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so that stdout carries only the report.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// Commit history sources
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Source {
    /// The hosting service's REST API
    #[default]
    Github,
    /// Local clones read with libgit2
    Local,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repos: Vec::new(),
            source: Source::default(),
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            local_root: None,
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_CALL_TIMEOUT.as_secs(),
            concurrency: DEFAULT_MAX_CONCURRENT_REPOSITORIES,
            output: None,
            pretty: false,
            verbose: false,
            quiet: false,
        }
    }
}

impl Config {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A repository is listed twice
    /// - The local source is selected without an existing local root directory
    /// - The page size is outside 1-100
    /// - The concurrency is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for repo in &self.repos {
            if !seen.insert(repo.identifier()) {
                return Err(ConfigError::DuplicateRepository(repo.identifier()));
            }
        }

        if self.source == Source::Local {
            let root = self
                .local_root
                .as_ref()
                .ok_or(ConfigError::MissingLocalRoot)?;
            if !root.exists() {
                return Err(ConfigError::LocalRootNotFound(root.clone()));
            }
            if !root.is_dir() {
                return Err(ConfigError::LocalRootNotDirectory(root.clone()));
            }
        }

        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(ConfigError::InvalidPageSize(self.page_size));
        }

        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }

        Ok(())
    }

    /// The per-call timeout, `None` when disabled
    #[must_use]
    pub fn call_timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Options for the timeline builder
    #[must_use]
    pub fn builder_options(&self) -> BuilderOptions {
        BuilderOptions::default()
            .with_page_size(self.page_size)
            .with_call_timeout(self.call_timeout())
            .with_max_concurrent_repositories(self.concurrency)
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The same repository was listed more than once
    #[error("Repository listed more than once: {0}")]
    DuplicateRepository(String),

    /// Local source selected without a root
    #[error("--local-root is required with --source local")]
    MissingLocalRoot,

    /// Local root not found
    #[error("Local root not found: {0}")]
    LocalRootNotFound(PathBuf),

    /// Local root is not a directory
    #[error("Local root is not a directory: {0}")]
    LocalRootNotDirectory(PathBuf),

    /// Page size outside what the hosting API serves
    #[error("Page size must be between 1 and 100, got {0}")]
    InvalidPageSize(usize),

    /// No repository could ever run
    #[error("Concurrency must be at least 1")]
    ZeroConcurrency,
}
