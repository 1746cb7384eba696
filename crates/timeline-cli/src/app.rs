// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Running one report from a [`Config`]

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::Arc;

use anyhow::Context;
use timeline_git::{CommitHistoryProvider, GitHubProvider, LocalGitProvider};
use timeline_report::{TimelineBuilder, TimelineReport};
use tracing::{debug, info};

use crate::config::{Config, ConfigError, Source};

/// The history provider selected by `config`
///
/// # Errors
///
/// Returns an error if the local source has no root or the HTTP client
/// cannot be built.
pub fn provider(config: &Config) -> anyhow::Result<Arc<dyn CommitHistoryProvider>> {
    match config.source {
        Source::Github => {
            let provider = GitHubProvider::new(config.api_url.as_str(), config.token.clone())
                .context("Failed to create hosting API client")?;
            debug!(
                api_url = provider.api_url(),
                authenticated = provider.is_authenticated(),
                "using hosting API"
            );
            Ok(Arc::new(provider))
        }
        Source::Local => {
            let root = config
                .local_root
                .clone()
                .ok_or(ConfigError::MissingLocalRoot)?;
            debug!(root = %root.display(), "using local clones");
            Ok(Arc::new(LocalGitProvider::new(root)))
        }
    }
}

/// Build the report for the configured repositories
///
/// # Errors
///
/// Returns an error only if the provider cannot be set up; failures while
/// building are isolated inside the report.
pub async fn run(config: &Config) -> anyhow::Result<TimelineReport> {
    let builder = TimelineBuilder::new(provider(config)?).with_options(config.builder_options());

    info!(
        repositories = config.repos.len(),
        source = ?config.source,
        "building timeline"
    );
    Ok(builder.build_report(&config.repos).await)
}

/// Write `report` as JSON to the configured output
///
/// # Errors
///
/// Returns an error if the output file cannot be created or written.
pub fn write_report(config: &Config, report: &TimelineReport) -> anyhow::Result<()> {
    match &config.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_json(BufWriter::new(file), report, config.pretty)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), dates = report.len(), "report written");
        }
        None => {
            write_json(io::stdout().lock(), report, config.pretty)
                .context("Failed to write report to stdout")?;
        }
    }
    Ok(())
}

fn write_json(mut writer: impl Write, report: &TimelineReport, pretty: bool) -> io::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, report)?;
    } else {
        serde_json::to_writer(&mut writer, report)?;
    }
    writeln!(writer)?;
    writer.flush()
}
