// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! commit-timeline: day-by-day change reports for a set of repositories
//!
//! Lists recent commits of each tracked repository, diffs each day's last
//! commit against the previous day's, and writes the resulting JSON report
//! to stdout or a file. Logs go to stderr.

use clap::Parser;
use commit_timeline::app;
use commit_timeline::config::Config;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    config.validate()?;

    let report = app::run(&config).await?;
    app::write_report(&config, &report)?;

    info!(dates = report.len(), "done");
    Ok(())
}
