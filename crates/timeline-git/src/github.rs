// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit history from the GitHub REST API
//!
//! Two endpoints are used:
//!
//! - `GET /repos/{owner}/{repo}/commits?per_page=N` for the commit listing
//! - `GET /repos/{owner}/{repo}/compare/{base}...{head}` with the
//!   `application/vnd.github.v3.diff` media type for unified diff text
//!
//! Only the first page of commits is requested. Older history is silently
//! out of reach.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::commit::{Commit, TrackedRepository};
use crate::error::ProviderError;
use crate::provider::CommitHistoryProvider;

/// Default REST API base URL
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Largest `per_page` the API accepts
pub const MAX_PER_PAGE: usize = 100;

const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const DIFF_MEDIA_TYPE: &str = "application/vnd.github.v3.diff";
const USER_AGENT: &str = concat!("commit-timeline/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct CommitItem {
    sha: String,
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    author: Option<Signature>,
    committer: Option<Signature>,
}

#[derive(Debug, Deserialize)]
struct Signature {
    date: Option<DateTime<Utc>>,
}

/// A [`CommitHistoryProvider`] backed by the GitHub REST API
#[derive(Debug, Clone)]
pub struct GitHubProvider {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubProvider {
    /// Create a provider for the API at `api_url`, optionally authenticated
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Http` if the HTTP client cannot be built.
    pub fn new(api_url: impl Into<String>, token: Option<String>) -> Result<Self, ProviderError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// The API base URL, without a trailing slash
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Whether requests carry a bearer token
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// URL of the commit listing for `repo`, with `page_size` clamped to the API maximum
    #[must_use]
    pub fn commits_url(&self, repo: &TrackedRepository, page_size: usize) -> String {
        format!(
            "{}/repos/{}/{}/commits?per_page={}",
            self.api_url,
            repo.owner,
            repo.name,
            page_size.clamp(1, MAX_PER_PAGE)
        )
    }

    /// URL of the `base...head` comparison for `repo`
    #[must_use]
    pub fn compare_url(&self, repo: &TrackedRepository, base: &str, head: &str) -> String {
        format!(
            "{}/repos/{}/{}/compare/{}...{}",
            self.api_url, repo.owner, repo.name, base, head
        )
    }

    fn get(&self, url: &str, accept: &str) -> RequestBuilder {
        let request = self
            .client
            .get(url)
            .header(ACCEPT, accept)
            .header("X-GitHub-Api-Version", "2022-11-28");
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl CommitHistoryProvider for GitHubProvider {
    async fn list_commits(
        &self,
        repo: &TrackedRepository,
        page_size: usize,
    ) -> Result<Vec<Commit>, ProviderError> {
        let url = self.commits_url(repo, page_size);
        debug!(%url, "listing commits");

        let response = ensure_success(self.get(&url, JSON_MEDIA_TYPE).send().await?).await?;
        let body = response.text().await?;
        parse_commit_list(&body)
    }

    async fn compare_diff(
        &self,
        repo: &TrackedRepository,
        base: &str,
        head: &str,
    ) -> Result<String, ProviderError> {
        let url = self.compare_url(repo, base, head);
        debug!(%url, "comparing commits");

        let response = ensure_success(self.get(&url, DIFF_MEDIA_TYPE).send().await?).await?;
        Ok(response.text().await?)
    }
}

/// Parse a commit listing response body
///
/// The author date is preferred, falling back to the committer date. Commits
/// carrying neither, or whose SHA is not 40 hex characters, are skipped.
///
/// # Errors
///
/// Returns `ProviderError::MalformedResponse` if the body is not a commit list.
pub fn parse_commit_list(body: &str) -> Result<Vec<Commit>, ProviderError> {
    let items: Vec<CommitItem> = serde_json::from_str(body)
        .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

    let commits = items
        .into_iter()
        .filter_map(|item| {
            if !Commit::is_valid_sha(&item.sha) {
                warn!(sha = %item.sha, "skipping commit with a malformed SHA");
                return None;
            }
            let date = [item.commit.author, item.commit.committer]
                .into_iter()
                .flatten()
                .find_map(|signature| signature.date);
            match date {
                Some(authored_at) => Some(Commit::new(item.sha, authored_at)),
                None => {
                    warn!(sha = %item.sha, "skipping commit without a date");
                    None
                }
            }
        })
        .collect();

    Ok(commits)
}

/// Map non-success statuses to `ProviderError::Api`
async fn ensure_success(response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let rate_limited = response
        .headers()
        .get("x-ratelimit-remaining")
        .is_some_and(|remaining| remaining.as_bytes() == b"0");

    let message = if status == StatusCode::UNAUTHORIZED {
        "Bad or missing credentials".to_string()
    } else if rate_limited
        && (status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS)
    {
        "Rate limit exceeded".to_string()
    } else {
        let text = response.text().await.unwrap_or_default();
        if text.is_empty() {
            status.canonical_reason().unwrap_or("Unknown error").to_string()
        } else {
            text
        }
    };

    Err(ProviderError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use similar_asserts::assert_eq;

    fn provider() -> GitHubProvider {
        GitHubProvider::new("https://api.example.com/", None).expect("client")
    }

    #[test]
    fn test_api_url_trailing_slash_trimmed() {
        assert_eq!(provider().api_url(), "https://api.example.com");
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let anonymous = GitHubProvider::new(DEFAULT_API_URL, Some("  ".to_string())).expect("client");
        assert!(!anonymous.is_authenticated());
        let authed = GitHubProvider::new(DEFAULT_API_URL, Some("ghp_x".to_string())).expect("client");
        assert!(authed.is_authenticated());
    }

    #[test]
    fn test_commits_url() {
        let repo = TrackedRepository::new("octo", "widgets");
        assert_eq!(
            provider().commits_url(&repo, 100),
            "https://api.example.com/repos/octo/widgets/commits?per_page=100"
        );
    }

    #[test]
    fn test_commits_url_clamps_page_size() {
        let repo = TrackedRepository::new("octo", "widgets");
        assert!(provider().commits_url(&repo, 500).ends_with("per_page=100"));
        assert!(provider().commits_url(&repo, 0).ends_with("per_page=1"));
    }

    #[test]
    fn test_compare_url() {
        let repo = TrackedRepository::new("octo", "widgets");
        assert_eq!(
            provider().compare_url(&repo, "aaa", "bbb"),
            "https://api.example.com/repos/octo/widgets/compare/aaa...bbb"
        );
    }

    #[test]
    fn test_parse_commit_list() {
        let body = r#"[
            {"sha": "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb", "commit": {"author": {"name": "A", "date": "2024-01-05T12:00:00Z"}, "committer": {"date": "2024-01-06T00:00:00Z"}}},
            {"sha": "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "commit": {"author": {"name": "A", "date": "2024-01-04T08:30:00+02:00"}, "committer": null}}
        ]"#;
        let commits = parse_commit_list(body).expect("parse");
        assert_eq!(
            commits,
            vec![
                Commit::new("b".repeat(40), Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap()),
                Commit::new("a".repeat(40), Utc.with_ymd_and_hms(2024, 1, 4, 6, 30, 0).unwrap()),
            ]
        );
    }

    #[test]
    fn test_parse_commit_list_falls_back_to_committer_date() {
        let body = r#"[{"sha": "cccccccccccccccccccccccccccccccccccccccc", "commit": {"author": null, "committer": {"date": "2024-02-01T00:00:00Z"}}}]"#;
        let commits = parse_commit_list(body).expect("parse");
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].day().to_string(), "2024-02-01");
    }

    #[test]
    fn test_parse_commit_list_skips_undated_commits() {
        let body = r#"[{"sha": "dddddddddddddddddddddddddddddddddddddddd", "commit": {"author": {"name": "A"}, "committer": {}}}]"#;
        assert!(parse_commit_list(body).expect("parse").is_empty());
    }

    #[test]
    fn test_parse_commit_list_skips_malformed_shas() {
        let body = r#"[
            {"sha": "1945ab9", "commit": {"author": {"date": "2024-01-05T12:00:00Z"}}},
            {"sha": "../../etc/passwd", "commit": {"author": {"date": "2024-01-05T12:00:00Z"}}},
            {"sha": "eeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee", "commit": {"author": {"date": "2024-01-04T12:00:00Z"}}}
        ]"#;
        let commits = parse_commit_list(body).expect("parse");
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].sha, "e".repeat(40));
    }

    #[test]
    fn test_parse_commit_list_rejects_non_list() {
        let result = parse_commit_list(r#"{"message": "Not Found"}"#);
        assert!(matches!(result, Err(ProviderError::MalformedResponse(_))));
    }
}
