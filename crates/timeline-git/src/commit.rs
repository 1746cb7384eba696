//! Commit and repository identity types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// A commit as reported by a history provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// The commit SHA (40 hex characters)
    pub sha: String,
    /// Author timestamp, normalized to UTC
    pub authored_at: DateTime<Utc>,
}

impl Commit {
    /// Create a commit record
    #[must_use]
    pub fn new(sha: impl Into<String>, authored_at: DateTime<Utc>) -> Self {
        Self {
            sha: sha.into(),
            authored_at,
        }
    }

    /// Validate that a SHA is a valid 40-character hex string
    #[must_use]
    pub fn is_valid_sha(sha: &str) -> bool {
        sha.len() == 40 && sha.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Get the short SHA (first 7 characters)
    #[must_use]
    pub fn short_sha(&self) -> &str {
        self.sha.get(..7).unwrap_or(self.sha.as_str())
    }

    /// The UTC calendar day this commit was authored on
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.authored_at.date_naive()
    }
}

/// A repository whose history is tracked, identified as `owner/name`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrackedRepository {
    /// Account or organization that owns the repository
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl TrackedRepository {
    /// Create a repository identity
    #[must_use]
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// The `owner/name` key used in reports
    #[must_use]
    pub fn identifier(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TrackedRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for TrackedRepository {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ProviderError::InvalidRepository {
            value: s.to_string(),
        };
        let (owner, name) = s.trim().split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }
        Ok(Self::new(owner, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use similar_asserts::assert_eq;

    fn sample_commit() -> Commit {
        Commit::new(
            "1945ab9c752534e733c38ba0109dc3b741f0a6eb",
            Utc.with_ymd_and_hms(2024, 1, 5, 23, 59, 59).unwrap(),
        )
    }

    #[test]
    fn test_commit_json_format() {
        let json = serde_json::to_string(&sample_commit()).expect("serialize");
        assert!(json.contains("\"sha\":"));
        assert!(json.contains("\"authored_at\":\"2024-01-05T23:59:59Z\""));
    }

    #[test]
    fn test_is_valid_sha() {
        assert!(Commit::is_valid_sha(
            "1945ab9c752534e733c38ba0109dc3b741f0a6eb"
        ));
        assert!(Commit::is_valid_sha(crate::EMPTY_TREE_SHA));
        assert!(!Commit::is_valid_sha("1945ab9"));
        assert!(!Commit::is_valid_sha(
            "1945ab9c752534e733c38ba0109dc3b741f0a6eg"
        ));
        assert!(!Commit::is_valid_sha(""));
    }

    #[test]
    fn test_short_sha() {
        assert_eq!(sample_commit().short_sha(), "1945ab9");
        let short = Commit::new("abc", Utc::now());
        assert_eq!(short.short_sha(), "abc");
        let multibyte = Commit::new("ééééé", Utc::now());
        assert_eq!(multibyte.short_sha(), "ééééé");
    }

    #[test]
    fn test_day_uses_utc_date() {
        let commit = sample_commit();
        assert_eq!(commit.day(), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    }

    #[test]
    fn test_day_of_offset_timestamp_is_normalized() {
        // 2024-01-06T01:30:00+05:00 is still Jan 5th in UTC
        let authored_at = DateTime::parse_from_rfc3339("2024-01-06T01:30:00+05:00")
            .unwrap()
            .with_timezone(&Utc);
        let commit = Commit::new("a".repeat(40), authored_at);
        assert_eq!(commit.day(), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    }

    #[test]
    fn test_repository_display_and_parse() {
        let repo: TrackedRepository = "octo/widgets".parse().expect("parse");
        assert_eq!(repo, TrackedRepository::new("octo", "widgets"));
        assert_eq!(repo.identifier(), "octo/widgets");
    }

    #[test]
    fn test_repository_parse_trims_whitespace() {
        let repo: TrackedRepository = " octo/widgets ".parse().expect("parse");
        assert_eq!(repo.name, "widgets");
    }

    #[test]
    fn test_repository_parse_rejects_bad_input() {
        for bad in ["", "octo", "/widgets", "octo/", "a/b/c"] {
            let result = bad.parse::<TrackedRepository>();
            assert!(
                matches!(result, Err(ProviderError::InvalidRepository { .. })),
                "'{bad}' should be rejected"
            );
        }
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Display and FromStr agree for well-formed identifiers
        #[test]
        fn prop_repository_roundtrip(owner in "[A-Za-z0-9_.-]{1,20}", name in "[A-Za-z0-9_.-]{1,20}") {
            let repo = TrackedRepository::new(owner, name);
            let parsed: TrackedRepository = repo.to_string().parse().expect("parse");
            prop_assert_eq!(parsed, repo);
        }

        /// Property: the commit day is the date part of its UTC timestamp
        #[test]
        fn prop_day_matches_rfc3339_prefix(ts in 0i64..4_000_000_000i64) {
            let authored_at = DateTime::from_timestamp(ts, 0).expect("in range");
            let commit = Commit::new("a".repeat(40), authored_at);
            let rendered = authored_at.to_rfc3339();
            prop_assert_eq!(commit.day().format("%Y-%m-%d").to_string(), &rendered[..10]);
        }
    }
}
