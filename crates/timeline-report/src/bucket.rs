//! Grouping of commits by UTC calendar day

use chrono::NaiveDate;
use timeline_git::Commit;

/// The commits authored on one UTC day, oldest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket {
    /// The calendar day
    pub date: NaiveDate,
    commits: Vec<Commit>,
}

impl DayBucket {
    /// Commits of the day, ascending by author time
    #[must_use]
    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    /// The latest commit of the day
    #[must_use]
    pub fn head(&self) -> Option<&Commit> {
        self.commits.last()
    }
}

/// Sort `commits` ascending by author time and split them into day buckets
///
/// Buckets come out in the order their day is first met while scanning the
/// sorted commits, i.e. chronologically. Commits with equal timestamps keep
/// their relative input order.
#[must_use]
pub fn bucket_by_day(mut commits: Vec<Commit>) -> Vec<DayBucket> {
    commits.sort_by_key(|commit| commit.authored_at);

    let mut buckets: Vec<DayBucket> = Vec::new();
    for commit in commits {
        let date = commit.day();
        match buckets.last_mut() {
            Some(bucket) if bucket.date == date => bucket.commits.push(commit),
            _ => buckets.push(DayBucket {
                date,
                commits: vec![commit],
            }),
        }
    }
    buckets
}
