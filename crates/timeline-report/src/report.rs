// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Report types and their JSON shape
//!
//! The serialized report looks like:
//!
//! ```json
//! {
//!   "2024-01-05": {
//!     "octo/widgets": {
//!       "added": [{"file": "src/a.js", "functions": ["foo"]}],
//!       "removed": ["src/old.js"],
//!       "modified": [{"file": "src/b.js", "changes": ["changed lines 10-14"]}]
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use timeline_git::TrackedRepository;

/// A file created that day, with the functions declared in its added lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedFile {
    /// Path of the new file
    pub file: String,
    /// Function names in order of appearance, duplicates included
    pub functions: Vec<String>,
}

/// A file deleted that day; serialized as its bare path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemovedFile {
    /// Path the file had before deletion
    pub file: String,
}

/// A file changed in place (or renamed) that day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifiedFile {
    /// Path of the file after the change
    pub file: String,
    /// One description per hunk
    pub changes: Vec<String>,
}

/// The classification of one parsed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    /// See [`AddedFile`]
    Added(AddedFile),
    /// See [`RemovedFile`]
    Removed(RemovedFile),
    /// See [`ModifiedFile`]
    Modified(ModifiedFile),
}

impl FileChange {
    /// The path this change is reported under
    #[must_use]
    pub fn file(&self) -> &str {
        match self {
            Self::Added(added) => &added.file,
            Self::Removed(removed) => &removed.file,
            Self::Modified(modified) => &modified.file,
        }
    }
}

/// Everything one repository changed on one day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyChangeSet {
    /// Files created
    pub added: Vec<AddedFile>,
    /// Files deleted
    pub removed: Vec<RemovedFile>,
    /// Files changed in place
    pub modified: Vec<ModifiedFile>,
}

impl DailyChangeSet {
    /// An empty change set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// File the change under its category
    pub fn push(&mut self, change: FileChange) {
        match change {
            FileChange::Added(added) => self.added.push(added),
            FileChange::Removed(removed) => self.removed.push(removed),
            FileChange::Modified(modified) => self.modified.push(modified),
        }
    }

    /// Whether nothing changed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    /// Number of files across all categories
    #[must_use]
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }
}

impl Extend<FileChange> for DailyChangeSet {
    fn extend<I: IntoIterator<Item = FileChange>>(&mut self, iter: I) {
        for change in iter {
            self.push(change);
        }
    }
}

impl FromIterator<FileChange> for DailyChangeSet {
    fn from_iter<I: IntoIterator<Item = FileChange>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// Per-day, per-repository change sets
///
/// Once [`fill_missing`](Self::fill_missing) has run, every date present has
/// an entry for every tracked repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimelineReport(BTreeMap<NaiveDate, BTreeMap<String, DailyChangeSet>>);

impl TimelineReport {
    /// An empty report
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the change set of `repository` on `date`, replacing any previous one
    pub fn insert(&mut self, date: NaiveDate, repository: &str, changes: DailyChangeSet) {
        self.0
            .entry(date)
            .or_default()
            .insert(repository.to_string(), changes);
    }

    /// Merge one repository's per-day change sets
    pub fn merge_repository(
        &mut self,
        repository: &str,
        days: impl IntoIterator<Item = (NaiveDate, DailyChangeSet)>,
    ) {
        for (date, changes) in days {
            self.insert(date, repository, changes);
        }
    }

    /// Give every tracked repository an entry, empty if absent, on every date present
    pub fn fill_missing<'a>(&mut self, repositories: impl IntoIterator<Item = &'a TrackedRepository>) {
        let identifiers: Vec<String> = repositories
            .into_iter()
            .map(TrackedRepository::identifier)
            .collect();

        for by_repository in self.0.values_mut() {
            for identifier in &identifiers {
                by_repository.entry(identifier.clone()).or_default();
            }
        }
    }

    /// Whether every date has an entry for every one of `repositories`
    #[must_use]
    pub fn is_complete<'a>(
        &self,
        repositories: impl IntoIterator<Item = &'a TrackedRepository> + Clone,
    ) -> bool {
        self.0.values().all(|by_repository| {
            repositories
                .clone()
                .into_iter()
                .all(|repo| by_repository.contains_key(&repo.identifier()))
        })
    }

    /// The change set of `repository` on `date`
    #[must_use]
    pub fn get(&self, date: NaiveDate, repository: &str) -> Option<&DailyChangeSet> {
        self.0.get(&date)?.get(repository)
    }

    /// All repositories' change sets on `date`
    #[must_use]
    pub fn day(&self, date: NaiveDate) -> Option<&BTreeMap<String, DailyChangeSet>> {
        self.0.get(&date)
    }

    /// Dates present, ascending
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.0.keys().copied()
    }

    /// Number of dates present
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no date is present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying map
    #[must_use]
    pub fn as_map(&self) -> &BTreeMap<NaiveDate, BTreeMap<String, DailyChangeSet>> {
        &self.0
    }

    /// Compact JSON document
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Indented JSON document
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
