// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Translation of parsed diff records into report entries
//!
//! - new files become [`AddedFile`]s listing the functions declared in their
//!   added lines
//! - deleted files become [`RemovedFile`]s under their pre-change path
//! - everything else, renames included, becomes a [`ModifiedFile`] with one
//!   description per hunk

use timeline_git::{ParsedFile, ParsedHunk};
use tracing::debug;

use crate::functions::{first_function, functions_in_lines};
use crate::report::{AddedFile, DailyChangeSet, FileChange, ModifiedFile, RemovedFile};

/// Classify one parsed file
#[must_use]
pub fn classify(file: &ParsedFile) -> FileChange {
    if file.is_new() {
        FileChange::Added(AddedFile {
            file: file.path().to_string(),
            functions: functions_in_lines(file.added_lines()),
        })
    } else if file.is_deleted() {
        FileChange::Removed(RemovedFile {
            file: file.path().to_string(),
        })
    } else {
        FileChange::Modified(ModifiedFile {
            file: file.path().to_string(),
            changes: file.hunks.iter().map(describe_hunk).collect(),
        })
    }
}

/// `"changed function <name>"` if the header names a function, else the old line range
#[must_use]
pub fn describe_hunk(hunk: &ParsedHunk) -> String {
    match first_function(&hunk.header) {
        Some(name) => format!("changed function {name}"),
        None => {
            // Signed so that an empty hunk at line 0 renders as 0--1
            let end = i64::from(hunk.old_start) + i64::from(hunk.old_lines) - 1;
            format!("changed lines {}-{}", hunk.old_start, end)
        }
    }
}

/// The change set for one day's parsed diff
#[must_use]
pub fn change_set<'a>(files: impl IntoIterator<Item = &'a ParsedFile>) -> DailyChangeSet {
    files
        .into_iter()
        .map(classify)
        .inspect(|change| debug!(file = change.file(), "classified file"))
        .collect()
}
