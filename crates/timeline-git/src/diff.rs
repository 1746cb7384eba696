// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Unified diff parsing
//!
//! This module turns unified diff text (as produced by `git diff` or by the
//! hosting API's compare endpoint) into per-file records with their hunks.
//! Parsing is delegated to libgit2's patch reader via the `git2` crate;
//! sections without hunks (empty files, mode changes, pure renames, binaries)
//! are read from their extended headers.

use git2::{Delta, Diff, Patch};
use serde::{Deserialize, Serialize};

use crate::error::DiffError;

/// Parser from unified diff text to per-file records
pub trait DiffParser: Send + Sync {
    /// Parse `diff` into one record per file section
    ///
    /// Empty or whitespace-only input yields no files.
    ///
    /// # Errors
    ///
    /// Returns `DiffError` if the text is not a well-formed unified diff.
    fn parse(&self, diff: &str) -> Result<Vec<ParsedFile>, DiffError>;
}

/// How a file changed between the two sides of a diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// File did not exist before
    Added,
    /// File no longer exists
    Deleted,
    /// File changed in place
    Modified,
    /// File moved, possibly with edits
    Renamed,
    /// File copied from another path, possibly with edits
    Copied,
}

impl From<Delta> for FileStatus {
    fn from(delta: Delta) -> Self {
        match delta {
            Delta::Added | Delta::Untracked => Self::Added,
            Delta::Deleted => Self::Deleted,
            Delta::Renamed => Self::Renamed,
            Delta::Copied => Self::Copied,
            _ => Self::Modified,
        }
    }
}

/// Role of a single line inside a hunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// Line present only on the new side
    Added,
    /// Line present only on the old side
    Removed,
    /// Unchanged line
    Context,
}

/// One line of a hunk, without its `+`/`-`/space prefix or line terminator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLine {
    /// Added, removed or context
    pub kind: LineKind,
    /// Line text
    pub content: String,
}

/// One hunk of a file section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedHunk {
    /// First line of the hunk in the old file
    pub old_start: u32,
    /// Number of old-file lines covered by the hunk
    pub old_lines: u32,
    /// First line of the hunk in the new file
    pub new_start: u32,
    /// Number of new-file lines covered by the hunk
    pub new_lines: u32,
    /// The raw `@@ ... @@` header including its trailing section context
    pub header: String,
    /// Lines in order of appearance
    pub lines: Vec<ParsedLine>,
}

impl ParsedHunk {
    /// Lines added by this hunk
    pub fn added_lines(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .filter(|line| line.kind == LineKind::Added)
            .map(|line| line.content.as_str())
    }
}

/// One file section of a unified diff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFile {
    /// Change kind reported by the diff headers
    pub status: FileStatus,
    /// Path before the change (`None` if unknown)
    pub old_path: Option<String>,
    /// Path after the change (`None` if unknown)
    pub new_path: Option<String>,
    /// Hunks in order of appearance
    pub hunks: Vec<ParsedHunk>,
}

impl ParsedFile {
    /// Whether the diff creates this file
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.status == FileStatus::Added
    }

    /// Whether the diff deletes this file
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.status == FileStatus::Deleted
    }

    /// The most meaningful path: the old one for deletions, otherwise the new one
    #[must_use]
    pub fn path(&self) -> &str {
        let preferred = if self.is_deleted() {
            self.old_path.as_ref().or(self.new_path.as_ref())
        } else {
            self.new_path.as_ref().or(self.old_path.as_ref())
        };
        preferred.map(String::as_str).unwrap_or_default()
    }

    /// Every added line across all hunks, in order
    pub fn added_lines(&self) -> impl Iterator<Item = &str> {
        self.hunks.iter().flat_map(ParsedHunk::added_lines)
    }
}

/// [`DiffParser`] backed by libgit2's patch reader
#[derive(Debug, Clone, Copy, Default)]
pub struct GitPatchParser;

impl DiffParser for GitPatchParser {
    fn parse(&self, diff: &str) -> Result<Vec<ParsedFile>, DiffError> {
        if diff.trim().is_empty() {
            return Ok(Vec::new());
        }

        let sections = split_sections(diff);
        if sections.is_empty() {
            // No file headers at all; let libgit2 report what is wrong
            return parse_with_libgit2(diff, 0);
        }

        let mut files = Vec::with_capacity(sections.len());
        for (index, section) in sections.into_iter().enumerate() {
            // libgit2 rejects header-only sections such as empty new files
            if has_hunks(section) {
                files.extend(parse_with_libgit2(section, index)?);
            } else {
                files.push(parse_header_only(section, index)?);
            }
        }
        Ok(files)
    }
}

const SECTION_START: &str = "diff --git ";

/// Split `text` at each `diff --git ` line; any preamble is dropped
fn split_sections(text: &str) -> Vec<&str> {
    let mut starts = Vec::new();
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.starts_with(SECTION_START) {
            starts.push(offset);
        }
        offset += line.len();
    }

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            &text[start..end]
        })
        .collect()
}

fn has_hunks(section: &str) -> bool {
    section.lines().any(|line| line.starts_with("@@ "))
}

fn parse_with_libgit2(text: &str, first_index: usize) -> Result<Vec<ParsedFile>, DiffError> {
    let diff = Diff::from_buffer(text.as_bytes())?;
    let mut files = Vec::with_capacity(diff.deltas().len());

    for index in 0..diff.deltas().len() {
        let Some(patch) = Patch::from_diff(&diff, index)? else {
            continue;
        };
        files.push(parse_patch(&patch, first_index + index)?);
    }

    Ok(files)
}

/// A file section without hunks: empty files, mode changes, pure renames, binaries
fn parse_header_only(section: &str, index: usize) -> Result<ParsedFile, DiffError> {
    let mut lines = section.lines();
    let (mut old_path, mut new_path) = lines
        .next()
        .and_then(|header| header.strip_prefix(SECTION_START))
        .and_then(split_header_paths)
        .map_or((None, None), |(old, new)| (Some(old), Some(new)));

    let mut status = FileStatus::Modified;
    for line in lines {
        let line = line.trim_end_matches('\r');
        if line.starts_with("new file mode ") {
            status = FileStatus::Added;
        } else if line.starts_with("deleted file mode ") {
            status = FileStatus::Deleted;
        } else if let Some(path) = line.strip_prefix("rename from ") {
            status = FileStatus::Renamed;
            old_path = Some(path.to_string());
        } else if let Some(path) = line.strip_prefix("rename to ") {
            new_path = Some(path.to_string());
        } else if let Some(path) = line.strip_prefix("copy from ") {
            status = FileStatus::Copied;
            old_path = Some(path.to_string());
        } else if let Some(path) = line.strip_prefix("copy to ") {
            new_path = Some(path.to_string());
        }
    }

    if old_path.is_none() && new_path.is_none() {
        return Err(DiffError::MissingPath { index });
    }

    Ok(ParsedFile {
        status,
        old_path,
        new_path,
        hunks: Vec::new(),
    })
}

/// Paths of an `a/<old> b/<new>` header, preferring the split with equal sides
fn split_header_paths(rest: &str) -> Option<(String, String)> {
    let rest = rest.trim_end_matches(['\n', '\r']);
    let body = rest.strip_prefix("a/")?;

    // "<p> b/<p>": the same path on both sides, even if it contains " b/"
    if body.len() >= 4 && (body.len() - 3) % 2 == 0 {
        let half = (body.len() - 3) / 2;
        if let (Some(old), Some(sep), Some(new)) =
            (body.get(..half), body.get(half..half + 3), body.get(half + 3..))
            && sep == " b/"
            && old == new
        {
            return Some((old.to_string(), new.to_string()));
        }
    }

    let (old, new) = body.split_once(" b/")?;
    Some((old.to_string(), new.to_string()))
}

fn parse_patch(patch: &Patch<'_>, index: usize) -> Result<ParsedFile, DiffError> {
    let delta = patch.delta();
    let old_path = delta
        .old_file()
        .path_bytes()
        .map(|p| String::from_utf8_lossy(p).into_owned());
    let new_path = delta
        .new_file()
        .path_bytes()
        .map(|p| String::from_utf8_lossy(p).into_owned());

    if old_path.is_none() && new_path.is_none() {
        return Err(DiffError::MissingPath { index });
    }

    let mut hunks = Vec::with_capacity(patch.num_hunks());
    for hunk_idx in 0..patch.num_hunks() {
        let (hunk, line_count) = patch.hunk(hunk_idx)?;

        let mut lines = Vec::with_capacity(line_count);
        for line_idx in 0..line_count {
            let line = patch.line_in_hunk(hunk_idx, line_idx)?;
            // '=', '>' and '<' mark "no newline at end of file"
            let kind = match line.origin() {
                '+' => LineKind::Added,
                '-' => LineKind::Removed,
                ' ' => LineKind::Context,
                _ => continue,
            };
            lines.push(ParsedLine {
                kind,
                content: trim_line_end(line.content()),
            });
        }

        hunks.push(ParsedHunk {
            old_start: hunk.old_start(),
            old_lines: hunk.old_lines(),
            new_start: hunk.new_start(),
            new_lines: hunk.new_lines(),
            header: trim_line_end(hunk.header()),
            lines,
        });
    }

    Ok(ParsedFile {
        status: delta.status().into(),
        old_path,
        new_path,
        hunks,
    })
}

fn trim_line_end(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(['\n', '\r'])
        .to_string()
}
