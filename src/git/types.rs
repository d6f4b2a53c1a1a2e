//! Status data model
//!
//! Types describing working-tree state as reported by the engine: a change
//! code per file for the index and the worktree, collected into a status map.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a single file differs from the last commit, on one side of the
/// index/worktree split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeCode {
    Unmodified,
    Added,
    Modified,
    Deleted,
    Untracked,
    Ignored,
}

impl ChangeCode {
    /// Single-letter code used in rendered reports, matching the short
    /// status notation (`?` untracked, `!` ignored).
    pub fn code(&self) -> char {
        match self {
            ChangeCode::Unmodified => ' ',
            ChangeCode::Added => 'A',
            ChangeCode::Modified => 'M',
            ChangeCode::Deleted => 'D',
            ChangeCode::Untracked => '?',
            ChangeCode::Ignored => '!',
        }
    }
}

/// Staged and unstaged change codes for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub index: ChangeCode,
    pub worktree: ChangeCode,
}

impl FileChange {
    pub fn is_clean(&self) -> bool {
        self.index == ChangeCode::Unmodified && self.worktree == ChangeCode::Unmodified
    }
}

/// Working-tree status snapshot: path to change-code pair.
///
/// Backed by a `BTreeMap` so rendered reports list paths in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorktreeStatus {
    pub entries: BTreeMap<String, FileChange>,
}

impl WorktreeStatus {
    pub fn record(&mut self, path: String, change: FileChange) {
        self.entries.insert(path, change);
    }

    /// True when no file differs from the last commit, staged or unstaged.
    pub fn is_clean(&self) -> bool {
        self.entries.values().all(FileChange::is_clean)
    }

    /// Paths with a pending change, in path order.
    pub fn dirty_entries(&self) -> impl Iterator<Item = (&str, &FileChange)> {
        self.entries
            .iter()
            .filter(|(_, change)| !change.is_clean())
            .map(|(path, change)| (path.as_str(), change))
    }

    /// Look up the change recorded for a path, if any.
    pub fn change_for(&self, path: &str) -> Option<&FileChange> {
        self.entries.get(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(index: ChangeCode, worktree: ChangeCode) -> FileChange {
        FileChange { index, worktree }
    }

    #[test]
    fn test_empty_status_is_clean() {
        let status = WorktreeStatus::default();
        assert!(status.is_clean());
        assert_eq!(status.dirty_entries().count(), 0);
    }

    #[test]
    fn test_recorded_change_dirties_status() {
        let mut status = WorktreeStatus::default();
        status.record(
            "testfile03.txt".to_string(),
            change(ChangeCode::Unmodified, ChangeCode::Deleted),
        );

        assert!(!status.is_clean());
        let dirty: Vec<_> = status.dirty_entries().collect();
        assert_eq!(dirty.len(), 1);
        assert_eq!(dirty[0].0, "testfile03.txt");
        assert_eq!(dirty[0].1.worktree, ChangeCode::Deleted);
    }

    #[test]
    fn test_unmodified_entry_stays_clean() {
        let mut status = WorktreeStatus::default();
        status.record(
            "testfile01.txt".to_string(),
            change(ChangeCode::Unmodified, ChangeCode::Unmodified),
        );

        assert!(status.is_clean());
        assert_eq!(status.dirty_entries().count(), 0);
    }

    #[test]
    fn test_dirty_entries_in_path_order() {
        let mut status = WorktreeStatus::default();
        status.record(
            "testfile04.txt".to_string(),
            change(ChangeCode::Unmodified, ChangeCode::Untracked),
        );
        status.record(
            "testfile03.txt".to_string(),
            change(ChangeCode::Unmodified, ChangeCode::Deleted),
        );

        let paths: Vec<_> = status.dirty_entries().map(|(path, _)| path).collect();
        assert_eq!(paths, vec!["testfile03.txt", "testfile04.txt"]);
    }

    #[test]
    fn test_change_codes() {
        assert_eq!(ChangeCode::Untracked.code(), '?');
        assert_eq!(ChangeCode::Deleted.code(), 'D');
        assert_eq!(ChangeCode::Unmodified.code(), ' ');
        assert_eq!(ChangeCode::Ignored.code(), '!');
    }
}
