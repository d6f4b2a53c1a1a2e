//! Scenario runner
//!
//! One strictly sequential scenario: prepare a working directory, initialize
//! a repository, commit a set of files (one of them ignore-listed), delete
//! the ignore-listed file and add an untracked one, hard reset, then inspect
//! status. The interesting question is what the engine does with a file that
//! is both deleted on disk and matched by an ignore rule.

use crate::git::{self, GitOperationError, WorktreeStatus};
use crate::workdir;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const AUTHOR_NAME: &str = "TestUser";
const AUTHOR_EMAIL: &str = "testuser@example.com";
const COMMIT_MESSAGE: &str = "first commit";

/// Files committed in step 5, including the ignore rules themselves.
const COMMITTED_FILES: [(&str, &str); 4] = [
    ("testfile01.txt", "testFile01"),
    ("testfile02.txt", "testFile02"),
    ("testfile03.txt", "testFile03"),
    (".gitignore", "testfile03.txt\n"),
];

/// Created after the commit; never staged.
const UNTRACKED_FILE: (&str, &str) = ("testfile04.txt", "testFile04");

/// Committed file that also matches the ignore rules; deleted before reset.
const IGNORE_LISTED_FILE: &str = "testfile03.txt";

/// Errors that abort a scenario run
#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("filesystem operation failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Git(#[from] GitOperationError),
}

fn fs_err(path: PathBuf) -> impl FnOnce(io::Error) -> ScenarioError {
    move |source| ScenarioError::Io { path, source }
}

/// Record of one scenario run: status snapshots at each checkpoint plus the
/// engine that produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Working directory the scenario ran in.
    pub path: String,

    /// Version-control engine and version, since the final outcome is
    /// engine-specific.
    pub engine: String,

    /// Status immediately after the first commit. Expected clean.
    pub after_commit: WorktreeStatus,

    /// Status after adding the untracked file and deleting the
    /// ignore-listed one.
    pub after_mutation: WorktreeStatus,

    /// Status after the hard reset. Whether this is clean is the run's
    /// payload.
    pub after_reset: WorktreeStatus,
}

impl ScenarioReport {
    pub fn reset_left_tree_clean(&self) -> bool {
        self.after_reset.is_clean()
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "scenario repository: {} ({})", self.path, self.engine)?;
        writeln!(f)?;
        write_snapshot(f, "after commit", &self.after_commit)?;
        write_snapshot(f, "after mutation", &self.after_mutation)?;
        write_snapshot(f, "after hard reset", &self.after_reset)?;

        writeln!(f)?;
        if self.reset_left_tree_clean() {
            writeln!(
                f,
                "Everything is fine: the working tree is clean after the hard reset."
            )?;
        } else {
            writeln!(
                f,
                "!!! the working tree is still not clean after the hard reset !!!"
            )?;
            for (path, change) in self.after_reset.dirty_entries() {
                writeln!(f, "  {} {}", change.worktree.code(), path)?;
            }
            writeln!(f)?;
            writeln!(
                f,
                "A deleted file that also appears in the ignore rules is the known \
                 trouble spot: an engine that skips ignored paths when scanning the \
                 worktree never sees the deletion, so the hard reset fails to restore \
                 the file."
            )?;
        }
        Ok(())
    }
}

fn write_snapshot(f: &mut fmt::Formatter<'_>, label: &str, status: &WorktreeStatus) -> fmt::Result {
    if status.is_clean() {
        writeln!(f, "{label}: clean")?;
    } else {
        writeln!(f, "{label}:")?;
        for (path, change) in status.dirty_entries() {
            writeln!(f, "  {}{} {}", change.index.code(), change.worktree.code(), path)?;
        }
    }
    Ok(())
}

/// Run the full scenario in the working directory at `path`.
///
/// Every step is fatal on error; the dirty-after-reset outcome is not an
/// error, it is the report's verdict.
pub fn run(path: &Path) -> Result<ScenarioReport, ScenarioError> {
    workdir::prepare(path).map_err(fs_err(path.to_path_buf()))?;
    info!("prepared working directory at {}", path.display());

    let repo = git::init_repository(path)?;
    info!("initialized repository");

    for (name, content) in COMMITTED_FILES {
        workdir::write_new_file(path, name, content).map_err(fs_err(path.join(name)))?;
        git::stage_path(&repo, name)?;
    }

    let oid = git::commit(&repo, COMMIT_MESSAGE, AUTHOR_NAME, AUTHOR_EMAIL)?;
    info!("created commit {oid}");
    let after_commit = git::read_status(&repo)?;

    let (untracked_name, untracked_content) = UNTRACKED_FILE;
    workdir::write_new_file(path, untracked_name, untracked_content)
        .map_err(fs_err(path.join(untracked_name)))?;
    workdir::remove_file(path, IGNORE_LISTED_FILE)
        .map_err(fs_err(path.join(IGNORE_LISTED_FILE)))?;
    info!(
        "mutated worktree: added {untracked_name}, deleted {IGNORE_LISTED_FILE}"
    );
    let after_mutation = git::read_status(&repo)?;

    git::hard_reset_to_head(&repo)?;
    info!("hard reset to HEAD");
    let after_reset = git::read_status(&repo)?;

    Ok(ScenarioReport {
        path: path.display().to_string(),
        engine: git::engine_version(),
        after_commit,
        after_mutation,
        after_reset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::ChangeCode;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_status_clean_after_commit() {
        let base = TempDir::new().unwrap();
        let report = run(&base.path().join("repo")).unwrap();

        assert!(report.after_commit.is_clean());
    }

    #[test]
    fn test_mutation_shows_untracked_and_deleted() {
        let base = TempDir::new().unwrap();
        let report = run(&base.path().join("repo")).unwrap();

        let untracked = report.after_mutation.change_for("testfile04.txt").unwrap();
        assert_eq!(untracked.worktree, ChangeCode::Untracked);

        let deleted = report.after_mutation.change_for("testfile03.txt").unwrap();
        assert_eq!(deleted.worktree, ChangeCode::Deleted);
    }

    #[test]
    fn test_hard_reset_leaves_tree_clean() {
        // libgit2 restores a deleted tracked file even when it matches an
        // ignore rule, and the forced checkout removes the untracked file.
        let base = TempDir::new().unwrap();
        let dir = base.path().join("repo");
        let report = run(&dir).unwrap();

        assert!(report.reset_left_tree_clean());
        assert_eq!(
            fs::read_to_string(dir.join("testfile03.txt")).unwrap(),
            "testFile03"
        );
        assert!(!dir.join("testfile04.txt").exists());
    }

    #[test]
    fn test_final_file_contents() {
        let base = TempDir::new().unwrap();
        let dir = base.path().join("repo");
        run(&dir).unwrap();

        assert_eq!(
            fs::read_to_string(dir.join("testfile01.txt")).unwrap(),
            "testFile01"
        );
        assert_eq!(
            fs::read_to_string(dir.join("testfile02.txt")).unwrap(),
            "testFile02"
        );
        assert_eq!(
            fs::read_to_string(dir.join(".gitignore")).unwrap(),
            "testfile03.txt\n"
        );
    }

    #[test]
    fn test_rerun_over_same_path_starts_fresh() {
        let base = TempDir::new().unwrap();
        let dir = base.path().join("repo");

        run(&dir).unwrap();
        let report = run(&dir).unwrap();

        assert!(report.after_commit.is_clean());
        // No duplicated content after the second run.
        assert_eq!(
            fs::read_to_string(dir.join("testfile01.txt")).unwrap(),
            "testFile01"
        );
    }

    #[test]
    fn test_report_renders_verdict() {
        let base = TempDir::new().unwrap();
        let report = run(&base.path().join("repo")).unwrap();

        let rendered = report.to_string();
        assert!(rendered.contains("after commit: clean"));
        assert!(rendered.contains("? testfile04.txt"));
        assert!(rendered.contains("D testfile03.txt"));
        assert!(rendered.contains("Everything is fine"));
    }

    #[test]
    fn test_report_round_trips_as_json() {
        let base = TempDir::new().unwrap();
        let report = run(&base.path().join("repo")).unwrap();

        let json = serde_json::to_string(&report).unwrap();
        let parsed: ScenarioReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.after_mutation, report.after_mutation);
    }
}
