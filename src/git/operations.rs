//! Git operations layer
//!
//! This module wraps the git2-rs calls the scenario performs against a real
//! repository: init, stage, commit, hard reset, and status.

use super::types::{ChangeCode, FileChange, WorktreeStatus};
use git2::build::CheckoutBuilder;
use git2::{ObjectType, Oid, Repository, ResetType, Signature, Status, StatusOptions};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during git operations
#[derive(Error, Debug)]
pub enum GitOperationError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Invalid UTF-8 in git data: {0}")]
    InvalidUtf8(String),
}

pub type GitOperationResult<T> = Result<T, GitOperationError>;

/// Initialize a new non-bare repository at `path`, creating the directory
/// if needed.
pub fn init_repository(path: impl AsRef<Path>) -> GitOperationResult<Repository> {
    Ok(Repository::init(path.as_ref())?)
}

/// Stage one file, named relative to the repository root.
///
/// Uses the engine's by-path add, which stages the file even when it matches
/// an ignore rule (the scenario relies on committing an ignore-listed file).
pub fn stage_path(repo: &Repository, relative: &str) -> GitOperationResult<()> {
    let mut index = repo.index()?;
    index.add_path(Path::new(relative))?;
    index.write()?;
    Ok(())
}

/// Commit the current index with a fixed author identity.
///
/// The committer defaults to the author. Works for the initial commit
/// (no parent) as well as later ones.
pub fn commit(
    repo: &Repository,
    message: &str,
    author_name: &str,
    author_email: &str,
) -> GitOperationResult<Oid> {
    let mut index = repo.index()?;
    let tree_id = index.write_tree()?;
    let tree = repo.find_tree(tree_id)?;

    let signature = Signature::now(author_name, author_email)?;

    let mut parents = Vec::new();
    if let Ok(head) = repo.head() {
        if let Some(target) = head.target() {
            parents.push(repo.find_commit(target)?);
        }
    }
    let parent_refs: Vec<_> = parents.iter().collect();

    let oid = repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        message,
        &tree,
        &parent_refs,
    )?;
    Ok(oid)
}

/// Hard reset the working tree to HEAD.
///
/// Uncommitted changes are discarded: deletions of tracked files are
/// reverted and untracked files are removed, matching `git reset --hard`
/// followed by `git clean -d`. The untracked removal needs a second
/// checkout pass, since `git_reset` replaces the checkout strategy for
/// hard resets and drops any caller-supplied options.
pub fn hard_reset_to_head(repo: &Repository) -> GitOperationResult<()> {
    let target = repo.head()?.peel(ObjectType::Commit)?;
    repo.reset(&target, ResetType::Hard, None)?;

    let mut checkout = CheckoutBuilder::new();
    checkout.force().remove_untracked(true);
    repo.checkout_head(Some(&mut checkout))?;
    Ok(())
}

/// Read working-tree status as a path to change-code mapping.
///
/// Untracked files are included; files that are merely ignore-listed are
/// not, so a clean tree yields an empty mapping.
pub fn read_status(repo: &Repository) -> GitOperationResult<WorktreeStatus> {
    let mut options = StatusOptions::new();
    options.include_untracked(true).include_ignored(false);

    let statuses = repo.statuses(Some(&mut options))?;
    let mut status = WorktreeStatus::default();

    for entry in statuses.iter() {
        let path = entry
            .path()
            .ok_or_else(|| GitOperationError::InvalidUtf8("file path".to_string()))?;
        status.record(path.to_string(), classify(entry.status()));
    }

    Ok(status)
}

/// Engine identification for reports, e.g. `git2 0.20.0 (libgit2 1.9.0)`.
pub fn engine_version() -> String {
    let version = git2::Version::get();
    let (major, minor, patch) = version.libgit2_version();
    format!(
        "git2 {} (libgit2 {}.{}.{})",
        version.crate_version(),
        major,
        minor,
        patch
    )
}

fn classify(status: Status) -> FileChange {
    let index = match status {
        s if s.contains(Status::INDEX_NEW) => ChangeCode::Added,
        s if s.contains(Status::INDEX_MODIFIED) => ChangeCode::Modified,
        s if s.contains(Status::INDEX_DELETED) => ChangeCode::Deleted,
        _ => ChangeCode::Unmodified,
    };
    let worktree = match status {
        s if s.contains(Status::WT_NEW) => ChangeCode::Untracked,
        s if s.contains(Status::WT_MODIFIED) => ChangeCode::Modified,
        s if s.contains(Status::WT_DELETED) => ChangeCode::Deleted,
        s if s.contains(Status::IGNORED) => ChangeCode::Ignored,
        _ => ChangeCode::Unmodified,
    };
    FileChange { index, worktree }
}
