//! Git engine layer
//!
//! Thin operations over git2-rs: repository init, staging, commit, hard
//! reset, and status queries. Everything the scenario needs from the
//! version-control engine lives here; the engine itself is treated as a
//! black box.
//!
//! # Driving a repository
//!
//! ```no_run
//! use worktree_reset_repro::git;
//!
//! # fn main() -> Result<(), git::GitOperationError> {
//! let repo = git::init_repository("testRepo")?;
//! git::stage_path(&repo, "testfile01.txt")?;
//! git::commit(&repo, "first commit", "TestUser", "testuser@example.com")?;
//!
//! let status = git::read_status(&repo)?;
//! println!("clean: {}", status.is_clean());
//! # Ok(())
//! # }
//! ```

pub mod operations;
pub mod types;

pub use operations::*;
pub use types::*;
