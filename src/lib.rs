pub mod git;
pub mod scenario;
pub mod workdir;

pub use git::{ChangeCode, FileChange, GitOperationError, WorktreeStatus};
pub use scenario::{ScenarioError, ScenarioReport};
