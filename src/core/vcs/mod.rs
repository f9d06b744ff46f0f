pub mod system_git;
mod system_git_ops;

pub use system_git::SystemGit;

use crate::core::error::ReleaseResult;

/// Version-control operations the release workflow needs.
///
/// Every method blocks until git exits. A non-zero exit is always an error
/// (`GitError::CommandFailed`), never an empty result.
pub trait GitPort {
  /// Current branch name (`HEAD` when detached)
  fn current_branch(&self) -> ReleaseResult<String>;

  /// Working-tree modifications that are not staged
  fn uncommitted_files(&self) -> ReleaseResult<Vec<String>>;

  /// Files staged in the index
  fn staged_files(&self) -> ReleaseResult<Vec<String>>;

  /// Oneline log of commits on `branch` that `remote/branch` does not have
  fn unpushed_commits(&self, remote: &str, branch: &str) -> ReleaseResult<Vec<String>>;

  /// Commit subjects between two refs, oldest first
  fn commit_subjects(&self, from: &str, to: &str) -> ReleaseResult<Vec<String>>;

  /// Every commit subject reachable from `to`, oldest first
  fn commit_subjects_until(&self, to: &str) -> ReleaseResult<Vec<String>>;

  /// Subject of the HEAD commit
  fn head_subject(&self) -> ReleaseResult<String>;

  fn tag_exists(&self, name: &str) -> ReleaseResult<bool>;

  /// Commit id `rev` points at, peeling annotated tags
  fn resolve_commit(&self, rev: &str) -> ReleaseResult<String>;

  fn add_and_commit(&self, files: &[String], message: &str) -> ReleaseResult<()>;

  fn create_tag(&self, name: &str) -> ReleaseResult<()>;

  fn delete_tag(&self, name: &str) -> ReleaseResult<()>;

  /// Push `branch` to `remote`, setting upstream
  fn push(&self, remote: &str, branch: &str) -> ReleaseResult<()>;

  fn push_tags(&self, remote: &str) -> ReleaseResult<()>;

  /// `git reset --soft HEAD^`
  fn soft_reset_last_commit(&self) -> ReleaseResult<()>;

  /// `git reset` (unstage everything, keep the working tree)
  fn unstage_all(&self) -> ReleaseResult<()>;

  /// Discard working-tree changes to `files`
  fn checkout_paths(&self, files: &[String]) -> ReleaseResult<()>;
}

/// Split git output into non-empty trimmed lines
pub(crate) fn output_lines(stdout: &str) -> Vec<String> {
  stdout
    .lines()
    .map(|s| s.trim().to_string())
    .filter(|s| !s.is_empty())
    .collect()
}
