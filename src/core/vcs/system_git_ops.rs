//! Mutating operations for SystemGit (staging, commits, tags, resets, pushes)

use super::system_git::SystemGit;
use crate::core::error::{GitError, ReleaseError, ReleaseResult};

impl SystemGit {
  /// Stage specific files
  pub(crate) fn stage(&self, files: &[String]) -> ReleaseResult<()> {
    let mut args = vec!["add", "--"];
    args.extend(files.iter().map(String::as_str));
    self.run_checked(&args)?;
    Ok(())
  }

  /// Commit whatever is staged
  pub(crate) fn commit(&self, message: &str) -> ReleaseResult<()> {
    self.run_checked(&["commit", "-m", message])?;
    Ok(())
  }

  /// Create a lightweight tag at HEAD
  pub(crate) fn tag(&self, name: &str) -> ReleaseResult<()> {
    self.run_checked(&["tag", name])?;
    Ok(())
  }

  /// Delete a local tag
  pub(crate) fn untag(&self, name: &str) -> ReleaseResult<()> {
    self.run_checked(&["tag", "-d", name])?;
    Ok(())
  }

  /// Push a branch and set it as upstream
  pub(crate) fn push_branch(&self, remote: &str, branch: &str) -> ReleaseResult<()> {
    println!("   Pushing {} to remote '{}'...", branch, remote);

    let output = self.run(&["push", "-u", remote, branch])?;
    if !output.success() {
      return Err(ReleaseError::Git(GitError::PushFailed {
        remote: remote.to_string(),
        target: branch.to_string(),
        reason: output.stderr,
      }));
    }

    println!("   ✅ Pushed {}/{}", remote, branch);
    Ok(())
  }

  /// Push every local tag
  pub(crate) fn push_all_tags(&self, remote: &str) -> ReleaseResult<()> {
    println!("   Pushing tags to remote '{}'...", remote);

    let output = self.run(&["push", remote, "--tags"])?;
    if !output.success() {
      return Err(ReleaseError::Git(GitError::PushFailed {
        remote: remote.to_string(),
        target: "tags".to_string(),
        reason: output.stderr,
      }));
    }

    println!("   ✅ Pushed tags to {}", remote);
    Ok(())
  }

  /// Move HEAD back one commit, keeping index and working tree
  pub(crate) fn reset_soft_head(&self) -> ReleaseResult<()> {
    self.run_checked(&["reset", "--soft", "HEAD^"])?;
    Ok(())
  }

  /// Reset the index to HEAD
  pub(crate) fn reset_index(&self) -> ReleaseResult<()> {
    self.run_checked(&["reset", "--quiet"])?;
    Ok(())
  }

  /// Restore files in the working tree from the index
  pub(crate) fn restore_paths(&self, files: &[String]) -> ReleaseResult<()> {
    let mut args = vec!["checkout", "--"];
    args.extend(files.iter().map(String::as_str));
    self.run_checked(&args)?;
    Ok(())
  }
}
