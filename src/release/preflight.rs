//! Release readiness checks
//!
//! `RepositoryState` is a fresh snapshot of the four git queries a release
//! depends on. `PreflightValidator` turns a snapshot into a verdict without
//! running anything itself, so `release` and `info` can share it.

use crate::core::error::{ReleaseResult, ValidationError};
use crate::core::vcs::GitPort;
use serde::Serialize;

/// Snapshot of the repository, recomputed per command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryState {
  pub current_branch: String,
  pub uncommitted_files: Vec<String>,
  pub staged_files: Vec<String>,
  pub unpushed_commits: Vec<String>,
}

impl RepositoryState {
  /// Query git for the current state
  pub fn capture(git: &impl GitPort, remote: &str, default_branch: &str) -> ReleaseResult<Self> {
    Ok(Self {
      current_branch: git.current_branch()?,
      uncommitted_files: git.uncommitted_files()?,
      staged_files: git.staged_files()?,
      unpushed_commits: git.unpushed_commits(remote, default_branch)?,
    })
  }
}

/// Outcome of a preflight check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreflightVerdict {
  Ready,
  /// Not on the release branch (takes precedence over pending changes)
  InvalidBranch,
  PendingChanges,
}

/// Read-only readiness check over a repository snapshot
pub struct PreflightValidator<'a> {
  state: &'a RepositoryState,
  default_branch: &'a str,
}

impl<'a> PreflightValidator<'a> {
  pub fn new(state: &'a RepositoryState, default_branch: &'a str) -> Self {
    Self { state, default_branch }
  }

  pub fn valid_branch(&self) -> bool {
    self.state.current_branch == self.default_branch
  }

  /// Anything staged, modified or not yet pushed
  pub fn pending_changes(&self) -> bool {
    !self.state.staged_files.is_empty()
      || !self.state.uncommitted_files.is_empty()
      || !self.state.unpushed_commits.is_empty()
  }

  pub fn is_release_ready(&self) -> bool {
    self.valid_branch() && !self.pending_changes()
  }

  pub fn verdict(&self) -> PreflightVerdict {
    if !self.valid_branch() {
      PreflightVerdict::InvalidBranch
    } else if self.pending_changes() {
      PreflightVerdict::PendingChanges
    } else {
      PreflightVerdict::Ready
    }
  }

  /// The error a release reports for this state, if any
  pub fn check(&self) -> Result<(), ValidationError> {
    match self.verdict() {
      PreflightVerdict::Ready => Ok(()),
      PreflightVerdict::InvalidBranch => Err(ValidationError::InvalidBranch {
        current: self.state.current_branch.clone(),
        expected: self.default_branch.to_string(),
      }),
      PreflightVerdict::PendingChanges => Err(ValidationError::PendingChanges {
        staged: self.state.staged_files.clone(),
        uncommitted: self.state.uncommitted_files.clone(),
        unpushed: self.state.unpushed_commits.clone(),
      }),
    }
  }
}
