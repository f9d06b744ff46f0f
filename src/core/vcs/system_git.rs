//! System git backend
//!
//! Every operation goes through one exec abstraction (`run`) that captures
//! stdout, stderr and the exit status. `run_checked` turns a non-zero exit into
//! `GitError::CommandFailed` carrying the command line and stderr, so a failed
//! query can never masquerade as an empty result.
//!
//! - Safe subprocess execution (isolated environment)
//! - One subprocess per query, no caching across calls

use super::{GitPort, output_lines};
use crate::core::error::{GitError, ReleaseError, ReleaseResult, ResultExt};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Caller environment variables git still sees: PATH and HOME for the binary
/// and its config, the SSH agent socket and command for pushes over SSH
const FORWARDED_ENV: &[&str] = &["PATH", "HOME", "SSH_AUTH_SOCK", "GIT_SSH_COMMAND"];

/// The whitelisted variables `lookup` knows about
fn forwarded_env<F>(lookup: F) -> Vec<(&'static str, OsString)>
where
  F: Fn(&str) -> Option<OsString>,
{
  FORWARDED_ENV
    .iter()
    .filter_map(|&key| lookup(key).map(|value| (key, value)))
    .collect()
}

/// Captured result of one git invocation
#[derive(Debug, Clone)]
pub struct GitOutput {
  pub stdout: String,
  pub stderr: String,
  pub status: ExitStatus,
}

impl GitOutput {
  pub fn success(&self) -> bool {
    self.status.success()
  }
}

/// Git backend using system git (zero crate dependencies)
pub struct SystemGit {
  /// Repository working directory
  pub(crate) repo_path: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// This performs ONE subprocess call to get the repository metadata.
  pub fn open(path: &Path) -> ReleaseResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(ReleaseError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(ReleaseError::message(format!("Failed to open git repository: {}", stderr)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    tracing::debug!(work_tree = stdout.trim(), "opened git repository");

    Ok(Self {
      repo_path: path.to_path_buf(),
    })
  }

  /// Run git with `args` and capture everything, whatever the exit status
  pub(crate) fn run(&self, args: &[&str]) -> ReleaseResult<GitOutput> {
    let command = format!("git {}", args.join(" "));
    tracing::debug!(%command, repo = %self.repo_path.display(), "running git");

    let output = self
      .git_cmd()
      .args(args)
      .output()
      .with_context(|| format!("Failed to execute {}", command))?;

    let result = GitOutput {
      stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
      stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
      status: output.status,
    };
    tracing::debug!(%command, status = ?result.status.code(), "git finished");
    Ok(result)
  }

  /// Run git and fail with `GitError::CommandFailed` on a non-zero exit.
  ///
  /// Returns trimmed stdout.
  pub(crate) fn run_checked(&self, args: &[&str]) -> ReleaseResult<String> {
    let output = self.run(args)?;

    if !output.success() {
      return Err(ReleaseError::Git(GitError::CommandFailed {
        command: format!("git {}", args.join(" ")),
        stderr: output.stderr,
      }));
    }

    Ok(output.stdout.trim().to_string())
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists `FORWARDED_ENV`
  /// - Adds safe configuration overrides
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    // Isolated environment (identity comes from git config, not the caller's env)
    cmd.env_clear();
    cmd.envs(forwarded_env(|key| std::env::var_os(key)));

    cmd.arg("-c").arg("advice.detachedHead=false");
    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII
    cmd.arg("-c").arg("core.pager=cat");

    cmd
  }
}

impl GitPort for SystemGit {
  fn current_branch(&self) -> ReleaseResult<String> {
    self.run_checked(&["rev-parse", "--abbrev-ref", "HEAD"])
  }

  fn uncommitted_files(&self) -> ReleaseResult<Vec<String>> {
    let stdout = self.run_checked(&["diff", "--name-only"])?;
    Ok(output_lines(&stdout))
  }

  fn staged_files(&self) -> ReleaseResult<Vec<String>> {
    let stdout = self.run_checked(&["diff", "--cached", "--name-only"])?;
    Ok(output_lines(&stdout))
  }

  fn unpushed_commits(&self, remote: &str, branch: &str) -> ReleaseResult<Vec<String>> {
    let range = format!("{}/{}..{}", remote, branch, branch);
    let stdout = self.run_checked(&["log", "--format=oneline", &range])?;
    Ok(output_lines(&stdout))
  }

  fn commit_subjects(&self, from: &str, to: &str) -> ReleaseResult<Vec<String>> {
    let range = format!("{}...{}", from, to);
    let stdout = self.run_checked(&["log", "--format=%s", &range])?;
    let mut subjects = output_lines(&stdout);
    subjects.reverse();
    Ok(subjects)
  }

  fn commit_subjects_until(&self, to: &str) -> ReleaseResult<Vec<String>> {
    let stdout = self.run_checked(&["log", "--format=%s", to])?;
    let mut subjects = output_lines(&stdout);
    subjects.reverse();
    Ok(subjects)
  }

  fn head_subject(&self) -> ReleaseResult<String> {
    self.run_checked(&["log", "-1", "--format=%s", "HEAD"])
  }

  fn tag_exists(&self, name: &str) -> ReleaseResult<bool> {
    let reference = format!("refs/tags/{}", name);
    // Exit status 1 with --quiet means "no such ref", not a failure
    let output = self.run(&["rev-parse", "--verify", "--quiet", &reference])?;
    Ok(output.success())
  }

  fn resolve_commit(&self, rev: &str) -> ReleaseResult<String> {
    let peeled = format!("{}^{{commit}}", rev);
    self.run_checked(&["rev-parse", "--verify", &peeled])
  }

  fn add_and_commit(&self, files: &[String], message: &str) -> ReleaseResult<()> {
    self.stage(files)?;
    self.commit(message)
  }

  fn create_tag(&self, name: &str) -> ReleaseResult<()> {
    self.tag(name)
  }

  fn delete_tag(&self, name: &str) -> ReleaseResult<()> {
    self.untag(name)
  }

  fn push(&self, remote: &str, branch: &str) -> ReleaseResult<()> {
    self.push_branch(remote, branch)
  }

  fn push_tags(&self, remote: &str) -> ReleaseResult<()> {
    self.push_all_tags(remote)
  }

  fn soft_reset_last_commit(&self) -> ReleaseResult<()> {
    self.reset_soft_head()
  }

  fn unstage_all(&self) -> ReleaseResult<()> {
    self.reset_index()
  }

  fn checkout_paths(&self, files: &[String]) -> ReleaseResult<()> {
    self.restore_paths(files)
  }
}
