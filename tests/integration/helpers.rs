//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const INITIAL_CHANGELOG: &str = "# Change Log\n\n\
## [1.2.3](https://example.com/repo/tree/1.2.3) (2023-12-01)\n\
[Full Changelog](https://example.com/repo/compare/1.2.2...1.2.3)\n\n";

pub const INITIAL_STRUCTURED: &str = r#"{
  "1.2.3": {
    "author": "Jane Doe",
    "release_date": "20231201093000",
    "changes": [
      "Release version 1.2.3"
    ]
  }
}
"#;

/// A released project at 1.2.3 with one feature commit on top, pushed to a bare origin
pub struct TestRepo {
  _root: TempDir,
  _origin: TempDir,
  pub path: PathBuf,
  pub origin: PathBuf,
}

impl TestRepo {
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let origin = TempDir::new()?;
    let path = root.path().to_path_buf();
    let origin_path = origin.path().to_path_buf();

    git(&origin_path, &["init", "--bare", "--initial-branch=master"])?;

    git(&path, &["init", "--initial-branch=master"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    std::fs::write(path.join("VERSION"), "1.2.3\n")?;
    std::fs::write(path.join("CHANGELOG.md"), INITIAL_CHANGELOG)?;
    std::fs::write(path.join("changelog.json"), INITIAL_STRUCTURED)?;
    std::fs::write(
      path.join(".release_manager.toml"),
      "repository_url = \"https://example.com/repo\"\nauthor = \"Jane Doe\"\n",
    )?;
    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "Release version 1.2.3"])?;
    git(&path, &["tag", "1.2.3"])?;

    let repo = Self {
      _root: root,
      _origin: origin,
      path,
      origin: origin_path,
    };

    repo.write_file("src/feature.txt", "feature\n")?;
    repo.commit("Add feature")?;

    let origin_url = repo.origin.to_string_lossy().into_owned();
    git(&repo.path, &["remote", "add", "origin", &origin_url])?;
    git(&repo.path, &["push", "-u", "origin", "master"])?;

    Ok(repo)
  }

  /// Commit everything in the working tree
  pub fn commit(&self, message: &str) -> Result<String> {
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;

    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    let file_path = self.path.join(path);
    if let Some(parent) = file_path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
  }

  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }

  /// Commit subjects, newest first
  pub fn git_log(&self, n: usize) -> Result<Vec<String>> {
    let output = git(&self.path, &["log", &format!("-{}", n), "--format=%s"])?;
    Ok(stdout_lines(&output))
  }

  pub fn tags(&self) -> Result<Vec<String>> {
    Ok(stdout_lines(&git(&self.path, &["tag", "--list"])?))
  }

  pub fn origin_tags(&self) -> Result<Vec<String>> {
    Ok(stdout_lines(&git(&self.origin, &["tag", "--list"])?))
  }
}

fn stdout_lines(output: &Output) -> Vec<String> {
  String::from_utf8_lossy(&output.stdout)
    .lines()
    .map(String::from)
    .collect()
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run the release-manager binary, whatever its exit status
pub fn run_release_manager(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_release-manager");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("RUST_LOG")
    .output()
    .context("Failed to run release-manager")
}

/// Run the release-manager binary and fail on a non-zero exit
pub fn run_release_manager_ok(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_release_manager(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "release-manager {} failed\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}
