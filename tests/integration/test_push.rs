//! Integration tests for `release-manager push`

use crate::helpers::{TestRepo, git, run_release_manager, run_release_manager_ok};
use anyhow::Result;

#[test]
fn test_push_release_and_tags() -> Result<()> {
  let repo = TestRepo::new()?;
  run_release_manager_ok(&repo.path, &["release", "--bump", "patch"])?;

  let output = run_release_manager_ok(&repo.path, &["push"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Pushed master and tags to origin"), "{stdout}");

  assert_eq!(repo.origin_tags()?, vec!["1.2.3", "1.2.4"]);
  let head = git(&repo.origin, &["log", "-1", "--format=%s", "master"])?;
  assert_eq!(String::from_utf8_lossy(&head.stdout).trim(), "Release version 1.2.4");

  // Pushed release leaves the repository ready again
  let info = run_release_manager_ok(&repo.path, &["info", "--json"])?;
  let report: serde_json::Value = serde_json::from_slice(&info.stdout)?;
  assert_eq!(report["ready"], true);

  Ok(())
}

#[test]
fn test_push_to_missing_remote() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file(".release_manager.toml", "remote = \"nowhere\"\n")?;

  let output = run_release_manager(&repo.path, &["push"])?;
  assert_eq!(output.status.code(), Some(2));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Push of master to nowhere failed"), "{stderr}");

  Ok(())
}
