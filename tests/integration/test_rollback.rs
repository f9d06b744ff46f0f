//! Integration tests for `release-manager rollback`

use crate::helpers::{INITIAL_CHANGELOG, INITIAL_STRUCTURED, TestRepo, git, run_release_manager, run_release_manager_ok};
use anyhow::Result;

#[test]
fn test_rollback_undoes_release() -> Result<()> {
  let repo = TestRepo::new()?;
  run_release_manager_ok(&repo.path, &["release", "--bump", "minor"])?;
  assert_eq!(repo.tags()?, vec!["1.2.3", "1.3.0"]);

  let output = run_release_manager_ok(&repo.path, &["rollback"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Release 1.3.0 rolled back"), "{stdout}");

  assert_eq!(repo.tags()?, vec!["1.2.3"]);
  assert_eq!(repo.git_log(1)?, vec!["Add feature"]);
  assert_eq!(repo.read_file("VERSION")?, "1.2.3\n");
  assert_eq!(repo.read_file("CHANGELOG.md")?, INITIAL_CHANGELOG);
  assert_eq!(repo.read_file("changelog.json")?, INITIAL_STRUCTURED);

  Ok(())
}

#[test]
fn test_rollback_refuses_non_release_head() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_release_manager(&repo.path, &["rollback"])?;
  assert_eq!(output.status.code(), Some(3));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("not the release of 1.2.3"), "{stderr}");
  assert!(stderr.contains("rollback --force"), "{stderr}");

  assert_eq!(repo.git_log(1)?, vec!["Add feature"]);
  assert_eq!(repo.tags()?, vec!["1.2.3"]);

  Ok(())
}

#[test]
fn test_forced_rollback() -> Result<()> {
  let repo = TestRepo::new()?;

  run_release_manager_ok(&repo.path, &["rollback", "--force"])?;

  // The feature commit is gone along with the 1.2.3 tag
  assert_eq!(repo.git_log(1)?, vec!["Release version 1.2.3"]);
  assert!(repo.tags()?.is_empty());
  assert_eq!(repo.read_file("VERSION")?, "1.2.3\n");

  Ok(())
}

#[test]
fn test_rollback_refuses_tag_on_older_commit() -> Result<()> {
  let repo = TestRepo::new()?;
  run_release_manager_ok(&repo.path, &["release", "--bump", "minor"])?;
  git(&repo.path, &["tag", "-f", "1.3.0", "HEAD~1"])?;
  let tagged = git(&repo.path, &["rev-parse", "1.3.0"])?.stdout;

  let output = run_release_manager(&repo.path, &["rollback"])?;
  assert_eq!(output.status.code(), Some(3));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Release tag '1.3.0' does not point at the last commit"), "{stderr}");
  assert!(stderr.contains("rollback --force"), "{stderr}");

  assert_eq!(repo.git_log(1)?, vec!["Release version 1.3.0"]);
  assert_eq!(repo.tags()?, vec!["1.2.3", "1.3.0"]);
  assert_eq!(git(&repo.path, &["rev-parse", "1.3.0"])?.stdout, tagged);
  assert_eq!(repo.read_file("VERSION")?, "1.3.0\n");

  Ok(())
}
