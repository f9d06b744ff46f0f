//! Integration tests for `release-manager info`

use crate::helpers::{TestRepo, git, run_release_manager_ok};
use anyhow::Result;

#[test]
fn test_info_on_ready_repository() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_release_manager_ok(&repo.path, &["info", "--bump", "minor"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("OK for release   : ✓"), "{stdout}");
  assert!(stdout.contains("repository_url   : https://example.com/repo"), "{stdout}");
  assert!(stdout.contains("author           : Jane Doe"), "{stdout}");
  assert!(stdout.contains("current_branch   : master"), "{stdout}");
  assert!(stdout.contains("current_version  : 1.2.3"), "{stdout}");
  assert!(stdout.contains("next_version     : 1.3.0"), "{stdout}");
  assert!(stdout.contains("uncommited_files :\n[]"), "{stdout}");

  Ok(())
}

#[test]
fn test_info_json_lists_pending_changes() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("VERSION", "1.2.3\n\n")?;
  repo.write_file("notes.txt", "notes\n")?;
  git(&repo.path, &["add", "notes.txt"])?;

  let output = run_release_manager_ok(&repo.path, &["info", "--json"])?;
  let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  assert_eq!(report["ready"], false);
  assert_eq!(report["valid_branch"], true);
  assert_eq!(report["bump_version"], "patch");
  assert_eq!(report["next_version"], "1.2.4");
  assert_eq!(report["uncommitted_files"], serde_json::json!(["VERSION"]));
  assert_eq!(report["staged_files"], serde_json::json!(["notes.txt"]));
  assert_eq!(report["unpushed_commits"], serde_json::json!([]));

  // info never mutates
  assert_eq!(repo.read_file("VERSION")?, "1.2.3\n\n");

  Ok(())
}

#[test]
fn test_info_on_other_branch() -> Result<()> {
  let repo = TestRepo::new()?;
  git(&repo.path, &["checkout", "-b", "feature-x"])?;

  let output = run_release_manager_ok(&repo.path, &["info", "--json"])?;
  let report: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  assert_eq!(report["ready"], false);
  assert_eq!(report["current_branch"], "feature-x");
  assert_eq!(report["valid_branch"], false);

  Ok(())
}
