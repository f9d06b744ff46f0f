//! Integration tests for `release-manager release`

use crate::helpers::{INITIAL_CHANGELOG, INITIAL_STRUCTURED, TestRepo, git, run_release_manager, run_release_manager_ok};
use anyhow::Result;

#[test]
fn test_minor_release() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_release_manager_ok(&repo.path, &["release", "--bump", "minor"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Release 1.3.0 completed"), "{stdout}");

  assert_eq!(repo.read_file("VERSION")?, "1.3.0\n");

  let changelog = repo.read_file("CHANGELOG.md")?;
  assert!(changelog.starts_with("# Change Log\n\n## [1.3.0](https://example.com/repo/tree/1.3.0) ("));
  assert!(changelog.contains("[Full Changelog](https://example.com/repo/compare/1.2.3...1.3.0)\n\n## [1.2.3]"));
  assert!(changelog.ends_with(&INITIAL_CHANGELOG["# Change Log\n\n".len()..]));

  let structured: serde_json::Value = serde_json::from_str(&repo.read_file("changelog.json")?)?;
  let versions: Vec<&String> = structured.as_object().unwrap().keys().collect();
  assert_eq!(versions, vec!["1.2.3", "1.3.0"]);
  assert_eq!(
    structured["1.3.0"]["changes"],
    serde_json::json!(["Add feature", "Release version 1.3.0"])
  );
  assert_eq!(structured["1.3.0"]["author"], "Jane Doe");
  assert_eq!(structured["1.3.0"]["release_date"].as_str().unwrap().len(), 14);

  assert_eq!(repo.git_log(1)?, vec!["Release version 1.3.0"]);
  assert_eq!(repo.tags()?, vec!["1.2.3", "1.3.0"]);

  // Nothing left uncommitted
  let status = git(&repo.path, &["status", "--porcelain"])?;
  assert!(status.stdout.is_empty());

  Ok(())
}

#[test]
fn test_unknown_bump_is_patch() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_release_manager_ok(&repo.path, &["release", "--bump", "huge"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Unknown bump kind 'huge'"), "{stderr}");
  assert_eq!(repo.read_file("VERSION")?, "1.2.4\n");

  Ok(())
}

#[test]
fn test_dry_run_changes_nothing() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_release_manager_ok(&repo.path, &["release", "--bump", "major", "--dry-run"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Plan: release 2.0.0"), "{stdout}");
  assert!(stdout.contains("5. Create tag 2.0.0"), "{stdout}");

  assert_eq!(repo.read_file("VERSION")?, "1.2.3\n");
  assert_eq!(repo.read_file("CHANGELOG.md")?, INITIAL_CHANGELOG);
  assert_eq!(repo.read_file("changelog.json")?, INITIAL_STRUCTURED);
  assert_eq!(repo.tags()?, vec!["1.2.3"]);
  assert_eq!(repo.git_log(1)?, vec!["Add feature"]);

  Ok(())
}

#[test]
fn test_invalid_branch() -> Result<()> {
  let repo = TestRepo::new()?;
  git(&repo.path, &["checkout", "-b", "feature-x"])?;

  let output = run_release_manager(&repo.path, &["release", "--bump", "minor"])?;
  assert_eq!(output.status.code(), Some(3));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Invalid branch to create tag"), "{stderr}");
  assert!(stderr.contains("You must be on 'master' branch"), "{stderr}");

  assert_eq!(repo.read_file("VERSION")?, "1.2.3\n");
  assert_eq!(repo.tags()?, vec!["1.2.3"]);

  Ok(())
}

#[test]
fn test_pending_changes() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("README.md", "staged\n")?;
  git(&repo.path, &["add", "README.md"])?;

  let output = run_release_manager(&repo.path, &["release"])?;
  assert_eq!(output.status.code(), Some(3));

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("There are pending changes"), "{stderr}");
  assert!(stderr.contains("README.md"), "{stderr}");
  assert!(stderr.contains("Commit them or stash them"), "{stderr}");

  assert_eq!(repo.read_file("VERSION")?, "1.2.3\n");
  assert_eq!(repo.git_log(1)?, vec!["Add feature"]);

  Ok(())
}

#[test]
fn test_unpushed_commit_blocks_release() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("src/other.txt", "other\n")?;
  repo.commit("Local only")?;

  let output = run_release_manager(&repo.path, &["release"])?;
  assert_eq!(output.status.code(), Some(3));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Local only"), "{stderr}");

  Ok(())
}

#[test]
fn test_malformed_changelog_aborts_untouched() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("CHANGELOG.md", "# Change Log\n\nNothing here yet.\n")?;
  repo.commit("Break changelog")?;
  git(&repo.path, &["push", "origin", "master"])?;

  let output = run_release_manager(&repo.path, &["release"])?;
  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Malformed changelog"), "{stderr}");

  assert_eq!(repo.read_file("VERSION")?, "1.2.3\n");
  assert_eq!(repo.read_file("changelog.json")?, INITIAL_STRUCTURED);

  Ok(())
}

#[test]
fn test_outside_repository() -> Result<()> {
  let dir = tempfile::TempDir::new()?;
  std::fs::write(dir.path().join("VERSION"), "1.0.0\n")?;

  let output = run_release_manager(dir.path(), &["release"])?;
  assert_eq!(output.status.code(), Some(2));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Git repository not found"), "{stderr}");

  Ok(())
}

#[test]
fn test_existing_tag_for_next_version_blocks_release() -> Result<()> {
  let repo = TestRepo::new()?;
  git(&repo.path, &["tag", "1.2.4", "HEAD~1"])?;
  let tagged_before = git(&repo.path, &["rev-parse", "1.2.4"])?.stdout;

  let output = run_release_manager(&repo.path, &["release", "--bump", "patch"])?;
  assert_eq!(output.status.code(), Some(3));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Tag '1.2.4' already exists"), "{stderr}");

  assert_eq!(repo.read_file("VERSION")?, "1.2.3\n");
  assert_eq!(repo.read_file("CHANGELOG.md")?, INITIAL_CHANGELOG);
  assert_eq!(repo.read_file("changelog.json")?, INITIAL_STRUCTURED);
  assert_eq!(repo.git_log(1)?, vec!["Add feature"]);
  assert_eq!(repo.tags()?, vec!["1.2.3", "1.2.4"]);
  assert_eq!(git(&repo.path, &["rev-parse", "1.2.4"])?.stdout, tagged_before);

  Ok(())
}
