//! Human-readable changelog (CHANGELOG.md)
//!
//! The file is a fixed header followed by two-line release blocks, newest
//! first, each followed by a blank line:
//!
//! ```text
//! # Change Log
//!
//! ## [1.3.0](https://example.com/repo/tree/1.3.0) (2024-01-01)
//! [Full Changelog](https://example.com/repo/compare/1.2.3...1.3.0)
//!
//! ## [1.2.3](https://example.com/repo/tree/1.2.3) (2023-12-01)
//! [Full Changelog](https://example.com/repo/compare/1.2.2...1.2.3)
//!
//! ```
//!
//! Rewrites replace the whole file. Text outside the block grammar (a custom
//! header, trailing notes) does not survive a release.

use crate::core::error::{ChangelogError, ReleaseResult, ResultExt};
use regex::Regex;
use std::fs;
use std::path::Path;

/// Header every rewritten changelog starts with
pub const CHANGELOG_HEADER: &str = "# Change Log";

/// Span from the first `##` to the blank line after the last `[Full Changelog]` line
const ENTRIES_PATTERN: &str = r"(?s)##.*\[Full Changelog\].*\n\n";

/// One release block of the markdown changelog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
  pub version: String,
  pub previous_version: String,
  pub date: String,
  pub repository_url: String,
}

impl ChangelogEntry {
  /// Render the two-line markdown block (no trailing newline)
  pub fn render(&self) -> String {
    format!(
      "## [{version}]({url}/tree/{version}) ({date})\n[Full Changelog]({url}/compare/{previous}...{version})",
      version = self.version,
      url = self.repository_url,
      date = self.date,
      previous = self.previous_version,
    )
  }
}

/// Parsed changelog: the release blocks in file order (newest first)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogDocument {
  entries: Vec<String>,
}

impl ChangelogDocument {
  /// Parse changelog content; `path` is only used for error reporting
  pub fn parse(content: &str, path: &Path) -> ReleaseResult<Self> {
    let pattern = Regex::new(ENTRIES_PATTERN)?;
    let span = pattern.find(content).ok_or_else(|| ChangelogError::Malformed {
      path: path.to_path_buf(),
    })?;

    let entries = span
      .as_str()
      .split("\n\n")
      .filter(|block| !block.trim().is_empty())
      .map(String::from)
      .collect();

    Ok(Self { entries })
  }

  /// Read and parse a changelog file
  pub fn load(path: &Path) -> ReleaseResult<Self> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Self::parse(&content, path)
  }

  /// Release blocks, newest first
  pub fn entries(&self) -> &[String] {
    &self.entries
  }

  /// Put a new release block in front of the existing ones
  pub fn prepend(&mut self, entry: &ChangelogEntry) {
    self.entries.insert(0, entry.render());
  }

  /// Full file content
  pub fn render(&self) -> String {
    let mut out = format!("{}\n\n", CHANGELOG_HEADER);
    for block in &self.entries {
      out.push_str(block);
      out.push_str("\n\n");
    }
    out
  }

  /// Replace the file with the rendered document
  pub fn write(&self, path: &Path) -> ReleaseResult<()> {
    fs::write(path, self.render()).with_context(|| format!("Failed to write {}", path.display()))
  }
}
