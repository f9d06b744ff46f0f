//! Version bumping and the version file

use crate::core::error::{ChangelogError, ConfigError, ReleaseResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Which semver component a release increments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpKind {
  /// Breaking release
  Major,
  /// Feature release
  Minor,
  /// Fix release
  #[default]
  Patch,
}

impl BumpKind {
  /// Parse a user-supplied bump kind.
  ///
  /// Anything other than `major`, `minor` or `patch` (including nothing at all)
  /// is a patch release.
  pub fn parse_lenient(raw: Option<&str>) -> Self {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
      Some("major") => BumpKind::Major,
      Some("minor") => BumpKind::Minor,
      Some("patch") => BumpKind::Patch,
      Some(other) => {
        tracing::debug!(bump = other, "unknown bump kind, releasing a patch");
        BumpKind::Patch
      }
      None => BumpKind::Patch,
    }
  }

  /// Whether `raw` names a bump kind exactly (used to warn the user)
  pub fn is_known(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "major" | "minor" | "patch")
  }

  /// Apply bump to a semver version
  pub fn apply(&self, version: &semver::Version) -> semver::Version {
    match self {
      BumpKind::Major => semver::Version::new(version.major + 1, 0, 0),
      BumpKind::Minor => semver::Version::new(version.major, version.minor + 1, 0),
      BumpKind::Patch => semver::Version::new(version.major, version.minor, version.patch + 1),
    }
  }
}

impl fmt::Display for BumpKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BumpKind::Major => write!(f, "major"),
      BumpKind::Minor => write!(f, "minor"),
      BumpKind::Patch => write!(f, "patch"),
    }
  }
}

/// Parse a version string, mapping failures to a changelog error
pub fn parse_version(raw: &str) -> ReleaseResult<semver::Version> {
  semver::Version::parse(raw.trim()).map_err(|e| {
    ChangelogError::Version {
      value: raw.trim().to_string(),
      reason: e.to_string(),
    }
    .into()
  })
}

/// Next version after `current` for a bump kind
pub fn next_version(current: &str, kind: BumpKind) -> ReleaseResult<String> {
  let version = parse_version(current)?;
  Ok(kind.apply(&version).to_string())
}

/// Read the current version from the version file
pub fn read_version_file(path: &Path) -> ReleaseResult<String> {
  if !path.exists() {
    return Err(ConfigError::VersionFileNotFound {
      path: path.to_path_buf(),
    }
    .into());
  }

  let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
  let version = content.trim().to_string();
  parse_version(&version)?;
  Ok(version)
}

/// Write `version` as the whole content of the version file
pub fn write_version_file(path: &Path, version: &str) -> ReleaseResult<()> {
  fs::write(path, format!("{}\n", version)).with_context(|| format!("Failed to write {}", path.display()))
}
