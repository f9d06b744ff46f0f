//! Structured changelog (changelog.json / changelog.yml)
//!
//! A mapping from version to release metadata:
//!
//! ```json
//! {
//!   "1.2.3": {
//!     "author": "Jane Doe",
//!     "release_date": "20231201093000",
//!     "changes": ["Fix parser", "Release version 1.2.3"]
//!   }
//! }
//! ```
//!
//! # Invariants
//!
//! 1. Key order is file order; a release appends exactly one key at the end
//! 2. Existing entries are never rewritten, even fields this tool does not know
//! 3. A version is recorded at most once
//! 4. The last change of a release is always `Release version <version>`

use crate::core::error::{ChangelogError, ReleaseResult, ResultExt};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

/// On-disk encoding, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuredFormat {
  Json,
  Yaml,
}

impl StructuredFormat {
  /// `.yml` and `.yaml` are YAML, everything else is JSON
  pub fn from_path(path: &Path) -> Self {
    match path.extension().and_then(|e| e.to_str()) {
      Some("yml") | Some("yaml") => StructuredFormat::Yaml,
      _ => StructuredFormat::Json,
    }
  }
}

/// Metadata recorded for one release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRecord {
  pub author: Option<String>,
  pub release_date: String,
  pub changes: Vec<String>,
}

impl ReleaseRecord {
  /// Build the record for `version` from the commit subjects since the last release
  pub fn new(author: Option<String>, release_date: impl Into<String>, subjects: Vec<String>, version: &str) -> Self {
    let mut changes = subjects;
    changes.push(release_message(version));
    Self {
      author,
      release_date: release_date.into(),
      changes,
    }
  }
}

/// Commit message (and last structured change) of a release
pub fn release_message(version: &str) -> String {
  format!("Release version {}", version)
}

/// Version-keyed release history in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredChangelog {
  entries: Vec<(String, Value)>,
}

impl StructuredChangelog {
  /// Parse file content in the given format
  pub fn parse(content: &str, format: StructuredFormat, path: &Path) -> ReleaseResult<Self> {
    let parsed = match format {
      StructuredFormat::Json => serde_json::from_str::<Self>(content).map_err(|e| e.to_string()),
      StructuredFormat::Yaml => serde_yaml::from_str::<Self>(content).map_err(|e| e.to_string()),
    };

    parsed.map_err(|reason| {
      ChangelogError::MalformedStructured {
        path: path.to_path_buf(),
        reason,
      }
      .into()
    })
  }

  /// Read and parse the structured changelog. A missing file is an error.
  pub fn load(path: &Path) -> ReleaseResult<Self> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Self::parse(&content, StructuredFormat::from_path(path), path)
  }

  /// Versions in file order
  #[allow(dead_code)]
  pub fn versions(&self) -> impl Iterator<Item = &str> {
    self.entries.iter().map(|(version, _)| version.as_str())
  }

  pub fn contains(&self, version: &str) -> bool {
    self.entries.iter().any(|(v, _)| v == version)
  }

  /// Raw metadata recorded for a version
  #[allow(dead_code)]
  pub fn get(&self, version: &str) -> Option<&Value> {
    self.entries.iter().find(|(v, _)| v == version).map(|(_, value)| value)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[allow(dead_code)]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Fail if `version` already has an entry
  pub fn ensure_unrecorded(&self, version: &str) -> ReleaseResult<()> {
    if self.contains(version) {
      return Err(
        ChangelogError::ReleaseAlreadyRecorded {
          version: version.to_string(),
        }
        .into(),
      );
    }
    Ok(())
  }

  /// Append the record of a new release as the last key
  pub fn insert(&mut self, version: &str, record: &ReleaseRecord) -> ReleaseResult<()> {
    self.ensure_unrecorded(version)?;
    let value = serde_json::to_value(record)?;
    self.entries.push((version.to_string(), value));
    Ok(())
  }

  /// Serialize in the given format, with a trailing newline
  pub fn render(&self, format: StructuredFormat) -> ReleaseResult<String> {
    match format {
      StructuredFormat::Json => {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
      }
      StructuredFormat::Yaml => Ok(serde_yaml::to_string(self)?),
    }
  }

  /// Replace the file with the full mapping
  pub fn write(&self, path: &Path) -> ReleaseResult<()> {
    let content = self.render(StructuredFormat::from_path(path))?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
  }
}

impl Serialize for StructuredChangelog {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.entries.len()))?;
    for (version, value) in &self.entries {
      map.serialize_entry(version, value)?;
    }
    map.end()
  }
}

impl<'de> Deserialize<'de> for StructuredChangelog {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
      type Value = StructuredChangelog;

      fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping from version to release metadata")
      }

      fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        let mut seen = HashSet::new();

        while let Some(version) = access.next_key::<String>()? {
          if !seen.insert(version.clone()) {
            return Err(de::Error::custom(format!("duplicate version '{}'", version)));
          }
          let value: Value = access.next_value()?;
          entries.push((version, value));
        }

        Ok(StructuredChangelog { entries })
      }
    }

    deserializer.deserialize_map(EntriesVisitor)
  }
}
