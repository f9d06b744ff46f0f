use crate::core::error::{ConfigError, ReleaseResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for release-manager
/// Searched in order: .release_manager.toml, release_manager.toml, .config/release_manager.toml,
/// then the legacy YAML file .release_manager.yml
///
/// Every field is optional. A project without any configuration file releases
/// from `master`, pushes to `origin` and renders changelog links against an
/// empty repository URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReleaseConfig {
  /// Base URL used for `/tree/<version>` and `/compare/<a>...<b>` links
  #[serde(default)]
  pub repository_url: String,

  /// Author recorded in the structured changelog
  #[serde(default)]
  pub author: Option<String>,

  /// The only branch releases may be cut from
  #[serde(default = "default_branch")]
  pub default_branch: String,

  /// Remote used by `push` and for the unpushed-commit check
  #[serde(default = "default_remote")]
  pub remote: String,

  #[serde(default)]
  pub files: FilesConfig,
}

fn default_branch() -> String {
  "master".to_string()
}

fn default_remote() -> String {
  "origin".to_string()
}

impl Default for ReleaseConfig {
  fn default() -> Self {
    Self {
      repository_url: String::new(),
      author: None,
      default_branch: default_branch(),
      remote: default_remote(),
      files: FilesConfig::default(),
    }
  }
}

/// Paths of the release files, relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilesConfig {
  /// Single-line version file (default: VERSION)
  #[serde(default = "default_version_file")]
  pub version: PathBuf,

  /// Markdown changelog (default: CHANGELOG.md)
  #[serde(default = "default_changelog_file")]
  pub changelog: PathBuf,

  /// Structured changelog; `.yml`/`.yaml` selects YAML, anything else JSON
  #[serde(default = "default_structured_changelog_file")]
  pub structured_changelog: PathBuf,
}

fn default_version_file() -> PathBuf {
  PathBuf::from("VERSION")
}

fn default_changelog_file() -> PathBuf {
  PathBuf::from("CHANGELOG.md")
}

fn default_structured_changelog_file() -> PathBuf {
  PathBuf::from("changelog.json")
}

impl Default for FilesConfig {
  fn default() -> Self {
    Self {
      version: default_version_file(),
      changelog: default_changelog_file(),
      structured_changelog: default_structured_changelog_file(),
    }
  }
}

impl FilesConfig {
  /// The three release files, in the order they are staged
  pub fn release_files(&self) -> [&Path; 3] {
    [&self.version, &self.changelog, &self.structured_changelog]
  }
}

impl ReleaseConfig {
  /// Find config file in search order
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join(".release_manager.toml"),
      path.join("release_manager.toml"),
      path.join(".config").join("release_manager.toml"),
      path.join(".release_manager.yml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from the project root, falling back to defaults when no file exists
  pub fn load(path: &Path) -> ReleaseResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      tracing::debug!(root = %path.display(), "no configuration file, using defaults");
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config = if config_path.extension().is_some_and(|ext| ext == "yml") {
      Self::parse_yaml(&content)?
    } else {
      toml_edit::de::from_str(&content)?
    };

    tracing::debug!(path = %config_path.display(), "loaded configuration");
    Ok(config)
  }

  fn parse_yaml(content: &str) -> ReleaseResult<Self> {
    // An empty YAML document is null, not an empty mapping
    if content.trim().is_empty() {
      return Ok(Self::default());
    }
    serde_yaml::from_str(content).map_err(|e| {
      ConfigError::Invalid {
        reason: e.to_string(),
      }
      .into()
    })
  }
}
