//! Project context - build once, pass everywhere
//!
//! `ProjectContext` is built once in main.rs from the working directory and the
//! optional configuration file, then handed to the release orchestrator. Nothing
//! below main.rs reads the current directory or the configuration on its own.
//!
//! ```text
//! main.rs:
//!   ProjectContext::build() -> ProjectContext
//!   |
//!   v
//! commands/release.rs, rollback.rs, push.rs, info.rs:
//!   fn run_*(ctx: &ProjectContext, ...)
//! ```

use crate::core::config::ReleaseConfig;
use crate::core::error::ReleaseResult;
use std::path::{Path, PathBuf};

/// Working directory plus typed configuration for one invocation.
#[derive(Debug, Clone)]
pub struct ProjectContext {
  /// Project root directory (where the release files live)
  pub root: PathBuf,

  /// Release configuration; defaults when no configuration file exists
  pub config: ReleaseConfig,
}

impl ProjectContext {
  /// Build project context from a root directory.
  pub fn build(root: &Path) -> ReleaseResult<Self> {
    let config = ReleaseConfig::load(root)?;
    Ok(Self::new(root, config))
  }

  /// Create a context from an explicit configuration
  pub fn new(root: impl Into<PathBuf>, config: ReleaseConfig) -> Self {
    Self {
      root: root.into(),
      config,
    }
  }

  /// Absolute path of a project-relative file
  pub fn path(&self, relative: &Path) -> PathBuf {
    self.root.join(relative)
  }
}
