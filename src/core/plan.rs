//! Plan-based release execution
//!
//! A release is not transactional: it rewrites three files, commits them and
//! tags the commit. Instead of running those mutations inline, `release`
//! first builds a `ReleasePlan` listing every step, then executes it through a
//! `StepTracker` that records the last completed step.
//!
//! - **Dry-run mode**: print the plan without touching the repository
//! - **Auditability**: plans are JSON-serializable and carry a content hash
//! - **Recovery**: a failing step reports exactly which steps already ran,
//!   which tells the user whether `rollback` applies
//!
//! ```text
//! release()
//!   ↓
//! ReleasePlan (what to do)
//!   ↓
//! StepTracker (apply steps in order, remember progress)
//!   ↓
//! Ok(()) | StepFailure { step, completed, cause }
//! ```

use crate::core::error::{ReleaseError, ReleaseResult, StepFailure};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Plan identifier (SHA256 hash of plan contents)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanId(String);

impl PlanId {
  /// Create a plan ID from plan contents
  pub fn from_contents(contents: &[u8]) -> Self {
    let mut hasher = Sha256::new();
    hasher.update(contents);
    let result = hasher.finalize();
    Self(format!("{:x}", result))
  }

  /// Get the short ID (first 12 characters)
  pub fn short(&self) -> &str {
    &self.0[..12.min(self.0.len())]
  }
}

impl fmt::Display for PlanId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.short())
  }
}

/// One mutating step of a release, in execution order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReleaseStep {
  /// Rewrite the markdown changelog with the new entry prepended
  WriteChangelog { path: String },

  /// Rewrite the structured changelog with the new version key appended
  WriteStructuredChangelog { path: String },

  /// Write the next version into the version file
  WriteVersionFile { path: String, version: String },

  /// Stage the release files and commit them
  Commit { message: String, files: Vec<String> },

  /// Tag the release commit
  Tag { name: String },
}

impl ReleaseStep {
  /// File rewritten by this step, if it is a file step
  pub fn file(&self) -> Option<&str> {
    match self {
      ReleaseStep::WriteChangelog { path }
      | ReleaseStep::WriteStructuredChangelog { path }
      | ReleaseStep::WriteVersionFile { path, .. } => Some(path),
      ReleaseStep::Commit { .. } | ReleaseStep::Tag { .. } => None,
    }
  }
}

impl fmt::Display for ReleaseStep {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseStep::WriteChangelog { path } => write!(f, "Write {}", path),
      ReleaseStep::WriteStructuredChangelog { path } => write!(f, "Write {}", path),
      ReleaseStep::WriteVersionFile { path, version } => write!(f, "Write {} ({})", path, version),
      ReleaseStep::Commit { message, files } => {
        write!(f, "Commit '{}' ({} files)", message, files.len())
      }
      ReleaseStep::Tag { name } => write!(f, "Create tag {}", name),
    }
  }
}

/// A release plan: the ordered steps that turn the working tree into a release
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleasePlan {
  /// Plan ID (content hash)
  pub id: PlanId,

  /// Version being released
  pub version: String,

  /// Steps to perform (in order)
  pub steps: Vec<ReleaseStep>,
}

impl ReleasePlan {
  /// Create an empty plan for a version
  pub fn new(version: impl Into<String>) -> Self {
    let mut plan = Self {
      id: PlanId::from_contents(&[]),
      version: version.into(),
      steps: Vec::new(),
    };
    plan.recompute_id();
    plan
  }

  /// Add a step to the plan
  pub fn add_step(&mut self, step: ReleaseStep) {
    self.steps.push(step);
    self.recompute_id();
  }

  /// Recompute plan ID based on current contents
  fn recompute_id(&mut self) {
    let json = serde_json::to_vec(&(&self.version, &self.steps)).unwrap_or_default();
    self.id = PlanId::from_contents(&json);
  }

  /// Get human-readable representation
  pub fn to_human_readable(&self) -> String {
    let mut output = String::new();

    output.push_str(&format!("📋 Plan: release {} ({})\n", self.version, self.id));
    output.push_str(&format!("\n   Steps ({}):\n", self.steps.len()));

    for (i, step) in self.steps.iter().enumerate() {
      output.push_str(&format!("   {}. {}\n", i + 1, step));
    }

    output
  }

  /// Get number of steps
  pub fn len(&self) -> usize {
    self.steps.len()
  }

}

/// Executes plan steps in order and remembers how far it got
#[derive(Debug, Default)]
pub struct StepTracker {
  completed: Vec<ReleaseStep>,
}

impl StepTracker {
  pub fn new() -> Self {
    Self::default()
  }

  /// Last step that finished successfully
  pub fn last_completed(&self) -> Option<&ReleaseStep> {
    self.completed.last()
  }

  /// Steps completed so far, in order
  pub fn completed(&self) -> &[ReleaseStep] {
    &self.completed
  }

  /// Run every step of `plan` with `apply`, stopping at the first failure
  pub fn run<F>(&mut self, plan: &ReleasePlan, mut apply: F) -> ReleaseResult<()>
  where
    F: FnMut(&ReleaseStep) -> ReleaseResult<()>,
  {
    for step in &plan.steps {
      tracing::info!(plan = %plan.id, step = %step, "running release step");
      if let Err(cause) = apply(step) {
        tracing::debug!(step = %step, completed = self.completed.len(), "release step failed");
        return Err(ReleaseError::Step(StepFailure {
          step: step.clone(),
          completed: self.completed.clone(),
          cause: Box::new(cause),
        }));
      }
      self.completed.push(step.clone());
    }
    Ok(())
  }
}
