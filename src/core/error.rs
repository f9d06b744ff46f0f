//! Error types for release-manager with contextual messages and exit codes
//!
//! Every failure a command can hit is categorized here. Each category knows its
//! process exit code and, where there is something the user can do about it, a
//! help line printed under the error.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::core::plan::ReleaseStep;

/// Exit codes for release-manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, malformed files)
  User = 1,
  /// System error (git, I/O)
  System = 2,
  /// Validation failure (wrong branch, pending changes)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for release-manager
#[derive(Debug)]
pub enum ReleaseError {
  /// Configuration errors
  Config(ConfigError),

  /// Git operation errors
  Git(GitError),

  /// Preflight and rollback validation errors
  Validation(ValidationError),

  /// Changelog and version file errors
  Changelog(ChangelogError),

  /// A mutating release step failed after earlier steps already ran
  Step(StepFailure),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message { message: String, context: Option<String> },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
      },
      ReleaseError::Io(err) => ReleaseError::Message {
        message: ctx_str,
        context: Some(err.to_string()),
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReleaseError::Config(_) => ExitCode::User,
      ReleaseError::Git(_) => ExitCode::System,
      ReleaseError::Validation(_) => ExitCode::Validation,
      ReleaseError::Changelog(_) => ExitCode::User,
      ReleaseError::Step(failure) => failure.cause.exit_code(),
      ReleaseError::Io(_) => ExitCode::System,
      ReleaseError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Config(e) => e.help_message(),
      ReleaseError::Git(e) => e.help_message(),
      ReleaseError::Validation(e) => e.help_message(),
      ReleaseError::Changelog(e) => e.help_message(),
      ReleaseError::Step(e) => Some(e.help_message()),
      ReleaseError::Message { .. } | ReleaseError::Io(_) => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Config(e) => write!(f, "{}", e),
      ReleaseError::Git(e) => write!(f, "{}", e),
      ReleaseError::Validation(e) => write!(f, "{}", e),
      ReleaseError::Changelog(e) => write!(f, "{}", e),
      ReleaseError::Step(e) => write!(f, "{}", e),
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::Message { message, context } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) => Some(e),
      ReleaseError::Step(e) => Some(e.cause.as_ref()),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<toml_edit::de::Error> for ReleaseError {
  fn from(err: toml_edit::de::Error) -> Self {
    ReleaseError::Config(ConfigError::Invalid {
      reason: err.to_string(),
    })
  }
}

impl From<serde_json::Error> for ReleaseError {
  fn from(err: serde_json::Error) -> Self {
    ReleaseError::message(format!("JSON error: {}", err))
  }
}

impl From<serde_yaml::Error> for ReleaseError {
  fn from(err: serde_yaml::Error) -> Self {
    ReleaseError::message(format!("YAML error: {}", err))
  }
}

impl From<regex::Error> for ReleaseError {
  fn from(err: regex::Error) -> Self {
    ReleaseError::message(format!("Regex error: {}", err))
  }
}

impl From<ConfigError> for ReleaseError {
  fn from(err: ConfigError) -> Self {
    ReleaseError::Config(err)
  }
}

impl From<GitError> for ReleaseError {
  fn from(err: GitError) -> Self {
    ReleaseError::Git(err)
  }
}

impl From<ValidationError> for ReleaseError {
  fn from(err: ValidationError) -> Self {
    ReleaseError::Validation(err)
  }
}

impl From<ChangelogError> for ReleaseError {
  fn from(err: ChangelogError) -> Self {
    ReleaseError::Changelog(err)
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Config file exists but could not be parsed
  Invalid { reason: String },

  /// Version file is missing
  VersionFileNotFound { path: PathBuf },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::Invalid { .. } => {
        Some("Known keys: repository_url, author, default_branch, remote and a [files] table.".to_string())
      }
      ConfigError::VersionFileNotFound { path } => Some(format!(
        "Create {} containing the current version, e.g. `echo 0.1.0 > {}`.",
        path.display(),
        path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default()
      )),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Invalid { reason } => write!(f, "Invalid release-manager configuration: {}", reason),
      ConfigError::VersionFileNotFound { path } => {
        write!(f, "Version file not found: {}", path.display())
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command exited non-zero
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },

  /// Push failed
  PushFailed {
    remote: String,
    target: String,
    reason: String,
  },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::PushFailed { reason, .. } => {
        if reason.contains("non-fast-forward") || reason.contains("rejected") {
          Some("The remote has commits you don't have. Pull and release again.".to_string())
        } else if reason.contains("Permission denied") || reason.contains("403") {
          Some("Check your credentials for the remote repository.".to_string())
        } else {
          None
        }
      }
      GitError::RepoNotFound { path } => Some(format!(
        "Run release-manager from inside a git working tree (looked in {}).",
        path.display()
      )),
      GitError::CommandFailed { .. } => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr.trim_end())
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
      GitError::PushFailed { remote, target, reason } => {
        write!(f, "Push of {} to {} failed: {}", target, remote, reason.trim_end())
      }
    }
  }
}

/// Validation errors: the repository is not in a state the command accepts
#[derive(Debug)]
pub enum ValidationError {
  /// Releases are only cut from the default branch
  InvalidBranch { current: String, expected: String },

  /// Staged, uncommitted or unpushed work is present
  PendingChanges {
    staged: Vec<String>,
    uncommitted: Vec<String>,
    unpushed: Vec<String>,
  },

  /// HEAD is not the release commit of the current version
  NotAReleaseCommit { version: String, head_subject: String },

  /// The tag of the release being rolled back does not exist
  ReleaseTagMissing { tag: String },

  /// The release tag exists but points at another commit than HEAD
  ReleaseTagNotAtHead { tag: String },

  /// The tag for the next version already exists
  ReleaseTagExists { tag: String },
}

impl ValidationError {
  fn help_message(&self) -> Option<String> {
    match self {
      ValidationError::InvalidBranch { expected, .. } => Some(format!(
        "You must be on '{}' branch to create a new release.",
        expected
      )),
      ValidationError::PendingChanges { .. } => {
        Some("Commit them or stash them before creating a new release.".to_string())
      }
      ValidationError::NotAReleaseCommit { .. }
      | ValidationError::ReleaseTagMissing { .. }
      | ValidationError::ReleaseTagNotAtHead { .. } => {
        Some("Use `release-manager rollback --force` to undo the last commit anyway.".to_string())
      }
      ValidationError::ReleaseTagExists { tag } => Some(format!(
        "Pick another bump kind, or delete the stale tag with `git tag -d {}` if it was never published.",
        tag
      )),
    }
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationError::InvalidBranch { current, .. } => {
        write!(f, "Invalid branch to create tag: '{}'", current)
      }
      ValidationError::PendingChanges {
        staged,
        uncommitted,
        unpushed,
      } => {
        writeln!(f, "There are pending changes:")?;
        writeln!(f, "* staged_files     : {:?}", staged)?;
        writeln!(f, "* uncommited_files : {:?}", uncommitted)?;
        write!(f, "* unpushed_commits : {:?}", unpushed)
      }
      ValidationError::NotAReleaseCommit { version, head_subject } => write!(
        f,
        "Last commit is not the release of {} (HEAD is '{}')",
        version, head_subject
      ),
      ValidationError::ReleaseTagMissing { tag } => write!(f, "Release tag '{}' does not exist", tag),
      ValidationError::ReleaseTagNotAtHead { tag } => {
        write!(f, "Release tag '{}' does not point at the last commit", tag)
      }
      ValidationError::ReleaseTagExists { tag } => write!(f, "Tag '{}' already exists", tag),
    }
  }
}

/// Changelog and version file errors
#[derive(Debug)]
pub enum ChangelogError {
  /// Markdown changelog does not contain any release block
  Malformed { path: PathBuf },

  /// Structured changelog is not a version-keyed mapping
  MalformedStructured { path: PathBuf, reason: String },

  /// Structured changelog already holds an entry for this version
  ReleaseAlreadyRecorded { version: String },

  /// A version string is not valid semver
  Version { value: String, reason: String },
}

impl ChangelogError {
  fn help_message(&self) -> Option<String> {
    match self {
      ChangelogError::Malformed { .. } => Some(
        "Each release block must be a '## [x.y.z](...)' line followed by a '[Full Changelog](...)' line and a blank line."
          .to_string(),
      ),
      ChangelogError::MalformedStructured { .. } => {
        Some("The structured changelog must be a mapping from version to release metadata, e.g. `{}`.".to_string())
      }
      ChangelogError::ReleaseAlreadyRecorded { .. } => {
        Some("Pick another bump kind or remove the stale entry by hand.".to_string())
      }
      ChangelogError::Version { .. } => None,
    }
  }
}

impl fmt::Display for ChangelogError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ChangelogError::Malformed { path } => {
        write!(f, "Malformed changelog: no release entries found in {}", path.display())
      }
      ChangelogError::MalformedStructured { path, reason } => {
        write!(f, "Malformed structured changelog {}: {}", path.display(), reason)
      }
      ChangelogError::ReleaseAlreadyRecorded { version } => {
        write!(f, "Structured changelog already has an entry for {}", version)
      }
      ChangelogError::Version { value, reason } => {
        write!(f, "Invalid semver version '{}': {}", value, reason)
      }
    }
  }
}

/// A release step failed; earlier steps already changed the repository
#[derive(Debug)]
pub struct StepFailure {
  pub step: ReleaseStep,
  pub completed: Vec<ReleaseStep>,
  pub cause: Box<ReleaseError>,
}

impl StepFailure {
  /// Rollback only applies once the release commit exists
  pub fn rollback_applies(&self) -> bool {
    self.completed.iter().any(|s| matches!(s, ReleaseStep::Commit { .. }))
  }

  fn help_message(&self) -> String {
    // Tag is the last step, so a failure after the commit leaves it untagged
    if self.rollback_applies() {
      "The release commit exists but is not tagged. Run `release-manager rollback --force` to undo it.".to_string()
    } else if self.completed.is_empty() {
      "Nothing was changed. Fix the cause and release again.".to_string()
    } else {
      let files: Vec<&str> = self.completed.iter().filter_map(|s| s.file()).collect();
      format!(
        "Release files were rewritten but not committed. Restore them with `git checkout -- {}`.",
        files.join(" ")
      )
    }
  }
}

impl fmt::Display for StepFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "Release step failed: {}", self.step)?;
    if self.completed.is_empty() {
      writeln!(f, "Completed steps: none")?;
    } else {
      writeln!(f, "Completed steps:")?;
      for step in &self.completed {
        writeln!(f, "  ✓ {}", step)?;
      }
    }
    write!(f, "Cause: {}", self.cause)
  }
}

/// Result type alias for release-manager
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ReleaseError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
