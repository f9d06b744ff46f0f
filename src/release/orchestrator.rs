//! Release orchestration: `release`, `rollback`, `push` and `info`
//!
//! `ReleaseManager` owns no state of its own. Every operation re-reads the
//! release files and re-queries git, so two calls never share a stale view of
//! the repository.
//!
//! A release runs in three phases:
//!
//! ```text
//! preflight  (git queries only, fails with a ValidationError)
//!   ↓
//! prepare    (read + render files in memory, fails before any write)
//!   ↓
//! execute    (ReleasePlan through StepTracker, fails with StepFailure)
//! ```

use crate::core::context::ProjectContext;
use crate::core::error::{ReleaseResult, ValidationError};
use crate::core::plan::{ReleasePlan, ReleaseStep, StepTracker};
use crate::core::vcs::GitPort;
use crate::release::changelog::{ChangelogDocument, ChangelogEntry};
use crate::release::context::ReleaseContext;
use crate::release::preflight::{PreflightValidator, RepositoryState};
use crate::release::structured::{ReleaseRecord, StructuredChangelog, release_message};
use crate::release::version::{BumpKind, read_version_file, write_version_file};
use serde::Serialize;
use std::path::Path;

/// Result of `release`
#[derive(Debug, Clone)]
pub struct ReleaseOutcome {
  pub context: ReleaseContext,
  pub plan: ReleasePlan,
  /// False for a dry run
  pub executed: bool,
}

/// Result of `rollback`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollbackOutcome {
  pub version: String,
  /// False when the tag was already gone (forced rollback only)
  pub tag_deleted: bool,
  pub restored_files: Vec<String>,
}

/// Result of `push`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushOutcome {
  pub remote: String,
  pub branch: String,
}

/// Read-only snapshot reported by `info`
#[derive(Debug, Clone, Serialize)]
pub struct InfoReport {
  pub ready: bool,
  pub repository_url: String,
  pub author: Option<String>,
  pub current_branch: String,
  pub default_branch: String,
  pub valid_branch: bool,
  pub current_date: String,
  pub release_date: String,
  pub bump_version: BumpKind,
  pub current_version: String,
  pub next_version: String,
  pub uncommitted_files: Vec<String>,
  pub staged_files: Vec<String>,
  pub unpushed_commits: Vec<String>,
}

/// Release files rendered in memory, waiting to be written
struct PreparedRelease {
  changelog: ChangelogDocument,
  structured: StructuredChangelog,
}

/// Drives the release workflow of one project through a `GitPort`
pub struct ReleaseManager<'a, G: GitPort> {
  ctx: &'a ProjectContext,
  git: &'a G,
}

impl<'a, G: GitPort> ReleaseManager<'a, G> {
  pub fn new(ctx: &'a ProjectContext, git: &'a G) -> Self {
    Self { ctx, git }
  }

  /// Snapshot the repository state release readiness depends on
  pub fn repository_state(&self) -> ReleaseResult<RepositoryState> {
    let config = &self.ctx.config;
    RepositoryState::capture(self.git, &config.remote, &config.default_branch)
  }

  /// Fail unless the repository is on the release branch with nothing pending
  pub fn preflight(&self) -> ReleaseResult<RepositoryState> {
    let state = self.repository_state()?;
    PreflightValidator::new(&state, &self.ctx.config.default_branch).check()?;
    Ok(state)
  }

  /// Version currently recorded in the version file
  pub fn current_version(&self) -> ReleaseResult<String> {
    read_version_file(&self.ctx.path(&self.ctx.config.files.version))
  }

  /// Cut a release: rewrite both changelogs and the version file, commit, tag.
  ///
  /// With `dry_run` the plan is built and returned without touching anything.
  pub fn release(&self, bump: BumpKind, dry_run: bool) -> ReleaseResult<ReleaseOutcome> {
    self.preflight()?;
    let context = ReleaseContext::now(&self.ctx.config, self.current_version()?, bump)?;
    self.release_with_context(context, dry_run)
  }

  /// Prepare and execute a release for an already-built context.
  ///
  /// Callers must have run `preflight` first.
  pub fn release_with_context(&self, context: ReleaseContext, dry_run: bool) -> ReleaseResult<ReleaseOutcome> {
    let prepared = self.prepare(&context)?;
    let plan = self.plan(&context);

    if dry_run {
      tracing::info!(plan = %plan.id, version = %context.next_version, "dry run, nothing executed");
      return Ok(ReleaseOutcome {
        context,
        plan,
        executed: false,
      });
    }

    let mut tracker = StepTracker::new();
    tracker.run(&plan, |step| self.apply(step, &prepared))?;
    if let Some(last) = tracker.last_completed() {
      tracing::info!(
        steps = tracker.completed().len(),
        of = plan.len(),
        last = %last,
        "release executed"
      );
    }

    Ok(ReleaseOutcome {
      context,
      plan,
      executed: true,
    })
  }

  /// Read both changelogs and render the new release into them, in memory
  fn prepare(&self, context: &ReleaseContext) -> ReleaseResult<PreparedRelease> {
    let files = &self.ctx.config.files;

    if self.git.tag_exists(&context.next_version)? {
      return Err(
        ValidationError::ReleaseTagExists {
          tag: context.next_version.clone(),
        }
        .into(),
      );
    }

    let mut changelog = ChangelogDocument::load(&self.ctx.path(&files.changelog))?;
    let mut structured = StructuredChangelog::load(&self.ctx.path(&files.structured_changelog))?;
    structured.ensure_unrecorded(&context.next_version)?;

    tracing::debug!(
      entries = changelog.entries().len(),
      recorded = structured.len(),
      "loaded changelogs"
    );

    let subjects = self.changes_since(&context.current_version)?;
    tracing::debug!(count = subjects.len(), since = %context.current_version, "collected commit subjects");

    changelog.prepend(&ChangelogEntry {
      version: context.next_version.clone(),
      previous_version: context.current_version.clone(),
      date: context.current_date.clone(),
      repository_url: context.repository_url.clone(),
    });

    let record = ReleaseRecord::new(
      context.author.clone(),
      context.release_timestamp.clone(),
      subjects,
      &context.next_version,
    );
    structured.insert(&context.next_version, &record)?;

    Ok(PreparedRelease { changelog, structured })
  }

  /// Commit subjects since the last release, oldest first.
  ///
  /// Without a tag for `current_version` (first release) the whole history of
  /// the release branch counts.
  fn changes_since(&self, current_version: &str) -> ReleaseResult<Vec<String>> {
    let branch = &self.ctx.config.default_branch;
    if self.git.tag_exists(current_version)? {
      self.git.commit_subjects(current_version, branch)
    } else {
      tracing::info!(tag = current_version, "no tag for current version, using full history");
      self.git.commit_subjects_until(branch)
    }
  }

  fn plan(&self, context: &ReleaseContext) -> ReleasePlan {
    let files = &self.ctx.config.files;
    let mut plan = ReleasePlan::new(&context.next_version);

    plan.add_step(ReleaseStep::WriteChangelog {
      path: path_string(&files.changelog),
    });
    plan.add_step(ReleaseStep::WriteStructuredChangelog {
      path: path_string(&files.structured_changelog),
    });
    plan.add_step(ReleaseStep::WriteVersionFile {
      path: path_string(&files.version),
      version: context.next_version.clone(),
    });
    plan.add_step(ReleaseStep::Commit {
      message: release_message(&context.next_version),
      files: self.release_files(),
    });
    plan.add_step(ReleaseStep::Tag {
      name: context.next_version.clone(),
    });

    plan
  }

  fn apply(&self, step: &ReleaseStep, prepared: &PreparedRelease) -> ReleaseResult<()> {
    match step {
      ReleaseStep::WriteChangelog { path } => prepared.changelog.write(&self.ctx.root.join(path)),
      ReleaseStep::WriteStructuredChangelog { path } => prepared.structured.write(&self.ctx.root.join(path)),
      ReleaseStep::WriteVersionFile { path, version } => write_version_file(&self.ctx.root.join(path), version),
      ReleaseStep::Commit { message, files } => self.git.add_and_commit(files, message),
      ReleaseStep::Tag { name } => self.git.create_tag(name),
    }
  }

  /// Undo the last release: drop its tag and commit, restore the release files.
  ///
  /// Unless `force` is set, HEAD must be `Release version <current>` and the
  /// tag `<current>` must exist and point at HEAD; otherwise nothing is touched.
  pub fn rollback(&self, force: bool) -> ReleaseResult<RollbackOutcome> {
    let version = self.current_version()?;
    let tag_present = self.git.tag_exists(&version)?;

    if !force {
      let head_subject = self.git.head_subject()?;
      if head_subject != release_message(&version) {
        return Err(
          ValidationError::NotAReleaseCommit {
            version: version.clone(),
            head_subject,
          }
          .into(),
        );
      }
      if !tag_present {
        return Err(ValidationError::ReleaseTagMissing { tag: version.clone() }.into());
      }
      if self.git.resolve_commit(&version)? != self.git.resolve_commit("HEAD")? {
        return Err(ValidationError::ReleaseTagNotAtHead { tag: version.clone() }.into());
      }
    }

    if tag_present {
      self.git.delete_tag(&version)?;
    } else {
      tracing::warn!(tag = %version, "tag not found, skipping tag deletion");
    }

    let files = self.release_files();
    self.git.soft_reset_last_commit()?;
    self.git.unstage_all()?;
    self.git.checkout_paths(&files)?;
    tracing::info!(%version, "rolled back release");

    Ok(RollbackOutcome {
      version,
      tag_deleted: tag_present,
      restored_files: files,
    })
  }

  /// Push the release branch and every tag to the configured remote
  pub fn push(&self) -> ReleaseResult<PushOutcome> {
    let config = &self.ctx.config;
    self.git.push(&config.remote, &config.default_branch)?;
    self.git.push_tags(&config.remote)?;

    Ok(PushOutcome {
      remote: config.remote.clone(),
      branch: config.default_branch.clone(),
    })
  }

  /// Gather everything `info` reports. Never mutates.
  pub fn info(&self, bump: BumpKind) -> ReleaseResult<InfoReport> {
    let state = self.repository_state()?;
    let context = ReleaseContext::now(&self.ctx.config, self.current_version()?, bump)?;
    Ok(self.report(state, context))
  }

  fn report(&self, state: RepositoryState, context: ReleaseContext) -> InfoReport {
    let default_branch = self.ctx.config.default_branch.clone();
    let validator = PreflightValidator::new(&state, &default_branch);
    let ready = validator.is_release_ready();
    let valid_branch = validator.valid_branch();

    InfoReport {
      ready,
      repository_url: context.repository_url,
      author: context.author,
      current_branch: state.current_branch,
      default_branch,
      valid_branch,
      current_date: context.current_date,
      release_date: context.release_timestamp,
      bump_version: context.bump_kind,
      current_version: context.current_version,
      next_version: context.next_version,
      uncommitted_files: state.uncommitted_files,
      staged_files: state.staged_files,
      unpushed_commits: state.unpushed_commits,
    }
  }

  /// Version file, changelog and structured changelog, project-relative
  fn release_files(&self) -> Vec<String> {
    self
      .ctx
      .config
      .files
      .release_files()
      .iter()
      .map(|p| path_string(p))
      .collect()
  }
}

fn path_string(path: &Path) -> String {
  path.to_string_lossy().into_owned()
}
