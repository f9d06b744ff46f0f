//! Per-invocation release values (dates, versions, project identity)

use crate::core::config::ReleaseConfig;
use crate::core::error::ReleaseResult;
use crate::release::version::{BumpKind, next_version};
use chrono::{Local, Utc};
use serde::Serialize;

/// Everything a release needs to know about itself, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseContext {
  /// Local calendar date, `YYYY-MM-DD` (markdown changelog)
  pub current_date: String,

  /// UTC timestamp, `YYYYMMDDHHMMSS` (structured changelog)
  pub release_timestamp: String,

  pub current_version: String,
  pub bump_kind: BumpKind,
  pub next_version: String,
  pub repository_url: String,
  pub author: Option<String>,
}

impl ReleaseContext {
  /// Build a context with explicit dates
  pub fn new(
    config: &ReleaseConfig,
    current_version: impl Into<String>,
    bump_kind: BumpKind,
    current_date: impl Into<String>,
    release_timestamp: impl Into<String>,
  ) -> ReleaseResult<Self> {
    let current_version = current_version.into();
    let next_version = next_version(&current_version, bump_kind)?;

    Ok(Self {
      current_date: current_date.into(),
      release_timestamp: release_timestamp.into(),
      current_version,
      bump_kind,
      next_version,
      repository_url: config.repository_url.clone(),
      author: config.author.clone(),
    })
  }

  /// Build a context stamped with the current clock
  pub fn now(config: &ReleaseConfig, current_version: impl Into<String>, bump_kind: BumpKind) -> ReleaseResult<Self> {
    let current_date = Local::now().format("%Y-%m-%d").to_string();
    let release_timestamp = Utc::now().format("%Y%m%d%H%M%S").to_string();
    Self::new(config, current_version, bump_kind, current_date, release_timestamp)
  }
}
