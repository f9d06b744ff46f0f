//! CLI commands for release-manager
//!
//! - **release**: cut the next release (changelogs, version file, commit, tag)
//! - **rollback**: undo the last release commit and its tag
//! - **push**: push the release branch and tags
//! - **info**: report release readiness and the versions involved
//!
//! All commands accept `&ProjectContext` built once in main.rs.

pub mod info;
pub mod push;
pub mod release;
pub mod rollback;

pub use info::run_info;
pub use push::run_push;
pub use release::run_release;
pub use rollback::run_rollback;

use crate::release::BumpKind;

/// Resolve `--bump`, telling the user when an unknown kind falls back to patch
pub(crate) fn resolve_bump(raw: Option<&str>) -> BumpKind {
  if let Some(raw) = raw
    && !BumpKind::is_known(raw)
  {
    eprintln!("⚠️  Unknown bump kind '{}', releasing a patch version", raw);
  }
  BumpKind::parse_lenient(raw)
}
