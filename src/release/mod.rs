//! Release workflow
//!
//! Leaves first:
//!
//! - **version**: bump kinds and the single-line version file
//! - **changelog**: the markdown changelog (newest first, fixed header)
//! - **structured**: the version-keyed JSON/YAML changelog (append only)
//! - **preflight**: repository snapshot and release-readiness verdict
//! - **context**: dates and versions fixed for one invocation
//! - **orchestrator**: `release`, `rollback`, `push` and `info` over a `GitPort`
//!
//! The release branch, remote, repository URL, author and file locations come
//! from `.release_manager.toml` (see `core::config`).

pub mod changelog;
pub mod context;
pub mod orchestrator;
pub mod preflight;
pub mod structured;
pub mod version;

pub use orchestrator::{InfoReport, ReleaseManager};
pub use version::BumpKind;
