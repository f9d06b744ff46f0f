//! Core engine for release-manager
//!
//! - **config**: release_manager.toml parsing with documented defaults
//! - **context**: Project root + configuration, built once in main.rs
//! - **error**: Error types with contextual help messages and exit codes
//! - **plan**: Release step planning and tracked execution
//! - **vcs**: Git operations abstraction (GitPort, SystemGit)

pub mod config;
pub mod context;
pub mod error;
pub mod plan;
pub mod vcs;
