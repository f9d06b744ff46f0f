//! `push` command

use crate::core::context::ProjectContext;
use crate::core::error::ReleaseResult;
use crate::core::vcs::SystemGit;
use crate::release::ReleaseManager;

/// Run the push command
pub fn run_push(ctx: &ProjectContext) -> ReleaseResult<()> {
  let git = SystemGit::open(&ctx.root)?;
  let outcome = ReleaseManager::new(ctx, &git).push()?;

  println!();
  println!("✅ Pushed {} and tags to {}", outcome.branch, outcome.remote);
  Ok(())
}
