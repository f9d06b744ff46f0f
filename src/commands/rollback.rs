//! `rollback` command

use crate::core::context::ProjectContext;
use crate::core::error::ReleaseResult;
use crate::core::vcs::SystemGit;
use crate::release::ReleaseManager;

/// Run the rollback command
pub fn run_rollback(ctx: &ProjectContext, force: bool) -> ReleaseResult<()> {
  let git = SystemGit::open(&ctx.root)?;
  let manager = ReleaseManager::new(ctx, &git);

  if force {
    println!("⚠️  --force: skipping release commit verification");
  }

  let outcome = manager.rollback(force)?;

  if outcome.tag_deleted {
    println!("   Deleted tag {}", outcome.version);
  } else {
    println!("   Tag {} not found, nothing to delete", outcome.version);
  }
  println!("   Removed last commit");
  println!("   Restored {}", outcome.restored_files.join(", "));
  println!();
  println!("✅ Release {} rolled back", outcome.version);

  Ok(())
}
