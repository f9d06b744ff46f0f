//! `release` command

use crate::core::context::ProjectContext;
use crate::core::error::ReleaseResult;
use crate::core::vcs::SystemGit;
use crate::release::ReleaseManager;
use crate::release::context::ReleaseContext;

/// Run the release command
pub fn run_release(ctx: &ProjectContext, bump: Option<String>, dry_run: bool) -> ReleaseResult<()> {
  let git = SystemGit::open(&ctx.root)?;
  let manager = ReleaseManager::new(ctx, &git);
  let bump = super::resolve_bump(bump.as_deref());

  let outcome = manager.release(bump, dry_run)?;
  print_summary(&outcome.context, &ctx.config.default_branch);

  if !outcome.executed {
    println!("{}", outcome.plan.to_human_readable());
    println!("🔍 Dry-run mode (no changes applied)");
    return Ok(());
  }

  for step in &outcome.plan.steps {
    println!("   ✓ {}", step);
  }
  println!();
  println!("✅ Release {} completed!", outcome.context.next_version);
  println!();
  println!("Next steps:");
  println!("  release-manager push");

  Ok(())
}

fn print_summary(context: &ReleaseContext, branch: &str) {
  println!("📦 Releasing {} → {}", context.current_version, context.next_version);
  println!();
  println!("  repository_url   : {}", context.repository_url);
  println!("  author           : {}", context.author.as_deref().unwrap_or(""));
  println!("  current_branch   : {}", branch);
  println!("  current_date     : {}", context.current_date);
  println!("  release_date     : {}", context.release_timestamp);
  println!("  bump_version     : {}", context.bump_kind);
  println!("  current_version  : {}", context.current_version);
  println!("  next_version     : {}", context.next_version);
  println!();
}
