//! `info` command

use crate::core::context::ProjectContext;
use crate::core::error::ReleaseResult;
use crate::core::vcs::SystemGit;
use crate::release::{InfoReport, ReleaseManager};
use crate::ui::paint;

/// Run the info command
pub fn run_info(ctx: &ProjectContext, bump: Option<String>, json: bool) -> ReleaseResult<()> {
  let git = SystemGit::open(&ctx.root)?;
  let bump = super::resolve_bump(bump.as_deref());
  let report = ReleaseManager::new(ctx, &git).info(bump)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    print_report(&report)?;
  }

  Ok(())
}

fn print_report(report: &InfoReport) -> ReleaseResult<()> {
  println!("OK for release   : {}", paint::check_mark(report.ready));
  println!("repository_url   : {}", report.repository_url);
  println!("author           : {}", report.author.as_deref().unwrap_or(""));
  println!(
    "current_branch   : {}",
    paint::status(&report.current_branch, report.valid_branch)
  );
  println!("current_date     : {}", paint::bold(&report.current_date));
  println!("release_date     : {}", paint::bold(&report.release_date));
  println!("bump_version     : {}", paint::bold(&report.bump_version.to_string()));
  println!("current_version  : {}", paint::bold(&report.current_version));
  println!("next_version     : {}", paint::bold(&report.next_version));
  println!();

  for (label, entries) in [
    ("uncommited_files", &report.uncommitted_files),
    ("staged_files", &report.staged_files),
    ("unpushed_commits", &report.unpushed_commits),
  ] {
    println!("{} :", label);
    println!("{}", render_list(entries)?);
  }

  Ok(())
}

/// YAML list, green when empty and red otherwise
fn render_list(entries: &[String]) -> ReleaseResult<String> {
  let yaml = serde_yaml::to_string(entries)?;
  Ok(paint::status(yaml.trim_end(), entries.is_empty()))
}
