mod commands;
mod core;
mod release;
mod ui;

use clap::{Parser, Subcommand};
use core::error::{ReleaseError, print_error};
use tracing_subscriber::EnvFilter;

/// Cut, roll back and push versioned releases of a git repository
#[derive(Parser)]
#[command(name = "release-manager")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Release the next version (changelogs, version file, commit, tag)
  Release {
    /// Version component to bump: major, minor or patch (anything else is patch)
    #[arg(long)]
    bump: Option<String>,
    /// Show the release plan without changing anything
    #[arg(long)]
    dry_run: bool,
  },

  /// Undo the last release commit and delete its tag
  Rollback {
    /// Roll back even if HEAD is not the release commit of the current version
    #[arg(long)]
    force: bool,
  },

  /// Push the release branch and all tags to the configured remote
  Push,

  /// Show release readiness and the versions a release would use
  Info {
    /// Version component to bump: major, minor or patch (anything else is patch)
    #[arg(long)]
    bump: Option<String>,
    /// Output the report in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn init_tracing() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_tracing();

  let project_root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => handle_error(ReleaseError::from(e).context("Failed to get current directory")),
  };

  // Configuration is loaded once here and passed down
  let ctx = match core::context::ProjectContext::build(&project_root) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Commands::Release { bump, dry_run } => commands::run_release(&ctx, bump, dry_run),
    Commands::Rollback { force } => commands::run_rollback(&ctx, force),
    Commands::Push => commands::run_push(&ctx),
    Commands::Info { bump, json } => commands::run_info(&ctx, bump, json),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ReleaseError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
