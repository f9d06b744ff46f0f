//! ANSI coloring for human-readable output
//!
//! Colors are only emitted when stdout is a terminal, so piped output and
//! captured test output stay plain.

use anstyle::{AnsiColor, Color, Style};
use std::io::IsTerminal;

fn styled(text: &str, style: Style) -> String {
  if std::io::stdout().is_terminal() {
    format!("{}{}{}", style.render(), text, style.render_reset())
  } else {
    text.to_string()
  }
}

pub fn green(text: &str) -> String {
  styled(text, Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
}

pub fn red(text: &str) -> String {
  styled(text, Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))))
}

pub fn bold(text: &str) -> String {
  styled(text, Style::new().bold())
}

/// Green when `ok`, red otherwise
pub fn status(text: &str, ok: bool) -> String {
  if ok { green(text) } else { red(text) }
}

/// ✓ or ✗
pub fn check_mark(ok: bool) -> String {
  status(if ok { "✓" } else { "✗" }, ok)
}
