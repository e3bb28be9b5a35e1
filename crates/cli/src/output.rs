//! Terminal output for subpack.
//!
//! Status lines carry a one-character marker colored with `owo-colors`.
//! Colors are only emitted when the stream supports them, so piped output
//! stays plain. Progress and results go to stdout, problems to stderr.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

/// Kind of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
  Done,
  Failed,
  Warning,
  Note,
}

impl Status {
  pub fn marker(self) -> &'static str {
    match self {
      Status::Done => "✓",
      Status::Failed => "✗",
      Status::Warning => "!",
      Status::Note => "•",
    }
  }

  fn stream(self) -> Stream {
    match self {
      Status::Done | Status::Note => Stream::Stdout,
      Status::Failed | Status::Warning => Stream::Stderr,
    }
  }

  /// Marker followed by `message`; failures and warnings tint the message too.
  pub fn line(self, message: &str) -> String {
    let stream = self.stream();
    let marker = self.marker();
    match self {
      Status::Done => format!("{} {}", marker.if_supports_color(stream, |m| m.green()), message),
      Status::Note => format!("{} {}", marker.if_supports_color(stream, |m| m.blue()), message),
      Status::Failed => format!(
        "{} {}",
        marker.if_supports_color(stream, |m| m.red()),
        message.if_supports_color(stream, |m| m.red())
      ),
      Status::Warning => format!(
        "{} {}",
        marker.if_supports_color(stream, |m| m.yellow()),
        message.if_supports_color(stream, |m| m.yellow())
      ),
    }
  }

  pub fn print(self, message: &str) {
    match self.stream() {
      Stream::Stdout => println!("{}", self.line(message)),
      _ => eprintln!("{}", self.line(message)),
    }
  }
}

pub fn print_success(message: &str) {
  Status::Done.print(message);
}

pub fn print_error(message: &str) {
  Status::Failed.print(message);
}

pub fn print_warning(message: &str) {
  Status::Warning.print(message);
}

pub fn print_info(message: &str) {
  Status::Note.print(message);
}

/// Indented `label: value` detail under a status line.
pub fn print_stat(label: &str, value: &str) {
  let label = format!("{label}:");
  println!("    {:<12}{}", label.if_supports_color(Stream::Stdout, |l| l.dimmed()), value);
}

/// One catalog row: marker, key, version, size (installed only), summary.
pub fn package_line(installed: bool, key: &str, version: &str, size: Option<u64>, summary: &str) -> String {
  let marker = if installed {
    Status::Done.marker().if_supports_color(Stream::Stdout, |m| m.green()).to_string()
  } else {
    " ".to_string()
  };
  let size = size.map(format_bytes).unwrap_or_default();
  format!("{marker} {key:<12} {version:<10} {size:>9}  {summary}")
}

/// Sizes in binary units with one decimal, e.g. `187.0 MiB`.
pub fn format_bytes(bytes: u64) -> String {
  const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];

  if bytes < 1024 {
    return format!("{bytes} B");
  }
  let mut value = bytes as f64 / 1024.0;
  let mut unit = UNITS[0];
  for &next in &UNITS[1..] {
    if value < 1024.0 {
      break;
    }
    value /= 1024.0;
    unit = next;
  }
  format!("{value:.1} {unit}")
}

/// Install times: milliseconds under a second, then seconds, then minutes.
pub fn format_duration(duration: Duration) -> String {
  match duration.as_secs() {
    0 => format!("{}ms", duration.as_millis()),
    secs @ 1..60 => match duration.subsec_millis() / 100 {
      0 => format!("{secs}s"),
      tenths => format!("{secs}.{tenths}s"),
    },
    secs => format!("{}m{:02}s", secs / 60, secs % 60),
  }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("serializing output as JSON")?;
  println!("{json}");
  Ok(())
}
