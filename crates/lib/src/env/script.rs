//! Text of the generated env file and the profile sourcing line.
//!
//! Every PATH line ends with an identity tag naming its owner:
//!
//! ```text
//! export PATH=$PATH:"/home/me/.config/subpack/zig"  # Zig
//! ```

use std::path::{Component, Path, PathBuf};

/// Trailing comment that marks a line as owned by `ident`.
pub fn identity_tag(ident: &str) -> String {
  format!("# {}", ident)
}

/// `export PATH=$PATH:"<dir>"  # <Ident>`
pub fn export_line(dir: &Path, ident: &str) -> String {
  format!("export PATH=$PATH:\"{}\"  {}", dir.display(), identity_tag(ident))
}

/// `. "<env_file>"`, appended to the user's shell profile.
pub fn source_line(env_file: &Path) -> String {
  format!(". \"{}\"", env_file.display())
}

/// Join `suffix` onto `base`, dropping `.` components (`zig/.` is `zig`).
pub fn join_suffix(base: &Path, suffix: &Path) -> PathBuf {
  let mut joined = base.to_path_buf();
  for component in suffix.components() {
    if !matches!(component, Component::CurDir) {
      joined.push(component);
    }
  }
  joined
}

/// Whether `line` carries exactly the identity tag of `ident`.
pub fn is_tagged(line: &str, ident: &str) -> bool {
  let tag = identity_tag(ident);
  let line = line.trim_end();
  match line.strip_suffix(&tag) {
    Some(rest) => rest.is_empty() || rest.ends_with(char::is_whitespace),
    None => false,
  }
}

/// Remove the first line tagged for `ident`, keeping every other line in order.
pub fn remove_tagged(lines: &mut Vec<String>, ident: &str) -> Option<String> {
  let index = lines.iter().position(|line| is_tagged(line, ident))?;
  Some(lines.remove(index))
}

pub fn parse_lines(content: &str) -> Vec<String> {
  content.lines().map(str::to_string).collect()
}

/// Lines joined by `\n` with a trailing newline (empty for no lines).
pub fn render(lines: &[String]) -> String {
  let mut out = lines.join("\n");
  if !out.is_empty() {
    out.push('\n');
  }
  out
}

/// Text to append to a profile so it gains `line`, or `None` when the
/// profile already mentions it.
pub fn profile_addition(profile: &str, line: &str) -> Option<String> {
  if profile.contains(line) {
    return None;
  }

  let separator = if profile.is_empty() || profile.ends_with('\n') {
    ""
  } else {
    "\n"
  };
  Some(format!("{}{}\n", separator, line))
}
