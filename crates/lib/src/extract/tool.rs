//! Extraction by shelling out to a host tool (`tar`, `unzip`, ...).

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use super::Extract;
use crate::error::{Error, Result};

const SRC: &str = "{src}";
const DST: &str = "{dst}";

/// Runs `<program> <args...>` where `{src}` and `{dst}` arguments are
/// replaced with the archive and destination paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolExtractor {
  program: String,
  args: Vec<String>,
}

impl ToolExtractor {
  pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
    Self {
      program: program.into(),
      args: args.iter().map(|a| a.to_string()).collect(),
    }
  }

  /// `tar -xf {src} -C {dst}`; tar detects the compression itself.
  pub fn tar() -> Self {
    Self::new("tar", &["-xf", SRC, "-C", DST])
  }

  /// `unzip -o -q {src} -d {dst}`; `-o` keeps a retried install from prompting.
  pub fn unzip() -> Self {
    Self::new("unzip", &["-o", "-q", SRC, "-d", DST])
  }

  /// Expand the argument template for a concrete archive and destination.
  pub fn args_for(&self, archive: &Path, dest: &Path) -> Vec<OsString> {
    self
      .args
      .iter()
      .map(|arg| match arg.as_str() {
        SRC => archive.as_os_str().to_owned(),
        DST => dest.as_os_str().to_owned(),
        other => OsString::from(other),
      })
      .collect()
  }

  pub fn command(&self, archive: &Path, dest: &Path) -> Command {
    let mut command = Command::new(&self.program);
    command.args(self.args_for(archive, dest));
    command
  }
}

impl Extract for ToolExtractor {
  fn name(&self) -> &str {
    &self.program
  }

  fn extract(&self, archive: &Path, dest: &Path) -> Result<()> {
    let mut command = self.command(archive, dest);
    debug!(program = %self.program, args = ?self.args_for(archive, dest), "spawning extractor");

    let output = command
      .output()
      .map_err(|e| io::Error::new(e.kind(), format!("failed to run {}: {}", self.program, e)))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stdout.trim().is_empty() {
      debug!(stdout = %stdout.trim(), "extractor stdout");
    }
    if !stderr.trim().is_empty() {
      debug!(stderr = %stderr.trim(), "extractor stderr");
    }

    if !output.status.success() {
      return Err(Error::ExtractionFailed {
        archive: archive.to_path_buf(),
        tool: self.program.clone(),
        code: output.status.code(),
      });
    }

    Ok(())
  }
}
