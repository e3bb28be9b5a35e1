//! Implementation of the `subpack run` command.

use std::process::{Command, ExitCode};

use anyhow::{Context as _, Result};
use subpack_lib::Context;
use tracing::info;

/// Install `package` if needed, then run its executable with `args` and
/// exit with the child's status.
pub fn cmd_run(package: &str, args: &[String]) -> Result<ExitCode> {
  let ctx = Context::from_env()?;
  let pkg = ctx.resolve(package)?;
  let artifact = pkg.ensure_installed(&ctx)?;

  info!(artifact = %artifact.display(), args = ?args, "running");
  let status = Command::new(&artifact)
    .args(args)
    .status()
    .with_context(|| format!("Failed to run {}", artifact.display()))?;

  Ok(match status.code() {
    Some(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
    None => ExitCode::FAILURE,
  })
}
