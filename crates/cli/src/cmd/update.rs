//! Implementation of the `subpack update` command.
//!
//! Update is remove followed by a fresh install, so a corrupted or partial
//! install is replaced as well.

use anyhow::Result;
use subpack_lib::Context;

use super::{for_each_package, print_available};
use crate::output::{print_info, print_stat, print_success};

pub fn cmd_update(packages: &[String]) -> Result<()> {
  if packages.is_empty() {
    print_available("update");
    return Ok(());
  }

  let ctx = Context::from_env()?;
  for_each_package(packages, |spec| {
    let pkg = ctx.resolve(spec)?;

    if pkg.install_path().exists() {
      print_info(&format!("removing {} before reinstall", spec));
      pkg.remove(&ctx)?;
    }

    let report = pkg.install(&ctx)?;
    print_success(&format!("{} {} updated", pkg.key(), pkg.version()));
    print_stat("Executable", &report.artifact.display().to_string());
    Ok(())
  })
}
