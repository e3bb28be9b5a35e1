//! Implementation of the `subpack remove` command.

use anyhow::Result;
use subpack_lib::Context;

use super::{for_each_package, print_available};
use crate::output::{print_info, print_success, print_warning};

pub fn cmd_remove(packages: &[String]) -> Result<()> {
  if packages.is_empty() {
    print_available("remove");
    return Ok(());
  }

  let ctx = Context::from_env()?;
  for_each_package(packages, |spec| {
    let pkg = ctx.resolve(spec)?;
    print_info(&format!("removing {}", spec));

    let report = pkg.remove(&ctx)?;
    if report.removed || report.unregistered {
      print_success(&format!("{}: removed", spec));
    } else {
      print_warning(&format!("{}: was not installed", spec));
    }
    Ok(())
  })
}
