//! Implementation of the `subpack install` command.

use std::time::Instant;

use anyhow::Result;
use subpack_lib::Context;
use subpack_lib::env::script::source_line;

use super::{for_each_package, print_available};
use crate::output::{format_duration, print_info, print_stat, print_success};

/// Install each package that is not installed yet. Packages that already
/// are get their PATH entry refreshed instead.
pub fn cmd_install(packages: &[String]) -> Result<()> {
  if packages.is_empty() {
    print_available("install");
    return Ok(());
  }

  let ctx = Context::from_env()?;
  for_each_package(packages, |spec| install_one(&ctx, spec))
}

fn install_one(ctx: &Context, spec: &str) -> subpack_lib::Result<()> {
  let pkg = ctx.resolve(spec)?;

  if pkg.is_installed() {
    pkg.register_path(ctx)?;
    print_info(&format!("{}: is already installed @ {}", spec, pkg.install_path().display()));
    return Ok(());
  }

  let started = Instant::now();
  let report = pkg.install(ctx)?;

  print_success(&format!(
    "{} {} installed in {}",
    pkg.key(),
    pkg.version(),
    format_duration(started.elapsed())
  ));
  print_stat("Location", &pkg.install_path().display().to_string());
  print_stat("Executable", &report.artifact.display().to_string());

  if let Some(registration) = &report.registration {
    print_stat("PATH", &registration.line);
    if let Some(profile) = &registration.profile_updated {
      print_info(&format!(
        "added '{}' to {}; start a new shell to pick it up",
        source_line(&ctx.registrar().env_file()),
        profile.display()
      ));
    }
  }

  Ok(())
}
