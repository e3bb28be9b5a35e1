mod info;
mod install;
mod list;
mod pwd;
mod remove;
mod run;
mod update;

pub use info::cmd_info;
pub use install::cmd_install;
pub use list::cmd_list;
pub use pwd::cmd_pwd;
pub use remove::cmd_remove;
pub use run::cmd_run;
pub use update::cmd_update;

use anyhow::{Result, bail};
use subpack_lib::catalog;

use crate::output::print_error;

/// Run `action` for every requested package. A failure is reported and the
/// remaining packages still run; the command fails if any package did.
fn for_each_package<F>(packages: &[String], mut action: F) -> Result<()>
where
  F: FnMut(&str) -> subpack_lib::Result<()>,
{
  let mut failed = 0;
  for spec in packages {
    if let Err(e) = action(spec) {
      print_error(&format!("{}: {} [{}]", spec, e, e.kind()));
      failed += 1;
    }
  }

  if failed > 0 {
    bail!("{} of {} package(s) failed", failed, packages.len());
  }
  Ok(())
}

/// Prompt printed when a verb is given no packages.
fn print_available(verb: &str) {
  let keys: Vec<&str> = catalog::entries().iter().map(|entry| entry.key).collect();
  println!("select package(s) to {}:\n\t{}", verb, keys.join("\n\t"));
}
