use anyhow::Result;
use subpack_lib::Context;

/// Print the install directory, whether or not the package is installed.
pub fn cmd_pwd(package: &str) -> Result<()> {
  let ctx = Context::from_env()?;
  let pkg = ctx.resolve(package)?;
  println!("{}", pkg.install_path().display());
  Ok(())
}
