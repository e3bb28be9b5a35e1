use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;
use subpack_lib::Context;

use crate::output::{OutputFormat, print_json, print_stat};

#[derive(Debug, Serialize)]
struct InfoOutput {
  version: &'static str,
  platform: String,
  posix: bool,
  home: PathBuf,
  root: PathBuf,
  env_file: PathBuf,
  profile: PathBuf,
}

pub fn cmd_info(output: OutputFormat) -> Result<()> {
  let ctx = Context::from_env()?;
  let host = ctx.host();

  let info = InfoOutput {
    version: env!("CARGO_PKG_VERSION"),
    platform: host.platform.triple(),
    posix: host.is_posix(),
    home: host.home().to_path_buf(),
    root: ctx.store().root().to_path_buf(),
    env_file: ctx.registrar().env_file(),
    profile: ctx.registrar().profile().to_path_buf(),
  };

  if output.is_json() {
    return print_json(&info);
  }

  println!("subpack v{}", info.version);
  print_stat("Platform", &info.platform);
  print_stat("Home", &info.home.display().to_string());
  print_stat("Store", &info.root.display().to_string());
  print_stat("Env file", &info.env_file.display().to_string());
  print_stat("Profile", &info.profile.display().to_string());
  if !info.posix {
    print_stat("Note", "extraction and PATH registration need a POSIX host");
  }
  Ok(())
}
