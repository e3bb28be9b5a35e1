//! Implementation of the `subpack list` command.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;
use subpack_lib::{Context, catalog};

use crate::output::{OutputFormat, package_line, print_json};

#[derive(Debug, Serialize)]
struct PackageRow {
  name: &'static str,
  ident: &'static str,
  version: String,
  versioned: bool,
  installed: bool,
  path: PathBuf,
  size_bytes: Option<u64>,
  summary: &'static str,
}

pub fn cmd_list(output: OutputFormat) -> Result<()> {
  let ctx = Context::from_env()?;
  let platform = ctx.host().platform;

  let mut rows = Vec::new();
  for entry in catalog::entries() {
    let pkg = ctx.package(entry.descriptor(&platform, None)?);
    let installed = pkg.is_installed();
    rows.push(PackageRow {
      name: entry.key,
      ident: entry.ident,
      version: pkg.version().to_string(),
      versioned: entry.versioned,
      installed,
      path: pkg.install_path().to_path_buf(),
      size_bytes: installed.then(|| pkg.disk_usage()),
      summary: entry.summary,
    });
  }

  if output.is_json() {
    return print_json(&rows);
  }

  for row in &rows {
    println!(
      "{}",
      package_line(row.installed, row.name, &row.version, row.size_bytes, row.summary)
    );
  }

  Ok(())
}
