//! Collapsing of redundant wrapper directories after extraction.
//!
//! Many upstream archives wrap their payload in one or more directories
//! (`node-v22.12.0-linux-x64/bin/node`). Drilling moves the payload up so a
//! package's artifact path does not depend on how the archive was built.

use std::path::{Path, PathBuf};

use fs_err as fs;
use tracing::{debug, info};

use crate::error::Result;

const SCRATCH_PREFIX: &str = ".subpack-drill";

fn list(path: &Path) -> Result<Vec<PathBuf>> {
  let mut entries = Vec::new();
  for entry in fs::read_dir(path)? {
    entries.push(entry?.path());
  }
  Ok(entries)
}

/// A name inside `parent` that none of `dir`'s children use.
fn scratch_name(parent: &Path, dir: &Path) -> PathBuf {
  let mut n = 0usize;
  loop {
    let name = if n == 0 {
      SCRATCH_PREFIX.to_string()
    } else {
      format!("{}-{}", SCRATCH_PREFIX, n)
    };
    if !dir.join(&name).exists() && !parent.join(&name).exists() {
      return parent.join(name);
    }
    n += 1;
  }
}

/// While `path` holds exactly one entry and that entry is a directory, move
/// the directory's contents up into `path` and remove it.
///
/// Returns the number of levels collapsed. An empty directory, one with two
/// or more entries, or one whose only entry is a file is left untouched.
pub fn drill_singleton_dirs(path: &Path) -> Result<usize> {
  let mut levels = 0;

  loop {
    let entries = list(path)?;
    if entries.len() != 1 {
      debug!(path = %path.display(), entries = entries.len(), "drilling done");
      break;
    }

    let singleton = &entries[0];
    if !fs::symlink_metadata(singleton)?.is_dir() {
      debug!(entry = %singleton.display(), "single entry is not a directory, stopping");
      break;
    }

    info!(dir = %singleton.display(), "drilling");

    // Park the wrapper under a scratch name first so a child that shares its
    // name (`a/a/...`) can be moved up without colliding.
    let scratch = scratch_name(path, singleton);
    fs::rename(singleton, &scratch)?;

    for child in list(&scratch)? {
      let Some(name) = child.file_name() else { continue };
      let target = path.join(name);
      debug!(from = %child.display(), to = %target.display(), "mv");
      fs::rename(&child, &target)?;
    }
    fs::remove_dir(&scratch)?;

    levels += 1;
  }

  Ok(levels)
}
