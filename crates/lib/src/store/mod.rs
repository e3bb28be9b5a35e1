//! The per-user package store.
//!
//! # Layout
//!
//! ```text
//! <root>/
//! ├── env                 # Generated shell snippet sourced by the profile
//! ├── tmp/                # Scratch area for in-flight downloads
//! ├── <name>/             # One install directory per package
//! └── <ident>  ->  <name> # Symlink exposed on PATH via the env file
//! ```

use std::path::{Path, PathBuf};

use fs_err as fs;
use tracing::{debug, warn};

use crate::consts::{ENV_FILE_NAME, TMP_DIR_NAME};
use crate::error::Result;
use crate::platform::HostInfo;
use crate::platform::paths::root_dir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
  root: PathBuf,
}

impl Store {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// Store for the given host, honouring `SUBPACK_ROOT`.
  pub fn for_host(host: &HostInfo) -> Self {
    Self::new(root_dir(host))
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn tmp_dir(&self) -> PathBuf {
    self.root.join(TMP_DIR_NAME)
  }

  pub fn env_file(&self) -> PathBuf {
    self.root.join(ENV_FILE_NAME)
  }

  /// Install directory for a package named `name`.
  pub fn install_path(&self, name: &str) -> PathBuf {
    self.root.join(name)
  }

  /// Store-root symlink for a package identity (`Zig` -> `<root>/zig`).
  pub fn link_path(&self, ident: &str) -> PathBuf {
    self.root.join(ident.to_lowercase())
  }

  /// Create the store root (and parents). Idempotent.
  pub fn ensure_root(&self) -> Result<&Path> {
    fs::create_dir_all(&self.root)?;
    Ok(&self.root)
  }

  /// Create the scratch directory lazily and return it.
  pub fn ensure_tmp(&self) -> Result<PathBuf> {
    let tmp = self.tmp_dir();
    fs::create_dir_all(&tmp)?;
    Ok(tmp)
  }
}

/// A download in the scratch area, removed when dropped unless kept.
///
/// Removal happens on every exit path, so a failed extraction does not leave
/// the archive behind. A file that was already moved away is not an error.
#[derive(Debug)]
pub struct ScratchFile {
  path: PathBuf,
  keep: bool,
}

impl ScratchFile {
  pub fn new(path: impl Into<PathBuf>, keep: bool) -> Self {
    Self {
      path: path.into(),
      keep,
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl Drop for ScratchFile {
  fn drop(&mut self) {
    if self.keep {
      debug!(path = %self.path.display(), "keeping download");
      return;
    }
    match std::fs::remove_file(&self.path) {
      Ok(()) => debug!(path = %self.path.display(), "removed download"),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
      Err(e) => warn!(path = %self.path.display(), error = %e, "failed to remove download"),
    }
  }
}
