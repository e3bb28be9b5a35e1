//! PATH registration through the generated env file.
//!
//! The env file lives at `<store>/env` and is sourced by the user's shell
//! profile. Each package with an `add_path` owns at most one line in it,
//! identified by its trailing `# <Ident>` tag. The line points through a
//! store-root symlink (`<store>/<ident>`) so reinstalling a different
//! version only has to move the symlink.

pub mod script;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs_err as fs;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::package::Package;
use crate::platform::HostInfo;
use crate::store::Store;

/// What a successful registration did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
  /// Store-root symlink pointing at the install directory.
  pub symlink: PathBuf,
  /// The line now present in the env file.
  pub line: String,
  /// Set when the shell profile was modified to source the env file.
  pub profile_updated: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct PathRegistrar {
  host: HostInfo,
  store: Store,
  profile: PathBuf,
}

impl PathRegistrar {
  pub fn new(host: HostInfo, store: Store, profile: impl Into<PathBuf>) -> Self {
    Self {
      host,
      store,
      profile: profile.into(),
    }
  }

  pub fn env_file(&self) -> PathBuf {
    self.store.env_file()
  }

  pub fn profile(&self) -> &Path {
    &self.profile
  }

  /// Create the env file if it does not exist yet. On first creation make
  /// sure the profile sources it; returns the profile path if it was changed.
  pub fn init_env(&self) -> Result<Option<PathBuf>> {
    self.host.require_posix("PATH registration")?;
    self.store.ensure_root()?;

    let env_file = self.env_file();
    if env_file.exists() {
      return Ok(None);
    }

    fs::write(&env_file, "")?;
    info!(path = %env_file.display(), "created env file");

    if self.ensure_profile_sources()? {
      Ok(Some(self.profile.clone()))
    } else {
      Ok(None)
    }
  }

  /// Append the sourcing line to the profile unless it is already there.
  /// Returns whether the profile was modified.
  pub fn ensure_profile_sources(&self) -> Result<bool> {
    let line = script::source_line(&self.env_file());

    let current = match fs::read_to_string(&self.profile) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
      Err(e) => return Err(e.into()),
    };

    let Some(addition) = script::profile_addition(&current, &line) else {
      debug!(profile = %self.profile.display(), "profile already sources env file");
      return Ok(false);
    };

    if let Some(parent) = self.profile.parent() {
      if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)?;
      }
    }

    let mut file = fs::OpenOptions::new()
      .create(true)
      .append(true)
      .open(&self.profile)?;
    file.write_all(addition.as_bytes())?;

    info!(profile = %self.profile.display(), line = %line, "profile updated");
    Ok(true)
  }

  /// Read the env file as lines. A missing file reads as empty.
  pub fn read_lines(&self) -> Result<Vec<String>> {
    match fs::read_to_string(self.env_file()) {
      Ok(content) => Ok(script::parse_lines(&content)),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
      Err(e) => Err(e.into()),
    }
  }

  /// The env-file line currently registered for `ident`, if any.
  pub fn registered_line(&self, ident: &str) -> Result<Option<String>> {
    Ok(
      self
        .read_lines()?
        .into_iter()
        .find(|line| script::is_tagged(line, ident)),
    )
  }

  /// Atomic rewrite. A symlinked env file is rewritten at its target and
  /// the existing permissions carry over to the new file.
  fn write_lines(&self, lines: &[String]) -> Result<()> {
    let env_file = self.env_file();
    let dest = match dunce::canonicalize(&env_file) {
      Ok(path) => path,
      Err(e) if e.kind() == io::ErrorKind::NotFound => env_file,
      Err(e) => return Err(e.into()),
    };
    let dir = dest.parent().unwrap_or(self.store.root());

    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    staged.write_all(script::render(lines).as_bytes())?;
    staged.flush()?;
    match std::fs::metadata(&dest) {
      Ok(meta) => staged.as_file().set_permissions(meta.permissions())?,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {}
      Err(e) => return Err(e.into()),
    }
    staged.persist(&dest).map_err(|e| e.error)?;
    debug!(path = %dest.display(), lines = lines.len(), "wrote env file");
    Ok(())
  }

  /// Expose `pkg`'s `add_path` on `PATH`. A no-op returning `None` when the
  /// package has no `add_path`. Safe to repeat: the package's previous line
  /// is replaced rather than duplicated.
  pub fn register(&self, pkg: &Package) -> Result<Option<Registration>> {
    let Some(add_path) = pkg.add_path() else {
      return Ok(None);
    };
    self.host.require_posix("PATH registration")?;

    let profile_updated = self.init_env()?;
    let mut lines = self.read_lines()?;

    if let Some(old) = script::remove_tagged(&mut lines, pkg.ident()) {
      debug!(line = %old, "replacing previous env line");
    }

    let symlink = self.store.link_path(pkg.ident());
    let target = dunce::canonicalize(pkg.install_path())?;
    replace_symlink(&target, &symlink)?;

    let dir = script::join_suffix(&std::path::absolute(&symlink)?, add_path);
    let line = script::export_line(&dir, pkg.ident());
    lines.push(line.clone());

    self.write_lines(&lines)?;
    info!(package = pkg.ident(), path = %dir.display(), "registered PATH entry");

    Ok(Some(Registration {
      symlink,
      line,
      profile_updated,
    }))
  }

  /// Inverse of `register`: drop the package's env line and its store
  /// symlink. Returns whether anything was removed. A registration whose
  /// symlink points at a different install (another version of the same
  /// package) is left in place.
  pub fn unregister(&self, pkg: &Package) -> Result<bool> {
    self.host.require_posix("PATH registration")?;

    let symlink = self.store.link_path(pkg.ident());
    let owned_link = match link_owner(&symlink, pkg.install_path())? {
      LinkOwner::Missing => false,
      LinkOwner::Package => true,
      LinkOwner::Other(target) => {
        debug!(
          package = pkg.ident(),
          target = %target.display(),
          "PATH entry belongs to another install, keeping it"
        );
        return Ok(false);
      }
    };

    let mut removed = false;

    let mut lines = self.read_lines()?;
    if let Some(old) = script::remove_tagged(&mut lines, pkg.ident()) {
      debug!(line = %old, "removing env line");
      self.write_lines(&lines)?;
      removed = true;
    }

    if owned_link && remove_symlink(&symlink)? {
      debug!(path = %symlink.display(), "removed symlink");
      removed = true;
    }

    if removed {
      info!(package = pkg.ident(), "unregistered PATH entry");
    }
    Ok(removed)
  }
}

/// Who a store-root symlink currently points at.
#[derive(Debug, PartialEq, Eq)]
enum LinkOwner {
  Missing,
  Package,
  Other(PathBuf),
}

fn link_owner(link: &Path, install_path: &Path) -> Result<LinkOwner> {
  let target = match std::fs::read_link(link) {
    Ok(target) => target,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LinkOwner::Missing),
    // Not a symlink: nothing of ours to remove.
    Err(e) if e.kind() == io::ErrorKind::InvalidInput => return Ok(LinkOwner::Missing),
    Err(e) => return Err(e.into()),
  };

  // The install directory may already be gone, so canonicalize its parent.
  let expected = match dunce::canonicalize(install_path) {
    Ok(path) => path,
    Err(_) => match (install_path.parent(), install_path.file_name()) {
      (Some(parent), Some(name)) => dunce::canonicalize(parent)
        .map(|parent| parent.join(name))
        .unwrap_or_else(|_| install_path.to_path_buf()),
      _ => install_path.to_path_buf(),
    },
  };

  if target == expected || target == install_path {
    Ok(LinkOwner::Package)
  } else {
    Ok(LinkOwner::Other(target))
  }
}

/// Remove `link` if it is a symlink. Missing is fine; anything else that is
/// not a symlink is left alone.
fn remove_symlink(link: &Path) -> Result<bool> {
  match std::fs::symlink_metadata(link) {
    Ok(meta) if meta.file_type().is_symlink() => {
      fs::remove_file(link)?;
      Ok(true)
    }
    Ok(_) => Ok(false),
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
    Err(e) => Err(e.into()),
  }
}

#[cfg(unix)]
fn replace_symlink(target: &Path, link: &Path) -> Result<()> {
  remove_symlink(link)?;
  std::os::unix::fs::symlink(target, link).map_err(|e| {
    io::Error::new(
      e.kind(),
      format!("failed to link {} -> {}: {}", link.display(), target.display(), e),
    )
  })?;
  debug!(link = %link.display(), target = %target.display(), "linked");
  Ok(())
}

#[cfg(not(unix))]
fn replace_symlink(_target: &Path, _link: &Path) -> Result<()> {
  Err(crate::error::Error::Io(io::Error::new(
    io::ErrorKind::Unsupported,
    "symlinks are only created on unix hosts",
  )))
}
