//! Package lifecycle: download, extract, normalize, register, remove.

mod descriptor;

pub use descriptor::{Descriptor, PostInstall};

use std::path::{Path, PathBuf};

use fs_err as fs;
use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::context::Context;
use crate::env::Registration;
use crate::error::Result;
use crate::extract;
use crate::normalize::drill_singleton_dirs;
use crate::store::{ScratchFile, Store};

/// Outcome of a fresh install.
#[derive(Debug, Clone, Serialize)]
pub struct InstallReport {
  pub artifact: PathBuf,
  pub url: String,
  /// Wrapper directories collapsed after extraction.
  pub drilled: usize,
  pub registration: Option<Registration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RemoveReport {
  /// The install directory existed and was deleted.
  pub removed: bool,
  /// The env line or store symlink was removed.
  pub unregistered: bool,
}

/// A descriptor bound to a store location.
#[derive(Debug, Clone)]
pub struct Package {
  descriptor: Descriptor,
  install_path: PathBuf,
  artifact_path: PathBuf,
}

impl Package {
  pub fn new(descriptor: Descriptor, store: &Store) -> Self {
    let install_path = store.install_path(&descriptor.name);
    let artifact_path = install_path.join(&descriptor.artifact);
    Self {
      descriptor,
      install_path,
      artifact_path,
    }
  }

  pub fn descriptor(&self) -> &Descriptor {
    &self.descriptor
  }

  pub fn ident(&self) -> &str {
    &self.descriptor.ident
  }

  pub fn key(&self) -> String {
    self.descriptor.key()
  }

  pub fn name(&self) -> &str {
    &self.descriptor.name
  }

  pub fn version(&self) -> &str {
    &self.descriptor.version
  }

  pub fn add_path(&self) -> Option<&Path> {
    self.descriptor.add_path.as_deref()
  }

  pub fn install_path(&self) -> &Path {
    &self.install_path
  }

  pub fn artifact_path(&self) -> &Path {
    &self.artifact_path
  }

  /// Installed means the artifact exists, nothing more.
  pub fn is_installed(&self) -> bool {
    self.artifact_path.exists()
  }

  /// Install if needed and return the artifact path.
  pub fn ensure_installed(&self, ctx: &Context) -> Result<PathBuf> {
    if self.is_installed() {
      debug!(package = self.ident(), "already installed");
    } else {
      self.install(ctx)?;
    }
    Ok(self.artifact_path.clone())
  }

  /// Run the full pipeline unconditionally.
  pub fn install(&self, ctx: &Context) -> Result<InstallReport> {
    let descriptor = &self.descriptor;
    info!(
      package = self.ident(),
      version = self.version(),
      path = %self.install_path.display(),
      "installing"
    );

    let tmp = ctx.store().ensure_tmp()?;
    let download = ScratchFile::new(tmp.join(descriptor.download_file_name()), descriptor.keep_download);

    info!(url = %descriptor.url, to = %download.path().display(), "downloading");
    ctx.fetcher().fetch(&descriptor.url, download.path())?;

    match &descriptor.extractor {
      Some(strategy) => {
        info!(strategy = strategy.name(), "extracting");
        extract::run_strategy(strategy.as_ref(), download.path(), &self.install_path)?;
      }
      None => ctx.extractors().extract(download.path(), &self.install_path)?,
    }

    let drilled = if descriptor.drill_singleton_dirs {
      drill_singleton_dirs(&self.install_path)?
    } else {
      0
    };

    let registration = self.register_path(ctx)?;

    for hook in &descriptor.post_install {
      hook.run(&self.install_path)?;
    }

    drop(download);

    if !self.is_installed() {
      warn!(
        package = self.ident(),
        artifact = %self.artifact_path.display(),
        "install finished but artifact is missing"
      );
    }

    Ok(InstallReport {
      artifact: self.artifact_path.clone(),
      url: descriptor.url.clone(),
      drilled,
      registration,
    })
  }

  /// (Re)expose the package on `PATH`. `None` when it has no `add_path`.
  pub fn register_path(&self, ctx: &Context) -> Result<Option<Registration>> {
    ctx.registrar().register(self)
  }

  /// Delete the install directory and drop the PATH registration.
  pub fn remove(&self, ctx: &Context) -> Result<RemoveReport> {
    let removed = if self.install_path.exists() {
      fs::remove_dir_all(&self.install_path)?;
      info!(package = self.ident(), path = %self.install_path.display(), "removed");
      true
    } else {
      debug!(package = self.ident(), "nothing to remove");
      false
    };

    let unregistered = if ctx.host().is_posix() {
      ctx.registrar().unregister(self)?
    } else {
      false
    };

    Ok(RemoveReport { removed, unregistered })
  }

  /// Bytes of regular files under the install directory.
  pub fn disk_usage(&self) -> u64 {
    WalkDir::new(&self.install_path)
      .into_iter()
      .filter_map(|entry| entry.ok())
      .filter(|entry| entry.file_type().is_file())
      .filter_map(|entry| entry.metadata().ok())
      .map(|meta| meta.len())
      .sum()
  }
}
