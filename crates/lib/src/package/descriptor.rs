use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use fs_err as fs;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::extract::Extract;

/// Static description of one installable package.
#[derive(Clone)]
pub struct Descriptor {
  /// Identity used for the env-file tag and the store-root symlink.
  pub ident: String,
  pub version: String,
  /// Install directory name under the store root.
  pub name: String,
  /// Primary executable, relative to the install directory.
  pub artifact: PathBuf,
  /// Subdirectory (relative to the install directory) exposed on `PATH`.
  pub add_path: Option<PathBuf>,
  pub drill_singleton_dirs: bool,
  pub url: String,
  /// Archive suffix without the leading dot (`tar.xz`, `zip`, `bz2`).
  pub archive_kind: String,
  pub keep_download: bool,
  /// Replaces registry dispatch when set.
  pub extractor: Option<Arc<dyn Extract>>,
  pub post_install: Vec<PostInstall>,
}

impl Descriptor {
  pub fn new(
    ident: impl Into<String>,
    version: impl Into<String>,
    name: impl Into<String>,
    artifact: impl Into<PathBuf>,
    url: impl Into<String>,
    archive_kind: impl Into<String>,
  ) -> Self {
    Self {
      ident: ident.into(),
      version: version.into(),
      name: name.into(),
      artifact: artifact.into(),
      add_path: None,
      drill_singleton_dirs: false,
      url: url.into(),
      archive_kind: archive_kind.into().trim_start_matches('.').to_string(),
      keep_download: false,
      extractor: None,
      post_install: Vec::new(),
    }
  }

  pub fn with_add_path(mut self, add_path: impl Into<PathBuf>) -> Self {
    self.add_path = Some(add_path.into());
    self
  }

  pub fn with_drilling(mut self) -> Self {
    self.drill_singleton_dirs = true;
    self
  }

  pub fn with_kept_download(mut self) -> Self {
    self.keep_download = true;
    self
  }

  pub fn with_extractor(mut self, extractor: impl Extract + 'static) -> Self {
    self.extractor = Some(Arc::new(extractor));
    self
  }

  pub fn with_post_install(mut self, hook: PostInstall) -> Self {
    self.post_install.push(hook);
    self
  }

  /// Lowercase identity, the catalog key and symlink name.
  pub fn key(&self) -> String {
    self.ident.to_lowercase()
  }

  /// `<name>.<archive_kind>`, the file name used in the scratch area.
  pub fn download_file_name(&self) -> String {
    format!("{}.{}", self.name, self.archive_kind)
  }
}

impl fmt::Debug for Descriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Descriptor")
      .field("ident", &self.ident)
      .field("version", &self.version)
      .field("name", &self.name)
      .field("artifact", &self.artifact)
      .field("add_path", &self.add_path)
      .field("drill_singleton_dirs", &self.drill_singleton_dirs)
      .field("url", &self.url)
      .field("archive_kind", &self.archive_kind)
      .field("keep_download", &self.keep_download)
      .field("extractor", &self.extractor.as_ref().map(|e| e.name().to_string()))
      .field("post_install", &self.post_install)
      .finish()
  }
}

/// Vendor install scripts are written for bash, not POSIX sh.
const SCRIPT_SHELL: &str = "bash";

/// Extra steps some packages need once their files are in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostInstall {
  /// Create `link -> target`. `link` is relative to the install directory,
  /// `target` is stored as given and so resolves from the link's directory.
  Symlink { link: PathBuf, target: PathBuf },
  /// Run `bash <path>` with the install directory as working directory.
  Script { path: PathBuf },
}

impl PostInstall {
  pub fn run(&self, install_path: &Path) -> Result<()> {
    match self {
      PostInstall::Symlink { link, target } => {
        let link = install_path.join(link);
        if fs::symlink_metadata(&link).is_ok() {
          fs::remove_file(&link)?;
        }
        symlink(target, &link)?;
        info!(link = %link.display(), target = %target.display(), "post-install link");
        Ok(())
      }
      PostInstall::Script { path } => {
        let script = install_path.join(path);
        info!(script = %script.display(), "running post-install script");
        let status = Command::new(SCRIPT_SHELL)
          .arg(&script)
          .current_dir(install_path)
          .status()
          .map_err(|e| std::io::Error::new(e.kind(), format!("failed to run {}: {}", SCRIPT_SHELL, e)))?;
        debug!(status = %status, "post-install script finished");
        if !status.success() {
          return Err(Error::ExtractionFailed {
            archive: script,
            tool: SCRIPT_SHELL.to_string(),
            code: status.code(),
          });
        }
        Ok(())
      }
    }
  }
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> Result<()> {
  std::os::unix::fs::symlink(target, link)
    .map_err(|e| std::io::Error::new(e.kind(), format!("failed to link {}: {}", link.display(), e)))?;
  Ok(())
}

#[cfg(not(unix))]
fn symlink(_target: &Path, link: &Path) -> Result<()> {
  Err(Error::Io(std::io::Error::new(
    std::io::ErrorKind::Unsupported,
    format!("cannot create {}: symlinks are only created on unix hosts", link.display()),
  )))
}
