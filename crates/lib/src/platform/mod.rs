pub mod arch;
pub mod os;
pub mod paths;

use arch::Arch;
use os::Os;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Platform identifier combining architecture and OS (e.g., "x86_64-linux")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Platform {
  pub arch: Arch,
  pub os: Os,
}

impl Platform {
  /// Create a new platform identifier
  pub fn new(arch: Arch, os: Os) -> Self {
    Self { arch, os }
  }

  /// Detect the current platform at runtime
  ///
  /// Returns `None` if the OS or architecture is not supported
  pub fn current() -> Option<Self> {
    Some(Self {
      arch: Arch::current()?,
      os: Os::current()?,
    })
  }

  /// Returns the platform triple string (e.g., "x86_64-linux")
  pub fn triple(&self) -> String {
    format!("{}-{}", self.arch, self.os)
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.triple())
  }
}

/// Facts about the host, resolved once at startup and handed to every
/// component that behaves differently per platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostInfo {
  pub platform: Platform,
  pub home: PathBuf,
}

impl HostInfo {
  pub fn new(platform: Platform, home: impl Into<PathBuf>) -> Self {
    Self {
      platform,
      home: home.into(),
    }
  }

  /// Detect the running host.
  pub fn detect() -> Result<Self> {
    let platform = Platform::current().ok_or_else(|| Error::UnsupportedHost {
      os: std::env::consts::OS.to_string(),
      arch: std::env::consts::ARCH.to_string(),
    })?;
    let home = paths::home_dir().ok_or(Error::NoHomeDirectory)?;
    Ok(Self::new(platform, home))
  }

  pub fn os(&self) -> Os {
    self.platform.os
  }

  pub fn arch(&self) -> Arch {
    self.platform.arch
  }

  pub fn is_posix(&self) -> bool {
    self.platform.os.is_posix()
  }

  pub fn exe_suffix(&self) -> &'static str {
    self.platform.os.exe_suffix()
  }

  pub fn home(&self) -> &Path {
    &self.home
  }

  /// Fail with `UnsupportedPlatform` unless this is a POSIX host.
  pub fn require_posix(&self, operation: &'static str) -> Result<()> {
    if self.is_posix() {
      Ok(())
    } else {
      Err(Error::UnsupportedPlatform {
        operation,
        os: self.os(),
      })
    }
  }
}
