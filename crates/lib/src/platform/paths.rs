use std::path::PathBuf;

use crate::consts::{APP_NAME, PROFILE_ENV, ROOT_ENV};
use crate::platform::HostInfo;

/// Returns the user's home directory
#[cfg(windows)]
pub fn home_dir() -> Option<PathBuf> {
  std::env::var_os("USERPROFILE")
    .or_else(|| std::env::var_os("HOME"))
    .map(PathBuf::from)
}

/// Returns the user's home directory
#[cfg(not(windows))]
pub fn home_dir() -> Option<PathBuf> {
  std::env::var_os("HOME").map(PathBuf::from)
}

/// Default store root for the host, ignoring overrides.
pub fn default_root_dir(host: &HostInfo) -> PathBuf {
  if host.is_posix() {
    host.home().join(".config").join(APP_NAME)
  } else {
    host.home().join("AppData").join("Roaming").join(APP_NAME)
  }
}

/// Store root, honouring `SUBPACK_ROOT`.
pub fn root_dir(host: &HostInfo) -> PathBuf {
  if let Some(path) = std::env::var_os(ROOT_ENV) {
    return PathBuf::from(path);
  }

  default_root_dir(host)
}

/// Shell profile that sources the env file, honouring `SUBPACK_PROFILE`.
pub fn profile_path(host: &HostInfo) -> PathBuf {
  if let Some(path) = std::env::var_os(PROFILE_ENV) {
    return PathBuf::from(path);
  }

  host.home().join(".profile")
}
