//! Error types for subpack-lib.

use std::path::PathBuf;

use thiserror::Error;

use crate::platform::os::Os;

/// Errors that can occur while installing, registering or removing a package.
#[derive(Debug, Error)]
pub enum Error {
  /// The operation has no implementation for the current host.
  #[error("{operation} is not supported on {os}")]
  UnsupportedPlatform { operation: &'static str, os: Os },

  /// The host OS or CPU architecture is not one subpack knows about.
  #[error("unsupported host: {os}/{arch}")]
  UnsupportedHost { os: String, arch: String },

  /// No extraction strategy is registered for the archive's suffix.
  #[error("unsupported archive type: {archive}")]
  UnsupportedArchiveKind { archive: String },

  /// Network or transport failure while downloading.
  #[error("download failed for {url}: {message}")]
  DownloadFailed { url: String, message: String },

  /// The extraction tool exited unsuccessfully.
  #[error("{tool} {} while extracting {}", describe_exit(code), archive.display())]
  ExtractionFailed {
    archive: PathBuf,
    tool: String,
    code: Option<i32>,
  },

  /// Filesystem failure. Messages name the offending path.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("could not determine the home directory (HOME is not set)")]
  NoHomeDirectory,

  #[error("unknown package: {name}")]
  UnknownPackage { name: String },

  /// A version was requested for a package that only ships one.
  #[error("{package} has a fixed version and cannot be installed at {requested}")]
  FixedVersion { package: String, requested: String },
}

fn describe_exit(code: &Option<i32>) -> String {
  match code {
    Some(code) => format!("exited with code {code}"),
    None => "was terminated by a signal".to_string(),
  }
}

/// Result type for subpack-lib operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
  /// Short, stable name of the error kind, used in CLI reports.
  pub fn kind(&self) -> &'static str {
    match self {
      Error::UnsupportedPlatform { .. } | Error::UnsupportedHost { .. } => "UnsupportedPlatform",
      Error::UnsupportedArchiveKind { .. } => "UnsupportedArchiveKind",
      Error::DownloadFailed { .. } => "DownloadFailed",
      Error::ExtractionFailed { .. } => "ExtractionFailed",
      Error::Io(_) | Error::NoHomeDirectory => "IOFailure",
      Error::UnknownPackage { .. } | Error::FixedVersion { .. } => "UnknownPackage",
    }
  }
}
