//! Download of package archives.

use std::io::Write;
use std::path::Path;

use fs_err as fs;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Fetches a URL into a local file.
///
/// The lifecycle only depends on this trait, so tests (and mirrors) can
/// substitute their own transport.
pub trait Fetch {
  /// Download `url` and write it byte-for-byte to `dest`.
  fn fetch(&self, url: &str, dest: &Path) -> Result<()>;
}

/// Blocking HTTP(S) fetcher backed by `reqwest`.
#[derive(Debug, Default, Clone)]
pub struct HttpFetcher;

impl HttpFetcher {
  pub fn new() -> Self {
    Self
  }
}

fn download_failed(url: &str, err: impl std::fmt::Display) -> Error {
  Error::DownloadFailed {
    url: url.to_string(),
    message: err.to_string(),
  }
}

impl Fetch for HttpFetcher {
  fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
    info!(url = %url, dest = %dest.display(), "fetching URL");

    let parent = match dest.parent() {
      Some(p) if !p.as_os_str().is_empty() => p,
      _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let client = reqwest::blocking::Client::builder()
      .user_agent(concat!("subpack/", env!("CARGO_PKG_VERSION")))
      .timeout(None)
      .build()
      .map_err(|e| download_failed(url, e))?;

    let mut response = client.get(url).send().map_err(|e| download_failed(url, e))?;

    if !response.status().is_success() {
      return Err(download_failed(url, format!("HTTP {}", response.status())));
    }

    // Stream into a sibling temp file so a partial body never sits at `dest`.
    let mut partial = tempfile::NamedTempFile::new_in(parent)?;
    let size = response
      .copy_to(&mut partial)
      .map_err(|e| download_failed(url, e))?;
    partial.flush()?;
    debug!(path = %partial.path().display(), size, "download written");

    partial.persist(dest).map_err(|e| e.error)?;

    info!(path = %dest.display(), size, "download complete");
    Ok(())
  }
}
