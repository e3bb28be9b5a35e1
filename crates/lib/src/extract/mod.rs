//! Archive extraction.
//!
//! Archives are dispatched on their file-name suffix to an extraction
//! strategy. The default table shells out to the host's `tar` and `unzip`;
//! descriptors with unusual distributions (a lone compressed binary) supply
//! their own strategy instead of going through the registry.

pub mod single_file;
pub mod tool;

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use fs_err as fs;
use tracing::info;

use crate::error::{Error, Result};
use crate::platform::HostInfo;

pub use single_file::SingleFileBzip2;
pub use tool::ToolExtractor;

/// A way of unpacking one kind of archive into a directory.
pub trait Extract {
  /// Short name for logs and errors (usually the tool name).
  fn name(&self) -> &str;

  /// Unpack `archive` into `dest`. `dest` already exists.
  fn extract(&self, archive: &Path, dest: &Path) -> Result<()>;
}

/// Suffix-keyed table of extraction strategies.
#[derive(Clone)]
pub struct ExtractorRegistry {
  host: HostInfo,
  strategies: BTreeMap<String, Arc<dyn Extract>>,
}

impl std::fmt::Debug for ExtractorRegistry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ExtractorRegistry")
      .field("host", &self.host)
      .field("suffixes", &self.strategies.keys().collect::<Vec<_>>())
      .finish()
  }
}

/// Lowercase a suffix and make sure it starts with a dot.
fn normalize_suffix(suffix: &str) -> String {
  let lower = suffix.to_lowercase();
  if lower.starts_with('.') { lower } else { format!(".{}", lower) }
}

impl ExtractorRegistry {
  /// A registry with no strategies.
  pub fn empty(host: HostInfo) -> Self {
    Self {
      host,
      strategies: BTreeMap::new(),
    }
  }

  /// The default table: zip via `unzip`, tarballs via `tar`.
  pub fn new(host: HostInfo) -> Self {
    let mut registry = Self::empty(host);
    let tar: Arc<dyn Extract> = Arc::new(ToolExtractor::tar());

    registry.register(".zip", ToolExtractor::unzip());
    for suffix in [".tar.xz", ".tar.gz", ".tgz", ".tar.bz2"] {
      registry.register_shared(suffix, Arc::clone(&tar));
    }
    registry
  }

  /// Register `strategy` for archives ending in `suffix` (case-insensitive).
  pub fn register(&mut self, suffix: &str, strategy: impl Extract + 'static) {
    self.register_shared(suffix, Arc::new(strategy));
  }

  pub fn register_shared(&mut self, suffix: &str, strategy: Arc<dyn Extract>) {
    self.strategies.insert(normalize_suffix(suffix), strategy);
  }

  /// Registered suffixes, sorted.
  pub fn suffixes(&self) -> impl Iterator<Item = &str> {
    self.strategies.keys().map(String::as_str)
  }

  /// Find the strategy for `archive`, returning the matched suffix with it.
  ///
  /// The longest matching suffix wins, so `.tar.gz` beats a `.gz` entry.
  pub fn resolve(&self, archive: &Path) -> Result<(&str, &dyn Extract)> {
    let file_name = archive
      .file_name()
      .unwrap_or(archive.as_os_str())
      .to_string_lossy()
      .to_lowercase();

    self
      .strategies
      .iter()
      .filter(|(suffix, _)| file_name.ends_with(suffix.as_str()))
      .max_by_key(|(suffix, _)| suffix.len())
      .map(|(suffix, strategy)| (suffix.as_str(), strategy.as_ref()))
      .ok_or_else(|| Error::UnsupportedArchiveKind {
        archive: archive
          .file_name()
          .unwrap_or(archive.as_os_str())
          .to_string_lossy()
          .into_owned(),
      })
  }

  /// Extract `archive` into `dest`, creating `dest` first.
  pub fn extract(&self, archive: &Path, dest: &Path) -> Result<()> {
    self.host.require_posix("archive extraction")?;
    let (suffix, strategy) = self.resolve(archive)?;
    info!(archive = %archive.display(), dest = %dest.display(), suffix, tool = strategy.name(), "extracting");
    run_strategy(strategy, archive, dest)
  }
}

/// Create `dest` and hand the archive to `strategy`.
pub fn run_strategy(strategy: &dyn Extract, archive: &Path, dest: &Path) -> Result<()> {
  fs::create_dir_all(dest)?;
  strategy.extract(archive, dest)
}
