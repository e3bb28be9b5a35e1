//! Distributions that ship a single bzip2-compressed executable rather
//! than an archive.

use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use bzip2::read::BzDecoder;
use fs_err as fs;
use tracing::{debug, info};

use super::Extract;
use crate::error::Result;

/// Moves the download into place as `<file_name>.bz2`, decompresses it to
/// `<file_name>` and marks the result executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleFileBzip2 {
  file_name: String,
}

impl SingleFileBzip2 {
  pub fn new(file_name: impl Into<String>) -> Self {
    Self {
      file_name: file_name.into(),
    }
  }
}

impl Extract for SingleFileBzip2 {
  fn name(&self) -> &str {
    "bzip2"
  }

  fn extract(&self, archive: &Path, dest: &Path) -> Result<()> {
    let target = dest.join(&self.file_name);
    let compressed = dest.join(format!("{}.bz2", self.file_name));

    debug!(from = %archive.display(), to = %compressed.display(), "moving download into place");
    fs::rename(archive, &compressed)?;

    {
      let input = fs::File::open(&compressed)?;
      let mut decoder = BzDecoder::new(BufReader::new(input));
      let mut output = BufWriter::new(fs::File::create(&target)?);
      let size = io::copy(&mut decoder, &mut output)
        .map_err(|e| io::Error::new(e.kind(), format!("failed to decompress {}: {}", compressed.display(), e)))?;
      output.flush()?;
      info!(path = %target.display(), size, "decompressed");
    }

    fs::remove_file(&compressed)?;
    make_executable(&target)?;
    Ok(())
  }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
  use std::os::unix::fs::PermissionsExt;

  fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
  Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
  Ok(())
}
