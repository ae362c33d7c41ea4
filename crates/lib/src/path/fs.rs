use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use super::{Artifact, PathError};

/// Filesystem capability consumed by staleness checks.
///
/// Implementations are expected to be cheap and synchronous. Nothing is cached:
/// every call reads the current state.
pub trait FileSystem {
  fn exists(&self, path: &Path) -> bool;

  fn modified_at(&self, path: &Path) -> io::Result<SystemTime>;
}

/// [`FileSystem`] backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
  fn exists(&self, path: &Path) -> bool {
    path.exists()
  }

  fn modified_at(&self, path: &Path) -> io::Result<SystemTime> {
    std::fs::metadata(path)?.modified()
  }
}

/// True when every artifact exists. Vacuously true for an empty list.
pub fn all_exist(artifacts: &[Artifact], fs: &impl FileSystem) -> Result<bool, PathError> {
  for artifact in artifacts {
    if !artifact.exists(fs)? {
      return Ok(false);
    }
  }
  Ok(true)
}

/// Oldest modification time among the artifacts, `None` for an empty list.
pub fn earliest_mtime(artifacts: &[Artifact], fs: &impl FileSystem) -> Result<Option<SystemTime>, PathError> {
  let mut result: Option<SystemTime> = None;
  for artifact in artifacts {
    let mtime = artifact.modified_at(fs)?;
    if result.is_none_or(|current| mtime < current) {
      result = Some(mtime);
    }
  }
  Ok(result)
}

/// Newest modification time among the artifacts, `None` for an empty list.
pub fn latest_mtime(artifacts: &[Artifact], fs: &impl FileSystem) -> Result<Option<SystemTime>, PathError> {
  let mut result: Option<SystemTime> = None;
  for artifact in artifacts {
    let mtime = artifact.modified_at(fs)?;
    if result.is_none_or(|current| mtime > current) {
      result = Some(mtime);
    }
  }
  Ok(result)
}

/// Create the file if missing and set its modification time to now.
pub fn touch(path: &Path) -> Result<(), PathError> {
  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)
    .map_err(|e| PathError::io(path, e))?;
  file
    .set_modified(SystemTime::now())
    .map_err(|e| PathError::io(path, e))
}
