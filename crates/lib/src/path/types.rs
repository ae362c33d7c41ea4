use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving or touching paths.
#[derive(Debug, Error)]
pub enum PathError {
  /// A relative path was resolved without a parent directory to anchor it.
  #[error("cannot resolve absolute path for '{name}': a parent directory is required")]
  MissingParent { name: String },

  /// The home directory could not be determined for a `~` path.
  #[error("cannot expand '~': home directory is not set")]
  HomeNotSet,

  /// A glob pattern could not be parsed.
  #[error("invalid glob pattern '{pattern}': {message}")]
  InvalidPattern { pattern: String, message: String },

  /// I/O error on a specific path.
  #[error("io error on {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

impl PathError {
  pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
    PathError::Io {
      path: path.into(),
      source,
    }
  }
}
