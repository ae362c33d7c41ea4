use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::{Directory, FileSystem, PathError, normalize};

/// A reference to one build artifact (a file).
///
/// The parent directory is shared, not owned: it is only consulted to resolve
/// the absolute path. A name that is already absolute resolves without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
  name: String,
  parent: Option<Arc<Directory>>,
}

impl Artifact {
  pub fn new(name: impl Into<String>, parent: Option<Arc<Directory>>) -> Self {
    Self {
      name: name.into(),
      parent,
    }
  }

  /// Artifact named `name.extension`.
  pub fn with_extension(name: &str, extension: &str, parent: Option<Arc<Directory>>) -> Self {
    Self::new(format!("{}.{}", name, extension), parent)
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn parent(&self) -> Option<&Directory> {
    self.parent.as_deref()
  }

  /// File name without its extension.
  pub fn stem(&self) -> Option<&str> {
    Path::new(&self.name).file_stem().and_then(|s| s.to_str())
  }

  pub fn extension(&self) -> Option<&str> {
    Path::new(&self.name).extension().and_then(|s| s.to_str())
  }

  pub fn absolute_path(&self) -> Result<PathBuf, PathError> {
    let name = Path::new(&self.name);
    match &self.parent {
      Some(parent) => Ok(normalize(&parent.absolute_path().join(name))),
      None if name.is_absolute() => Ok(normalize(name)),
      None => Err(PathError::MissingParent {
        name: self.name.clone(),
      }),
    }
  }

  pub fn exists(&self, fs: &impl FileSystem) -> Result<bool, PathError> {
    Ok(fs.exists(&self.absolute_path()?))
  }

  pub fn modified_at(&self, fs: &impl FileSystem) -> Result<SystemTime, PathError> {
    let path = self.absolute_path()?;
    fs.modified_at(&path).map_err(|e| PathError::io(path, e))
  }

  /// Create the file if missing and bump its modification time.
  pub fn touch(&self) -> Result<(), PathError> {
    super::touch(&self.absolute_path()?)
  }
}

impl fmt::Display for Artifact {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.absolute_path() {
      Ok(path) => write!(f, "{}", path.display()),
      Err(_) => write!(f, "{}", self.name),
    }
  }
}
