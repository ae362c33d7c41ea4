use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use super::PathError;

/// A directory used to anchor relative artifact and directory paths.
///
/// Relative directories must be given a parent; `~`-prefixed paths expand to the
/// user's home directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
  path: PathBuf,
  parent: Option<Arc<Directory>>,
}

impl Directory {
  pub fn new(path: impl AsRef<Path>, parent: Option<Arc<Directory>>) -> Result<Self, PathError> {
    let path = normalize(&expand_home(path.as_ref())?);
    if !path.is_absolute() && parent.is_none() {
      return Err(PathError::MissingParent {
        name: path.display().to_string(),
      });
    }
    Ok(Self { path, parent })
  }

  /// The process working directory.
  pub fn cwd() -> Result<Self, PathError> {
    let cwd = std::env::current_dir().map_err(|e| PathError::io(".", e))?;
    Ok(Self {
      path: normalize(&cwd),
      parent: None,
    })
  }

  /// The path as given (after `~` expansion), possibly relative to the parent.
  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn parent(&self) -> Option<&Directory> {
    self.parent.as_deref()
  }

  pub fn absolute_path(&self) -> PathBuf {
    match &self.parent {
      Some(parent) if !self.path.is_absolute() => normalize(&parent.absolute_path().join(&self.path)),
      _ => self.path.clone(),
    }
  }

  /// Path of this directory relative to `base`, or to the working directory when `base` is `None`.
  pub fn relative_to(&self, base: Option<&Directory>) -> Result<PathBuf, PathError> {
    let base = match base {
      Some(dir) => dir.absolute_path(),
      None => Directory::cwd()?.absolute_path(),
    };
    Ok(relative_path(&self.absolute_path(), &base))
  }

  /// Absolute paths of the entries below this directory that match `pattern`.
  pub fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>, PathError> {
    let full = self.absolute_path().join(pattern);
    let full = full.to_string_lossy();
    let entries = glob::glob(&full).map_err(|e| PathError::InvalidPattern {
      pattern: pattern.to_string(),
      message: e.msg.to_string(),
    })?;

    Ok(entries.filter_map(Result::ok).collect())
  }

  /// Create the directory and any missing parents.
  pub fn create(&self) -> Result<(), PathError> {
    let path = self.absolute_path();
    std::fs::create_dir_all(&path).map_err(|e| PathError::io(path, e))
  }
}

impl fmt::Display for Directory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.absolute_path().display())
  }
}

/// Fold `.` and `..` components without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => match out.components().next_back() {
        Some(Component::Normal(_)) => {
          out.pop();
        }
        // `..` above the root stays at the root
        Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
        _ => out.push(".."),
      },
      other => out.push(other),
    }
  }
  if out.as_os_str().is_empty() {
    out.push(".");
  }
  out
}

fn expand_home(path: &Path) -> Result<PathBuf, PathError> {
  let Ok(rest) = path.strip_prefix("~") else {
    return Ok(path.to_path_buf());
  };
  Ok(home_dir()?.join(rest))
}

fn home_dir() -> Result<PathBuf, PathError> {
  dirs::home_dir().ok_or(PathError::HomeNotSet)
}

fn relative_path(path: &Path, base: &Path) -> PathBuf {
  let path_components: Vec<Component> = path.components().collect();
  let base_components: Vec<Component> = base.components().collect();
  let common = path_components
    .iter()
    .zip(&base_components)
    .take_while(|(a, b)| a == b)
    .count();

  let mut out = PathBuf::new();
  for _ in common..base_components.len() {
    out.push("..");
  }
  for component in &path_components[common..] {
    out.push(component);
  }
  if out.as_os_str().is_empty() {
    out.push(".");
  }
  out
}
