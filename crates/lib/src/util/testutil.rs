//! Test utilities for autobus-lib.
//!
//! An in-memory [`FileSystem`] with integer timestamps, plus cross-platform
//! helpers for tests that run real commands.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::path::FileSystem;

/// A filesystem where each file is just a path and a timestamp in seconds.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
  files: Mutex<HashMap<PathBuf, u64>>,
}

impl MemoryFileSystem {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_file(self, path: impl AsRef<Path>, secs: u64) -> Self {
    self.set(path, secs);
    self
  }

  pub fn set(&self, path: impl AsRef<Path>, secs: u64) {
    self.files.lock().unwrap().insert(path.as_ref().to_path_buf(), secs);
  }

  pub fn remove(&self, path: impl AsRef<Path>) {
    self.files.lock().unwrap().remove(path.as_ref());
  }

  pub fn time(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
  }
}

impl FileSystem for MemoryFileSystem {
  fn exists(&self, path: &Path) -> bool {
    self.files.lock().unwrap().contains_key(path)
  }

  fn modified_at(&self, path: &Path) -> io::Result<SystemTime> {
    self
      .files
      .lock()
      .unwrap()
      .get(path)
      .map(|secs| Self::time(*secs))
      .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
  }
}

/// An absolute path string for `name` on the current platform.
#[cfg(unix)]
pub fn abs(name: &str) -> String {
  format!("/{}", name)
}

#[cfg(windows)]
pub fn abs(name: &str) -> String {
  format!("C:\\{}", name)
}

/// Shell snippet that writes `content` into `file`.
#[cfg(unix)]
pub fn write_file_script(file: &Path, content: &str) -> String {
  format!("printf '{}' > '{}'", content, file.display())
}

#[cfg(windows)]
pub fn write_file_script(file: &Path, content: &str) -> String {
  format!("echo {}> \"{}\"", content, file.display())
}

/// Shell snippet that exits with `code`.
pub fn exit_script(code: i32) -> String {
  format!("exit {}", code)
}

/// Shell snippet that sleeps for `secs` seconds.
#[cfg(unix)]
pub fn sleep_script(secs: u64) -> String {
  format!("sleep {}", secs)
}

#[cfg(windows)]
pub fn sleep_script(secs: u64) -> String {
  format!("ping -n {} 127.0.0.1 > NUL", secs + 1)
}
