//! Shared test helpers for CLI integration tests.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated test environment: a temp directory holding `autobus.toml`.
pub struct TestEnv {
  pub temp: TempDir,
  pub build_file: PathBuf,
}

impl TestEnv {
  /// Create with the given build file content.
  pub fn new(content: &str) -> Self {
    let temp = TempDir::new().unwrap();
    let build_file = temp.path().join("autobus.toml");
    std::fs::write(&build_file, content).unwrap();
    Self { temp, build_file }
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.path(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Write a file and backdate it by an hour, so anything built afterwards
  /// is strictly newer regardless of timestamp granularity.
  pub fn write_old_file(&self, relative_path: &str, content: &str) {
    self.write_file(relative_path, content);
    set_mtime(&self.path(relative_path), SystemTime::now() - Duration::from_secs(3600));
  }

  pub fn path(&self, relative_path: &str) -> PathBuf {
    self.temp.path().join(relative_path)
  }

  /// Command for the autobus binary, running inside the temp directory.
  pub fn autobus_cmd(&self) -> Command {
    let mut cmd = cargo_bin_cmd!("autobus");
    cmd.current_dir(self.temp.path());
    cmd
  }
}

pub fn set_mtime(path: &Path, time: SystemTime) {
  File::options().write(true).open(path).unwrap().set_modified(time).unwrap();
}
