//! Types for action execution.
//!
//! This module defines the error type and configuration shared by the action
//! runner and the stage executor.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while executing actions.
#[derive(Debug, Error)]
pub enum ExecuteError {
  /// Command exited with a non-zero status and the action asked for checking.
  #[error("command failed with exit code {code:?}: {cmd}")]
  CmdFailed { cmd: String, code: Option<i32> },

  /// Command ran longer than its timeout and was killed.
  #[error("command timed out after {timeout:?}: {cmd}")]
  TimedOut { cmd: String, timeout: Duration },

  /// Command could not be started.
  #[error("failed to spawn `{cmd}`: {source}")]
  Spawn {
    cmd: String,
    #[source]
    source: io::Error,
  },

  /// An argv command was built from an empty argument list.
  #[error("command has no program to run")]
  EmptyCommand,

  /// A spawned action task panicked or was cancelled.
  #[error("action task failed: {0}")]
  TaskFailed(String),

  /// I/O error during execution.
  #[error("io error: {0}")]
  Io(#[from] io::Error),
}

/// Configuration for action execution.
#[derive(Debug, Clone)]
pub struct ExecuteConfig {
  /// Maximum number of actions of one stage to run at the same time.
  pub parallelism: usize,

  /// Shell to use for shell-string commands.
  /// If None, uses /bin/sh (Unix) or cmd.exe (Windows).
  pub shell: Option<String>,

  /// Log actions without running them.
  pub dry_run: bool,
}

impl Default for ExecuteConfig {
  fn default() -> Self {
    Self {
      parallelism: num_cpus(),
      shell: None,
      dry_run: false,
    }
  }
}

/// Get the number of CPUs for default parallelism.
fn num_cpus() -> usize {
  std::thread::available_parallelism().map(|p| p.get()).unwrap_or(4)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn execute_config_defaults() {
    let config = ExecuteConfig::default();
    assert!(config.parallelism >= 1);
    assert!(config.shell.is_none());
    assert!(!config.dry_run);
  }

  #[test]
  fn timeout_message_is_human_readable() {
    let err = ExecuteError::TimedOut {
      cmd: "sleep 10".to_string(),
      timeout: Duration::from_secs(2),
    };
    assert_eq!(err.to_string(), "command timed out after 2s: sleep 10");
  }
}
