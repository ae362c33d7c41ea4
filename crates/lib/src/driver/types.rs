use serde::Serialize;
use thiserror::Error;

use crate::execute::ExecuteConfig;
use crate::path::PathError;
use crate::target::{BuildError, GraphError};

/// Options for a build run.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
  /// Build every selected target, stale or not.
  pub force: bool,
  pub execute: ExecuteConfig,
}

/// Outcome of a build run.
#[derive(Debug, Default)]
pub struct BuildReport {
  /// Targets whose stages ran, in build order.
  pub built: Vec<String>,

  /// Targets skipped because their outputs were current.
  pub up_to_date: Vec<String>,

  /// Target that failed (at most one, stops the run).
  pub failed: Option<(String, BuildError)>,

  /// Selected targets never reached because of the failure.
  pub skipped: Vec<String>,
}

impl BuildReport {
  pub fn is_success(&self) -> bool {
    self.failed.is_none()
  }

  /// Number of targets that were looked at.
  pub fn total(&self) -> usize {
    self.built.len() + self.up_to_date.len() + self.failed.iter().count()
  }
}

/// What a build would do, wave by wave.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
  pub root: String,
  pub waves: Vec<Vec<PlannedTarget>>,
}

impl Plan {
  pub fn targets(&self) -> impl Iterator<Item = &PlannedTarget> {
    self.waves.iter().flatten()
  }

  pub fn stale_count(&self) -> usize {
    self.targets().filter(|t| t.stale).count()
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlannedTarget {
  pub name: String,
  pub stale: bool,
  pub stages: usize,
  /// Names of the selected direct dependencies.
  pub dependencies: Vec<String>,
}

/// Errors that prevent a run from starting or a target from being examined.
#[derive(Debug, Error)]
pub enum DriverError {
  #[error(transparent)]
  Graph(#[from] GraphError),

  #[error(transparent)]
  Path(#[from] PathError),
}
