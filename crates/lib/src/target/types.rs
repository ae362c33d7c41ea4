use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::execute::ExecuteError;
use crate::path::PathError;

/// Identity of a target within its [`BuildGraph`](super::BuildGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TargetId(pub(crate) usize);

impl TargetId {
  pub fn index(self) -> usize {
    self.0
  }
}

impl fmt::Display for TargetId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

/// Selection bookkeeping for a build driver.
///
/// Targets never change their own state; whoever walks the graph does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetState {
  #[default]
  NotSelected,
  Selected,
  Done,
}

/// Errors from graph construction and ordering.
#[derive(Debug, Error)]
pub enum GraphError {
  /// The id does not belong to this graph.
  #[error("unknown target {0}")]
  UnknownTarget(TargetId),

  /// A target was given itself as a dependency.
  #[error("target '{0}' cannot depend on itself")]
  SelfDependency(String),

  /// The new edge would close a dependency cycle.
  #[error("'{dependent}' cannot depend on '{dependency}': '{dependency}' already depends on '{dependent}'")]
  WouldCycle { dependent: String, dependency: String },

  /// Cycle detected while ordering the graph.
  #[error("dependency cycle detected")]
  CycleDetected,
}

/// Errors from building a single target or checking its outputs.
#[derive(Debug, Error)]
pub enum BuildError {
  /// An action of the given stage failed.
  #[error("stage {stage} of '{target}' failed: {source}")]
  Action {
    target: String,
    stage: usize,
    #[source]
    source: ExecuteError,
  },

  /// A declared output does not exist after the build.
  #[error("output file \"{}\" of '{target}' was not generated", .path.display())]
  MissingOutput { target: String, path: PathBuf },

  /// An artifact path could not be resolved or read.
  #[error(transparent)]
  Path(#[from] PathError),
}
