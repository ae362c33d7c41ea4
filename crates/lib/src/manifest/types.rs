use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::path::PathError;
use crate::target::GraphError;

/// Top-level build file document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildFile {
  #[serde(default, rename = "target")]
  pub targets: Vec<TargetSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetSpec {
  pub name: String,
  /// Input paths or glob patterns, relative to the build file.
  #[serde(default)]
  pub inputs: Vec<String>,
  #[serde(default)]
  pub outputs: Vec<String>,
  #[serde(default)]
  pub deps: Vec<DependencySpec>,
  #[serde(default)]
  pub stages: Vec<StageSpec>,
}

/// A dependency by target name, optionally gated on a feature.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DependencySpec {
  Name(String),
  Gated { name: String, feature: String },
}

impl DependencySpec {
  pub fn name(&self) -> &str {
    match self {
      DependencySpec::Name(name) | DependencySpec::Gated { name, .. } => name,
    }
  }

  pub fn feature(&self) -> Option<&str> {
    match self {
      DependencySpec::Name(_) => None,
      DependencySpec::Gated { feature, .. } => Some(feature),
    }
  }
}

/// An action, or an array of actions run as one group.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StageSpec {
  Group(Vec<ActionSpec>),
  Single(ActionSpec),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ActionSpec {
  /// Shell command string.
  Shell(String),
  Table(ActionTable),
}

/// Long form of an action. Exactly one of `cmd`, `args` or `touch` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionTable {
  pub cmd: Option<String>,
  pub args: Option<Vec<String>>,
  pub touch: Option<String>,
  #[serde(default)]
  pub env: BTreeMap<String, String>,
  pub cwd: Option<String>,
  #[serde(default)]
  pub check: bool,
  /// Duration in humantime syntax, e.g. "30s" or "2m".
  pub timeout: Option<String>,
}

/// Errors that can occur while loading a build file.
#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("failed to read build file {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse build file: {0}")]
  Parse(#[from] toml::de::Error),

  #[error("target '{0}' is defined more than once")]
  DuplicateTarget(String),

  #[error("target '{target}' depends on unknown target '{dependency}'")]
  UnknownDependency { target: String, dependency: String },

  #[error("invalid action in target '{target}': {message}")]
  InvalidAction { target: String, message: String },

  #[error(transparent)]
  Graph(#[from] GraphError),

  #[error(transparent)]
  Path(#[from] PathError),
}
