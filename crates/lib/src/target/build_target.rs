use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use super::{BuildError, DependencyEdge, EdgeRef, TargetId, TargetState};
use crate::execute::{ActionRunner, ExecuteConfig, Stage, run_stage};
use crate::path::{Artifact, FileSystem, PathError, all_exist, earliest_mtime, latest_mtime};

/// A buildable unit: declared inputs and outputs, dependency edges, and an
/// ordered plan of stages.
#[derive(Debug, Clone)]
pub struct BuildTarget {
  name: String,
  state: TargetState,
  inputs: Vec<Artifact>,
  outputs: Vec<Artifact>,
  stages: Vec<Stage>,
  pub(super) edges: Vec<DependencyEdge>,
  pub(super) dependees: HashSet<EdgeRef>,
}

impl BuildTarget {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      state: TargetState::default(),
      inputs: Vec::new(),
      outputs: Vec::new(),
      stages: Vec::new(),
      edges: Vec::new(),
      dependees: HashSet::new(),
    }
  }

  pub fn with_inputs(mut self, inputs: impl IntoIterator<Item = Artifact>) -> Self {
    self.inputs.extend(inputs);
    self
  }

  pub fn with_outputs(mut self, outputs: impl IntoIterator<Item = Artifact>) -> Self {
    self.outputs.extend(outputs);
    self
  }

  pub fn with_stage(mut self, stage: impl Into<Stage>) -> Self {
    self.stages.push(stage.into());
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn state(&self) -> TargetState {
    self.state
  }

  pub fn set_state(&mut self, state: TargetState) {
    self.state = state;
  }

  pub fn inputs(&self) -> &[Artifact] {
    &self.inputs
  }

  pub fn outputs(&self) -> &[Artifact] {
    &self.outputs
  }

  pub fn stages(&self) -> &[Stage] {
    &self.stages
  }

  /// Edges where this target is the dependent, in declaration order.
  pub fn edges(&self) -> &[DependencyEdge] {
    &self.edges
  }

  /// Edges where this target is the dependency.
  pub fn dependees(&self) -> impl Iterator<Item = &EdgeRef> {
    self.dependees.iter()
  }

  /// All dependency targets, unfiltered.
  pub fn dependencies(&self) -> Vec<TargetId> {
    self.edges.iter().map(DependencyEdge::dependency).collect()
  }

  /// Dependency targets whose edge is selected.
  pub fn selected_dependencies(&self) -> Vec<TargetId> {
    self
      .edges
      .iter()
      .filter(|edge| edge.is_selected())
      .map(DependencyEdge::dependency)
      .collect()
  }

  pub fn inputs_exist(&self, fs: &impl FileSystem) -> Result<bool, PathError> {
    all_exist(&self.inputs, fs)
  }

  pub fn outputs_exist(&self, fs: &impl FileSystem) -> Result<bool, PathError> {
    all_exist(&self.outputs, fs)
  }

  /// Decide whether the outputs are stale.
  ///
  /// A rebuild is needed when there are no outputs or one is missing, when
  /// there are no inputs or one is missing, or when the earliest input is at
  /// least as new as the latest output. Timestamps are re-read on every call.
  pub fn is_rebuild_needed(&self, fs: &impl FileSystem) -> Result<bool, PathError> {
    if self.outputs.is_empty() || !self.outputs_exist(fs)? {
      debug!(name = %self.name, "rebuild needed: outputs missing");
      return Ok(true);
    }
    if self.inputs.is_empty() || !self.inputs_exist(fs)? {
      debug!(name = %self.name, "rebuild needed: inputs missing");
      return Ok(true);
    }

    let earliest_input = earliest_mtime(&self.inputs, fs)?;
    let latest_output = latest_mtime(&self.outputs, fs)?;
    let stale = match (earliest_input, latest_output) {
      (Some(input), Some(output)) => input >= output,
      _ => true,
    };

    debug!(name = %self.name, stale, ?earliest_input, ?latest_output, "compared timestamps");
    Ok(stale)
  }

  /// Run this target's stages in order.
  ///
  /// Dependencies are not built and staleness is not consulted; deciding
  /// whether and when to call this is up to the caller. `force` is passed
  /// through for callers that wrap this with their own staleness check.
  pub async fn build<R: ActionRunner>(
    &self,
    runner: &Arc<R>,
    config: &ExecuteConfig,
    force: bool,
  ) -> Result<(), BuildError> {
    info!(name = %self.name, stages = self.stages.len(), force, "building target");

    for (index, stage) in self.stages.iter().enumerate() {
      debug!(name = %self.name, stage = index, actions = stage.actions().len(), "running stage");
      run_stage(stage, runner, config.parallelism)
        .await
        .map_err(|source| BuildError::Action {
          target: self.name.clone(),
          stage: index,
          source,
        })?;
    }

    Ok(())
  }

  /// Fail for the first declared output that does not exist.
  pub fn check_outputs(&self, fs: &impl FileSystem) -> Result<(), BuildError> {
    for output in &self.outputs {
      if !output.exists(fs)? {
        return Err(BuildError::MissingOutput {
          target: self.name.clone(),
          path: output.absolute_path()?,
        });
      }
    }
    Ok(())
  }
}
